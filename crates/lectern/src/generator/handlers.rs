/*!
Per-mode dispatch tables.

Each handler lists its sub-generators in presentation order. Roles missing
from a table use the mode's default handler.
*/

use std::collections::HashMap;

use super::{Generator, Handler, Presentation, Request};
use crate::a11y::Role;
use crate::config::Mode;
use crate::provider::Accessible;

/// The mode's role handlers and its default handler.
pub(super) fn table<N: Accessible>(mode: Mode) -> (HashMap<Role, Handler<N>>, Handler<N>) {
  match mode {
    Mode::Speech => (speech(), default_presentation),
    Mode::Braille => (braille(), default_presentation),
    Mode::Sound => (sound(), sound_default),
  }
}

fn assign<N: Accessible>(table: &mut HashMap<Role, Handler<N>>, roles: &[Role], handler: Handler<N>) {
  for role in roles {
    table.insert(*role, handler);
  }
}

const CHECKABLE: &[Role] = &[
  Role::CheckBox,
  Role::CheckMenuItem,
  Role::RadioButton,
  Role::RadioMenuItem,
  Role::Switch,
  Role::ToggleButton,
];

/// Handlers braille and speech have in common.
fn shared<N: Accessible>() -> HashMap<Role, Handler<N>> {
  let mut table = HashMap::new();
  assign(
    &mut table,
    &[
      Role::Application,
      Role::Frame,
      Role::Window,
      Role::Document,
      Role::DocumentWeb,
      Role::Article,
      Role::FeedArticle,
      Role::Feed,
      Role::Section,
      Role::Panel,
      Role::Filler,
      Role::Grouping,
      Role::ScrollPane,
      Role::Toolbar,
      Role::StatusBar,
      Role::List,
      Role::ListBox,
      Role::Menu,
      Role::MenuBar,
      Role::PageTabList,
      Role::Tree,
      Role::TableRow,
      Role::DescriptionList,
      Role::Footnote,
    ],
    container,
  );
  assign(
    &mut table,
    &[
      Role::Paragraph,
      Role::BlockQuote,
      Role::Comment,
      Role::DescriptionTerm,
      Role::DescriptionValue,
      Role::DpubSection,
    ],
    text_object,
  );
  assign(&mut table, &[Role::Heading], heading);
  assign(&mut table, &[Role::Label, Role::StaticText, Role::Tooltip], static_text);
  assign(&mut table, &[Role::Link, Role::Anchor], link);
  assign(&mut table, &[Role::PushButton, Role::MenuItem, Role::PageTab], widget);
  assign(&mut table, &[Role::ComboBox], combo_box);
  assign(&mut table, &[Role::ListItem], list_item);
  assign(&mut table, &[Role::TreeItem], tree_item);
  assign(&mut table, &[Role::TableCell], table_cell);
  assign(&mut table, &[Role::ColumnHeader, Role::RowHeader], table_header);
  assign(&mut table, &[Role::Table, Role::TreeTable], table_object);
  assign(&mut table, &[Role::ProgressBar], progress_bar);
  assign(&mut table, &[Role::Slider, Role::SpinButton, Role::ScrollBar], range_widget);
  assign(&mut table, &[Role::Entry, Role::Text, Role::PasswordText], text_entry);
  assign(&mut table, &[Role::Image, Role::Icon, Role::Canvas], image);
  assign(&mut table, &[Role::Dialog, Role::Alert, Role::Notification], dialog);
  assign(
    &mut table,
    &[
      Role::Landmark,
      Role::RegionLandmark,
      Role::DpubLandmark,
      Role::Form,
    ],
    landmark,
  );
  assign(
    &mut table,
    &[
      Role::Math,
      Role::MathFraction,
      Role::MathRoot,
      Role::MathSubscript,
      Role::MathSuperscript,
      Role::MathUnderOver,
      Role::MathMultiscript,
      Role::MathEnclosed,
      Role::MathFenced,
      Role::MathTable,
      Role::MathRow,
      Role::MathCell,
    ],
    math,
  );
  assign(&mut table, &[Role::Separator], separator);
  table
}

fn speech<N: Accessible>() -> HashMap<Role, Handler<N>> {
  let mut table = shared();
  assign(&mut table, CHECKABLE, checkable);
  table
}

/// Braille omits the position in set for toggles.
fn braille<N: Accessible>() -> HashMap<Role, Handler<N>> {
  let mut table = shared();
  assign(&mut table, CHECKABLE, checkable_braille);
  table
}

fn sound<N: Accessible>() -> HashMap<Role, Handler<N>> {
  let mut table = HashMap::new();
  assign(&mut table, CHECKABLE, sound_checkable);
  assign(&mut table, &[Role::ProgressBar], sound_progress_bar);
  assign(
    &mut table,
    &[
      Role::PushButton,
      Role::MenuItem,
      Role::PageTab,
      Role::ComboBox,
      Role::ListItem,
      Role::TreeItem,
    ],
    sound_widget,
  );
  table
}

// Braille and speech

fn default_presentation<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name_or_text),
      ("value", Generator::value),
      ("role_name", Generator::role_name),
      ("required", Generator::required),
      ("invalid", Generator::invalid),
      ("unavailable", Generator::unavailable),
      ("description", Generator::description),
    ],
  )
}

fn container<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name),
      ("role_name", Generator::role_name),
      ("nesting_level", Generator::nesting_level),
      ("position_in_set", Generator::position_in_set),
      ("description", Generator::description),
    ],
  )
}

fn text_object<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("text", Generator::label_and_name_or_text),
      ("role_name", Generator::role_name),
      ("description", Generator::description),
    ],
  )
}

fn heading<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("text", Generator::label_and_name_or_text),
      ("role_name", Generator::role_name),
    ],
  )
}

fn static_text<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("static_text", Generator::static_text),
    ],
  )
}

fn link<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name_or_text),
      ("role_name", Generator::role_name),
      ("description", Generator::description),
    ],
  )
}

fn widget<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name),
      ("expandable", Generator::expandable_state),
      ("role_name", Generator::role_name),
      ("unavailable", Generator::unavailable),
      ("selected", Generator::selected),
      ("position_in_set", Generator::position_in_set),
      ("description", Generator::description),
    ],
  )
}

fn checkable<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name),
      ("role_name", Generator::role_name),
      ("checked", Generator::checked_state),
      ("required", Generator::required),
      ("invalid", Generator::invalid),
      ("unavailable", Generator::unavailable),
      ("position_in_set", Generator::position_in_set),
      ("description", Generator::description),
    ],
  )
}

fn checkable_braille<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name),
      ("role_name", Generator::role_name),
      ("checked", Generator::checked_state),
      ("required", Generator::required),
      ("invalid", Generator::invalid),
      ("unavailable", Generator::unavailable),
      ("description", Generator::description),
    ],
  )
}

fn combo_box<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name),
      ("role_name", Generator::role_name),
      ("expandable", Generator::expandable_state),
      ("required", Generator::required),
      ("invalid", Generator::invalid),
      ("unavailable", Generator::unavailable),
      ("description", Generator::description),
    ],
  )
}

fn list_item<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  if r.options.text_range().is_some() {
    return text_object(g, r);
  }
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name_or_text),
      ("expandable", Generator::expandable_state),
      ("nesting_level", Generator::nesting_level),
      ("selected", Generator::selected),
      ("position_in_set", Generator::position_in_set),
      ("description", Generator::description),
    ],
  )
}

fn tree_item<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name_or_text),
      ("expandable", Generator::expandable_state),
      ("tree_level", Generator::tree_level),
      ("selected", Generator::selected),
      ("position_in_set", Generator::position_in_set),
      ("description", Generator::description),
    ],
  )
}

fn table_cell<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  if r.options.reading_row {
    let row = g.part("row_cells", r, Generator::row_cells);
    if !row.is_empty() {
      return row;
    }
  }
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("table_headers", Generator::table_headers),
      ("nameless_toggle", Generator::nameless_toggle_header),
      ("cell_checked", Generator::cell_checked_state),
      ("text", Generator::label_and_name_or_text),
      ("expandable", Generator::expandable_state),
    ],
  )
}

fn table_header<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name_or_text),
      ("role_name", Generator::role_name),
      ("sort_order", Generator::sort_order),
    ],
  )
}

fn table_object<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name),
      ("role_name", Generator::role_name),
      ("table_size", Generator::table_size),
      ("description", Generator::description),
    ],
  )
}

/// Nothing at all when the bar has no value or the update is throttled.
fn progress_bar<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  let value = g.part("progress_value", r, Generator::progress_value);
  if value.is_empty() {
    return Vec::new();
  }
  let mut out = g.part("label_and_name", r, Generator::label_and_name);
  out.extend(value);
  out.extend(g.compose(
    r,
    &[
      ("role_name", Generator::role_name),
      ("progress_index", Generator::progress_index),
    ],
  ));
  out
}

fn range_widget<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name),
      ("value", Generator::value),
      ("role_name", Generator::role_name),
      ("unavailable", Generator::unavailable),
      ("description", Generator::description),
    ],
  )
}

fn text_entry<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name),
      ("role_name", Generator::role_name),
      ("text", Generator::text),
      ("read_only", Generator::read_only),
      ("required", Generator::required),
      ("invalid", Generator::invalid),
      ("unavailable", Generator::unavailable),
      ("description", Generator::description),
    ],
  )
}

fn image<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name),
      ("image_description", Generator::image_description),
      ("role_name", Generator::role_name),
      ("description", Generator::description),
    ],
  )
}

fn dialog<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name),
      ("role_name", Generator::role_name),
      ("unrelated_labels", Generator::unrelated_labels),
      ("description", Generator::description),
    ],
  )
}

fn landmark<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("label_and_name", Generator::label_and_name),
      ("role_name", Generator::role_name),
      ("description", Generator::description),
    ],
  )
}

fn math<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("context", Generator::ancestor_context),
      ("text", Generator::label_and_name_or_text),
      ("role_name", Generator::role_name),
    ],
  )
}

fn separator<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.part("role_name", r, Generator::role_name)
}

// Sound

fn sound_default<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("role_name", Generator::role_name),
      ("required", Generator::required),
      ("invalid", Generator::invalid),
      ("unavailable", Generator::unavailable),
    ],
  )
}

fn sound_checkable<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("role_name", Generator::role_name),
      ("checked", Generator::checked_state),
      ("unavailable", Generator::unavailable),
    ],
  )
}

fn sound_widget<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.compose(
    r,
    &[
      ("role_name", Generator::role_name),
      ("expandable", Generator::expandable_state),
      ("unavailable", Generator::unavailable),
    ],
  )
}

fn sound_progress_bar<N: Accessible>(g: &Generator<N>, r: &Request<'_, N>) -> Presentation {
  g.part("progress_value", r, Generator::progress_value)
}
