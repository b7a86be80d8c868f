/*!
English placeholder strings.

Role names come in a full form for speech and sound and a short marker form
for braille. An empty string means the role is not announced.
*/

use crate::a11y::Role;
use crate::config::Mode;

pub(crate) const fn role_name(role: Role, mode: Mode) -> &'static str {
  match mode {
    Mode::Braille => short_role_name(role),
    Mode::Speech | Mode::Sound => full_role_name(role),
  }
}

#[allow(clippy::match_same_arms)]
const fn full_role_name(role: Role) -> &'static str {
  match role {
    Role::Application => "application",
    Role::Frame | Role::Window => "frame",
    Role::Dialog => "dialog",
    Role::Alert => "alert",
    Role::Notification => "notification",
    Role::Document | Role::DocumentWeb => "document",
    Role::Article | Role::FeedArticle => "article",
    Role::Feed => "feed",
    Role::Heading => "heading",
    Role::BlockQuote => "block quote",
    Role::Comment => "comment",
    Role::Footnote => "footnote",
    Role::Landmark | Role::RegionLandmark => "region",
    Role::DpubLandmark | Role::DpubSection => "",
    Role::Form => "form",
    Role::Grouping => "grouping",
    Role::ScrollPane => "scroll pane",
    Role::Toolbar => "tool bar",
    Role::StatusBar => "status bar",
    Role::Tooltip => "tool tip",
    Role::Image => "image",
    Role::Icon => "icon",
    Role::Canvas => "canvas",
    Role::Separator => "separator",
    Role::Math => "math",
    Role::MathFraction => "fraction",
    Role::MathRoot => "root",
    Role::MathSubscript => "subscript",
    Role::MathSuperscript => "superscript",
    Role::MathUnderOver => "under over",
    Role::MathMultiscript => "multiscript",
    Role::MathEnclosed => "enclosed",
    Role::MathFenced => "fenced",
    Role::MathTable => "math table",
    Role::MathRow => "row",
    Role::MathCell => "cell",
    Role::DescriptionList => "description list",
    Role::DescriptionTerm => "term",
    Role::DescriptionValue => "definition",
    Role::Link => "link",
    Role::Menu => "menu",
    Role::MenuBar => "menu bar",
    Role::MenuItem => "menu item",
    Role::CheckMenuItem => "check menu item",
    Role::RadioMenuItem => "radio menu item",
    Role::PageTab => "page tab",
    Role::PageTabList => "page tab list",
    Role::List => "list",
    Role::ListBox => "list box",
    Role::ListItem => "list item",
    Role::Table => "table",
    Role::TableRow => "row",
    Role::TableCell => "cell",
    Role::ColumnHeader => "column header",
    Role::RowHeader => "row header",
    Role::Tree => "tree",
    Role::TreeTable => "tree table",
    Role::TreeItem => "tree item",
    Role::PushButton => "button",
    Role::ToggleButton => "toggle button",
    Role::CheckBox => "check box",
    Role::RadioButton => "radio button",
    Role::Switch => "switch",
    Role::ComboBox => "combo box",
    Role::Entry | Role::Text => "text",
    Role::PasswordText => "password text",
    Role::SpinButton => "spin button",
    Role::Slider => "slider",
    Role::ScrollBar => "scroll bar",
    Role::ProgressBar => "progress bar",
    Role::Section
    | Role::Paragraph
    | Role::Panel
    | Role::Filler
    | Role::Label
    | Role::StaticText
    | Role::Anchor
    | Role::Unknown => "",
  }
}

#[allow(clippy::match_same_arms, clippy::wildcard_enum_match_arm)]
const fn short_role_name(role: Role) -> &'static str {
  match role {
    Role::Dialog => "dlg",
    Role::Alert => "alrt",
    Role::Heading => "h",
    Role::BlockQuote => "bqt",
    Role::Landmark | Role::RegionLandmark => "rgn",
    Role::Form => "form",
    Role::Image | Role::Icon => "img",
    Role::Separator => "sep",
    Role::Link => "lnk",
    Role::Menu => "mnu",
    Role::MenuItem | Role::CheckMenuItem | Role::RadioMenuItem => "mnuitm",
    Role::PageTab => "tab",
    Role::List | Role::ListBox => "lst",
    Role::ListItem => "lstitm",
    Role::Table | Role::TreeTable => "tbl",
    Role::ColumnHeader => "colhdr",
    Role::RowHeader => "rowhdr",
    Role::Tree => "tree",
    Role::TreeItem => "tritm",
    Role::PushButton => "btn",
    Role::ToggleButton => "tglbtn",
    Role::CheckBox => "chk",
    Role::RadioButton => "rdo",
    Role::Switch => "sw",
    Role::ComboBox => "cbo",
    Role::Entry | Role::Text | Role::PasswordText => "txt",
    Role::SpinButton => "spn",
    Role::Slider => "sldr",
    Role::ScrollBar => "scrl",
    Role::ProgressBar => "prgs",
    Role::Math => "math",
    _ => "",
  }
}

/// Digital-publishing role name from an `xml-roles` value like `doc-chapter`.
pub(crate) fn dpub_role_name(xml_role: &str) -> String {
  xml_role
    .strip_prefix("doc-")
    .unwrap_or(xml_role)
    .replace('-', " ")
}

/// State markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cue {
  Checked,
  Unchecked,
  Mixed,
  RadioOn,
  RadioOff,
  SwitchOn,
  SwitchOff,
  Pressed,
  NotPressed,
  Expanded,
  Collapsed,
  Required,
  Invalid,
  ReadOnly,
  Unavailable,
  Selected,
}

pub(crate) const fn cue(cue: Cue, mode: Mode) -> &'static str {
  match mode {
    Mode::Braille => braille_cue(cue),
    Mode::Speech | Mode::Sound => spoken_cue(cue),
  }
}

const fn spoken_cue(cue: Cue) -> &'static str {
  match cue {
    Cue::Checked => "checked",
    Cue::Unchecked => "not checked",
    Cue::Mixed => "partially checked",
    Cue::RadioOn => "selected",
    Cue::RadioOff => "not selected",
    Cue::SwitchOn => "on",
    Cue::SwitchOff => "off",
    Cue::Pressed => "pressed",
    Cue::NotPressed => "not pressed",
    Cue::Expanded => "expanded",
    Cue::Collapsed => "collapsed",
    Cue::Required => "required",
    Cue::Invalid => "invalid entry",
    Cue::ReadOnly => "read only",
    Cue::Unavailable => "grayed",
    Cue::Selected => "selected",
  }
}

const fn braille_cue(cue: Cue) -> &'static str {
  match cue {
    Cue::Checked | Cue::Pressed | Cue::SwitchOn => "<x>",
    Cue::Unchecked | Cue::NotPressed | Cue::SwitchOff => "< >",
    Cue::Mixed => "<->",
    Cue::RadioOn => "(x)",
    Cue::RadioOff => "( )",
    Cue::Expanded => "-",
    Cue::Collapsed => "+",
    Cue::Required => "required",
    Cue::Invalid => "invalid",
    Cue::ReadOnly => "rdonly",
    Cue::Unavailable => "grayed",
    Cue::Selected => "sel",
  }
}

pub(crate) fn heading_level(level: &str, mode: Mode) -> String {
  match mode {
    Mode::Braille => format!("h{level}"),
    Mode::Speech | Mode::Sound => format!("heading level {level}"),
  }
}

pub(crate) fn nesting_level(level: i32, mode: Mode) -> String {
  match mode {
    Mode::Braille => format!("LVL {level}"),
    Mode::Speech | Mode::Sound => format!("nesting level {level}"),
  }
}

pub(crate) fn tree_level(level: i32, mode: Mode) -> String {
  match mode {
    Mode::Braille => format!("TREE LEVEL {level}"),
    Mode::Speech | Mode::Sound => format!("tree level {level}"),
  }
}

pub(crate) fn percent(value: i32, mode: Mode) -> String {
  match mode {
    Mode::Braille => format!("{value}%"),
    Mode::Speech | Mode::Sound => format!("{value} percent"),
  }
}

pub(crate) fn position(ordinal: usize, count: usize) -> String {
  format!("{ordinal} of {count}")
}

pub(crate) fn table_size(rows: u32, columns: u32, mode: Mode) -> String {
  match mode {
    Mode::Braille => format!("{rows}x{columns}"),
    Mode::Speech | Mode::Sound => format!("with {rows} rows {columns} columns"),
  }
}

pub(crate) fn sort_order(order: &str) -> Option<&'static str> {
  match order.to_ascii_lowercase().as_str() {
    "ascending" => Some("sorted ascending"),
    "descending" => Some("sorted descending"),
    "other" => Some("sorted"),
    _ => None,
  }
}
