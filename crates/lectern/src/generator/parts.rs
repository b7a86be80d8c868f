/*!
Sub-generators.

Each returns a (possibly empty) list of units for one aspect of a node.
Handlers compose them in mode-specific order.
*/

use super::strings::{self, Cue};
use super::{FormatType, Generator, Presentation, PresentationOptions, PresentationUnit, Request, Tone};
use crate::a11y::{Role, State};
use crate::cache::{CacheKey, CacheTable};
use crate::config::{Mode, Verbosity};
use crate::progress::in_scope;
use crate::provider::{Accessible, NodeExt};
use crate::redundancy::is_redundant;

/// Placeholder for an embedded object in a text run.
const EMBEDDED_OBJECT: char = '\u{fffc}';

/// Deepest chain of nested embedded objects that is expanded.
const MAX_EMBEDDING_DEPTH: usize = 64;

fn text(s: impl Into<String>) -> Presentation {
  let s = s.into();
  if s.trim().is_empty() {
    Vec::new()
  } else {
    vec![PresentationUnit::Text(s.trim().to_owned())]
  }
}

fn indicator(cue: Cue, mode: Mode) -> Presentation {
  vec![PresentationUnit::Indicator(strings::cue(cue, mode).to_owned())]
}

impl<N: Accessible> Generator<N> {
  fn redundant(&self, a: &str, b: &str) -> bool {
    is_redundant(a, b, self.config.redundancy_threshold)
  }

  fn key(node: &N) -> CacheKey<N> {
    CacheKey::node(node.clone())
  }

  fn text_fact(&self, table: CacheTable, node: &N, compute: impl FnOnce() -> String) -> String {
    self.cache_for(table).text_or_insert_with(table, Self::key(node), compute)
  }

  fn flag_fact(&self, table: CacheTable, node: &N, compute: impl FnOnce() -> bool) -> bool {
    self.cache_for(table).flag_or_insert_with(table, Self::key(node), compute)
  }

  fn level_fact(&self, table: CacheTable, node: &N, compute: impl FnOnce() -> i32) -> i32 {
    self.cache_for(table).level_or_insert_with(table, Self::key(node), compute)
  }

  // Names and labels

  /// A nameless, unlabelled node with a description is named by it.
  fn uses_description_as_name(&self, node: &N) -> bool {
    self.flag_fact(CacheTable::UsedDescriptionAsName, node, || {
      node.name_or_empty().trim().is_empty()
        && node.displayed_label().is_empty()
        && !node.description_or_empty().trim().is_empty()
    })
  }

  fn effective_name(&self, node: &N) -> String {
    if self.uses_description_as_name(node) {
      node.description_or_empty().trim().to_owned()
    } else {
      node.name_or_empty().trim().to_owned()
    }
  }

  /// The label, then the name unless it repeats the label.
  pub(super) fn label_and_name(&self, request: &Request<'_, N>) -> Presentation {
    let node = request.node;
    let label = node.displayed_label();
    let name = self.effective_name(node);
    let mut out = text(label.clone());
    if !name.is_empty() && (label.is_empty() || !self.redundant(&name, &label)) {
      out.extend(text(name));
    }
    out
  }

  /// Label and name, or the node's text when it has neither.
  pub(super) fn label_and_name_or_text(&self, request: &Request<'_, N>) -> Presentation {
    let named = self.label_and_name(request);
    if named.is_empty() {
      self.text(request)
    } else {
      named
    }
  }

  pub(super) fn role_name(&self, request: &Request<'_, N>) -> Presentation {
    let mode = self.config.mode;
    let name = match request.role {
      Role::DpubLandmark | Role::DpubSection => request
        .node
        .xml_roles()
        .iter()
        .find(|r| r.starts_with("doc-"))
        .map(|r| strings::dpub_role_name(r))
        .unwrap_or_default(),
      Role::Heading => match request.node.attribute("level") {
        Some(level) if !level.trim().is_empty() => strings::heading_level(level.trim(), mode),
        _ => strings::role_name(Role::Heading, mode).to_owned(),
      },
      role => strings::role_name(role, mode).to_owned(),
    };
    if name.is_empty() {
      Vec::new()
    } else {
      vec![PresentationUnit::Role(name)]
    }
  }

  /// The description, unless it repeats the name or label or the
  /// presentation is brief.
  pub(super) fn description(&self, request: &Request<'_, N>) -> Presentation {
    let options = request.options;
    let brief = self.config.verbosity == Verbosity::Brief
      && options.format_type != FormatType::WhereAmIDetailed;
    if options.omit_description || brief || options.format_type == FormatType::WhereAmIBrief {
      return Vec::new();
    }
    let node = request.node;
    if self.uses_description_as_name(node) || self.uses_description_as_static_text(node) {
      return Vec::new();
    }
    text(self.text_fact(CacheTable::Description, node, || {
      let description = node.description_or_empty().trim().to_owned();
      if description.is_empty() {
        return description;
      }
      let lowered = description.to_lowercase();
      let repeats = [node.name_or_empty(), node.displayed_label()]
        .iter()
        .any(|other| other.to_lowercase().contains(&lowered) || self.redundant(&description, other));
      if repeats {
        String::new()
      } else {
        description
      }
    }))
  }

  // Text

  fn uses_description_as_static_text(&self, node: &N) -> bool {
    self.flag_fact(CacheTable::UsedDescriptionAsStaticText, node, || {
      matches!(node.role_or_unknown(), Role::Label | Role::StaticText)
        && self.static_text_of(node).is_empty()
        && !node.description_or_empty().trim().is_empty()
    })
  }

  fn static_text_of(&self, node: &N) -> String {
    self.text_fact(CacheTable::StaticText, node, || {
      node.displayed_text().trim().to_owned()
    })
  }

  /// Text painted by a label or static text, or its description when it
  /// paints nothing.
  pub(super) fn static_text(&self, request: &Request<'_, N>) -> Presentation {
    let node = request.node;
    if self.uses_description_as_static_text(node) {
      return text(node.description_or_empty());
    }
    text(self.static_text_of(node))
  }

  /// The requested range, the caret line of a focused input, or the whole
  /// text with embedded objects expanded.
  pub(super) fn text(&self, request: &Request<'_, N>) -> Presentation {
    let node = request.node;
    if let Some(range) = request.options.text_range() {
      let substring = self.results.text_or_insert_with(
        CacheTable::Substring,
        CacheKey::range(node.clone(), range),
        || node.substring_or_empty(range),
      );
      return text(substring);
    }
    if request.role.is_text_input() && request.options.format_type == FormatType::Focused {
      return text(self.text_fact(CacheTable::LineText, node, || {
        let offset = node.caret_offset_or_none().unwrap_or(0);
        node.line_at_or_none(offset).map(|l| l.text).unwrap_or_default()
      }));
    }
    text(self.expanded_text(node))
  }

  fn expanded_text(&self, node: &N) -> String {
    self.text_fact(CacheTable::ExpandedEmbeddedText, node, || {
      self.expand_embedded(node, &mut vec![node.clone()])
    })
  }

  /// Replace each embedded-object character with the text of the matching
  /// child. `path` holds the nodes being expanded; a child already on it is
  /// replaced by its name.
  fn expand_embedded(&self, node: &N, path: &mut Vec<N>) -> String {
    let full = self.text_fact(CacheTable::FullText, node, || node.all_text_or_empty());
    if !full.contains(EMBEDDED_OBJECT) {
      return full;
    }
    let mut children = node.children_or_empty().into_iter();
    let mut expanded = String::with_capacity(full.len());
    for ch in full.chars() {
      if ch != EMBEDDED_OBJECT {
        expanded.push(ch);
        continue;
      }
      let Some(child) = children.next() else {
        continue;
      };
      if path.contains(&child) || path.len() >= MAX_EMBEDDING_DEPTH {
        log::debug!("expand_embedded: not descending into {child:?} below {node:?}");
        expanded.push_str(child.name_or_empty().trim());
        continue;
      }
      path.push(child.clone());
      let text = self.expand_embedded(&child, path);
      path.pop();
      if text.trim().is_empty() {
        expanded.push_str(child.name_or_empty().trim());
      } else {
        expanded.push_str(text.trim());
      }
    }
    expanded
  }

  // Values and images

  #[allow(clippy::unused_self)]
  pub(super) fn value(&self, request: &Request<'_, N>) -> Presentation {
    request
      .node
      .value_or_none()
      .map(|v| text(v.display_text()))
      .unwrap_or_default()
  }

  pub(super) fn image_description(&self, request: &Request<'_, N>) -> Presentation {
    let node = request.node;
    text(self.text_fact(CacheTable::ImageDescription, node, || {
      let description = node.image_description_or_empty().trim().to_owned();
      let name = self.effective_name(node);
      if !name.is_empty() && self.redundant(&description, &name) {
        String::new()
      } else {
        description
      }
    }))
  }

  // States

  /// Checked, selected, switched or pressed, depending on the role.
  pub(super) fn checked_state(&self, request: &Request<'_, N>) -> Presentation {
    let states = request.node.states_or_empty();
    let on = states.contains(State::Checked);
    let cue = match request.role {
      Role::RadioButton | Role::RadioMenuItem => {
        if on {
          Cue::RadioOn
        } else {
          Cue::RadioOff
        }
      }
      Role::Switch => {
        if on {
          Cue::SwitchOn
        } else {
          Cue::SwitchOff
        }
      }
      Role::ToggleButton => {
        if on || states.contains(State::Pressed) {
          Cue::Pressed
        } else {
          Cue::NotPressed
        }
      }
      _ if states.contains(State::Indeterminate) => Cue::Mixed,
      _ if on => Cue::Checked,
      _ => Cue::Unchecked,
    };
    indicator(cue, self.config.mode)
  }

  pub(super) fn expandable_state(&self, request: &Request<'_, N>) -> Presentation {
    let states = request.node.states_or_empty();
    if !states.contains(State::Expandable) {
      return Vec::new();
    }
    let cue = if states.contains(State::Expanded) {
      Cue::Expanded
    } else {
      Cue::Collapsed
    };
    indicator(cue, self.config.mode)
  }

  pub(super) fn required(&self, request: &Request<'_, N>) -> Presentation {
    self.state_cue(request, State::Required, Cue::Required)
  }

  pub(super) fn invalid(&self, request: &Request<'_, N>) -> Presentation {
    self.state_cue(request, State::InvalidEntry, Cue::Invalid)
  }

  pub(super) fn read_only(&self, request: &Request<'_, N>) -> Presentation {
    if request.role.is_text_input() {
      self.state_cue(request, State::ReadOnly, Cue::ReadOnly)
    } else {
      Vec::new()
    }
  }

  pub(super) fn unavailable(&self, request: &Request<'_, N>) -> Presentation {
    self.state_cue(request, State::Disabled, Cue::Unavailable)
  }

  pub(super) fn selected(&self, request: &Request<'_, N>) -> Presentation {
    if request.options.format_type.is_where_am_i() {
      self.state_cue(request, State::Selected, Cue::Selected)
    } else {
      Vec::new()
    }
  }

  fn state_cue(&self, request: &Request<'_, N>, state: State, cue: Cue) -> Presentation {
    if request.node.has_state(state) {
      indicator(cue, self.config.mode)
    } else {
      Vec::new()
    }
  }

  // Structure

  /// How deeply a list item sits inside other lists. Zero for a top-level
  /// item.
  fn nesting_level_of(&self, node: &N) -> i32 {
    self.level_fact(CacheTable::NestingLevel, node, || {
      let lists = node
        .ancestors()
        .iter()
        .filter(|a| matches!(a.role_or_unknown(), Role::List | Role::DescriptionList))
        .count();
      i32::try_from(lists.saturating_sub(1)).unwrap_or(i32::MAX)
    })
  }

  pub(super) fn nesting_level(&self, request: &Request<'_, N>) -> Presentation {
    if request.options.text_range().is_some() {
      return Vec::new();
    }
    match self.nesting_level_of(request.node) {
      0 => Vec::new(),
      level => text(strings::nesting_level(level, self.config.mode)),
    }
  }

  /// Zero-based depth of a tree item among tree items.
  fn tree_level_of(&self, node: &N) -> i32 {
    self.level_fact(CacheTable::TreeItemLevel, node, || {
      let items = node
        .ancestors()
        .iter()
        .take_while(|a| !matches!(a.role_or_unknown(), Role::Tree | Role::TreeTable))
        .filter(|a| a.role_or_unknown() == Role::TreeItem)
        .count();
      i32::try_from(items).unwrap_or(i32::MAX)
    })
  }

  /// The tree level, when it differs from the previous object's.
  pub(super) fn tree_level(&self, request: &Request<'_, N>) -> Presentation {
    let level = self.tree_level_of(request.node);
    let prior_level = request
      .options
      .prior_obj
      .as_ref()
      .filter(|p| p.role_or_unknown() == Role::TreeItem)
      .map(|p| self.tree_level_of(p));
    if prior_level == Some(level) && !request.options.format_type.is_where_am_i() {
      return Vec::new();
    }
    text(strings::tree_level(level + 1, self.config.mode))
  }

  /// "n of m" among same-role siblings, for where-am-I.
  #[allow(clippy::unused_self)]
  pub(super) fn position_in_set(&self, request: &Request<'_, N>) -> Presentation {
    if !request.options.format_type.is_where_am_i() {
      return Vec::new();
    }
    let node = request.node;
    let from_attributes = node
      .attribute("posinset")
      .zip(node.attribute("setsize"))
      .and_then(|(pos, size)| {
        let pos = pos.trim().parse::<usize>().ok()?;
        let size = size.trim().parse::<usize>().ok()?;
        Some((pos, size))
      });
    let position = from_attributes.or_else(|| {
      let role = node.role_or_unknown();
      let siblings: Vec<N> = node
        .parent_or_none()?
        .children_or_empty()
        .into_iter()
        .filter(|s| s.role_or_unknown() == role)
        .collect();
      let index = siblings.iter().position(|s| s == node)?;
      Some((index + 1, siblings.len()))
    });
    position
      .map(|(ordinal, count)| text(strings::position(ordinal, count)))
      .unwrap_or_default()
  }

  // Tables

  fn header_names(headers: &[N]) -> Vec<String> {
    headers
      .iter()
      .map(NodeExt::displayed_text)
      .map(|t| t.trim().to_owned())
      .filter(|t| !t.is_empty())
      .collect()
  }

  /// Column then row headers of a cell, when they changed since the prior
  /// cell (with `new_only`) or the cell just got focus.
  #[allow(clippy::unused_self)]
  pub(super) fn table_headers(&self, request: &Request<'_, N>) -> Presentation {
    let options = request.options;
    let focused = matches!(
      options.format_type,
      FormatType::Focused | FormatType::WhereAmIBrief | FormatType::WhereAmIDetailed
    );
    if !focused || options.reading_row {
      return Vec::new();
    }
    let node = request.node;
    let prior = options.prior_obj.as_ref().filter(|_| options.new_only);
    let mut out = Vec::new();
    let columns = node.column_headers_or_empty();
    if !prior.is_some_and(|p| p.column_headers_or_empty() == columns) {
      out.extend(Self::header_names(&columns).into_iter().flat_map(text));
    }
    let rows = node.row_headers_or_empty();
    if !prior.is_some_and(|p| p.row_headers_or_empty() == rows) {
      out.extend(Self::header_names(&rows).into_iter().flat_map(text));
    }
    out
  }

  /// A cell holding a nameless check box or toggle and no text.
  fn holds_nameless_toggle(&self, node: &N) -> bool {
    self.flag_fact(CacheTable::NamelessToggle, node, || {
      node.displayed_text().trim().is_empty()
        && node.children_or_empty().iter().any(|c| {
          matches!(c.role_or_unknown(), Role::CheckBox | Role::ToggleButton | Role::Switch)
            && c.name_or_empty().trim().is_empty()
        })
    })
  }

  /// A nameless toggle in a cell is named by its column header.
  pub(super) fn nameless_toggle_header(&self, request: &Request<'_, N>) -> Presentation {
    if !self.holds_nameless_toggle(request.node) || request.options.format_type == FormatType::Focused {
      return Vec::new();
    }
    Self::header_names(&request.node.column_headers_or_empty())
      .into_iter()
      .flat_map(text)
      .collect()
  }

  /// Checked state of the check box or toggle inside a cell.
  pub(super) fn cell_checked_state(&self, request: &Request<'_, N>) -> Presentation {
    let toggle = request.node.children_or_empty().into_iter().find(|c| {
      matches!(
        c.role_or_unknown(),
        Role::CheckBox | Role::ToggleButton | Role::Switch
      )
    });
    let Some(toggle) = toggle else {
      return Vec::new();
    };
    let role = toggle.role_or_unknown();
    let inner = Request {
      node: &toggle,
      role,
      options: request.options,
    };
    self.checked_state(&inner)
  }

  #[allow(clippy::unused_self)]
  pub(super) fn sort_order(&self, request: &Request<'_, N>) -> Presentation {
    request
      .node
      .attribute("sort")
      .and_then(|order| strings::sort_order(&order))
      .map(text)
      .unwrap_or_default()
  }

  pub(super) fn table_size(&self, request: &Request<'_, N>) -> Presentation {
    request
      .node
      .table_size_or_none()
      .map(|(rows, columns)| text(strings::table_size(rows, columns, self.config.mode)))
      .unwrap_or_default()
  }

  /// Every cell of the row containing the node, delimited.
  pub(super) fn row_cells(&self, request: &Request<'_, N>) -> Presentation {
    let node = request.node;
    let Some(row) = node
      .parent_or_none()
      .filter(|p| p.role_or_unknown() == Role::TableRow)
    else {
      return Vec::new();
    };
    let mut options: PresentationOptions<N> = request.options.clone();
    options.reading_row = false;
    options.include_context = false;
    options.prior_obj = None;

    let mut out = Vec::new();
    for cell in row.children_or_empty() {
      let units = self.generate(&cell, &options);
      if units.is_empty() {
        continue;
      }
      if !out.is_empty() {
        out.push(PresentationUnit::Delimiter(row_delimiter(self.config.mode).to_owned()));
      }
      out.extend(units);
    }
    out
  }

  // Context

  /// Carries nothing worth presenting as context.
  fn is_layout_only(&self, node: &N) -> bool {
    self.flag_fact(CacheTable::LayoutOnly, node, || {
      let role = node.role_or_unknown();
      (role.is_layout_container() || role == Role::Unknown)
        && node.name_or_empty().trim().is_empty()
        && node.displayed_label().is_empty()
        && node.description_or_empty().trim().is_empty()
    })
  }

  /// Ancestors entered since the prior object, outermost first.
  pub(super) fn ancestor_context(&self, request: &Request<'_, N>) -> Presentation {
    let options = request.options;
    if !options.include_context || options.format_type != FormatType::Focused {
      return Vec::new();
    }
    let (prior, mut shared) = match &options.prior_obj {
      Some(prior) => (Some(prior), prior.ancestors()),
      None => (None, Vec::new()),
    };
    shared.extend(prior.cloned());

    let mut entered: Vec<N> = request
      .node
      .ancestors()
      .into_iter()
      .take_while(|a| !shared.contains(a))
      .filter(|a| a.role_or_unknown() != Role::Application && !self.is_layout_only(a))
      .collect();
    entered.reverse();

    let ancestor_options = PresentationOptions::new()
      .format(FormatType::Ancestor)
      .without_context()
      .without_description();
    entered
      .iter()
      .flat_map(|a| self.generate(a, &ancestor_options))
      .collect()
  }

  /// Labels and static text inside a dialog or alert that nothing else
  /// presents.
  pub(super) fn unrelated_labels(&self, request: &Request<'_, N>) -> Presentation {
    if request.options.format_type == FormatType::WhereAmIBrief {
      return Vec::new();
    }
    let node = request.node;
    let found = self.results.nodes_or_insert_with(
      CacheTable::Descendants,
      Self::key(node),
      || {
        self
          .discover(node, None)
          .into_iter()
          .filter(|n| n != node)
          .filter(|n| matches!(n.role_or_unknown(), Role::Label | Role::StaticText))
          .filter(|n| !n.has_state(State::Focusable))
          .collect()
      },
    );

    let name = self.effective_name(node);
    let mut presented: Vec<String> = Vec::new();
    for label in &found {
      let label_text = label.displayed_text().trim().to_owned();
      if label_text.is_empty()
        || (!name.is_empty() && self.redundant(&label_text, &name))
        || presented.iter().any(|p| self.redundant(&label_text, p))
      {
        continue;
      }
      presented.push(label_text);
    }
    presented.into_iter().flat_map(text).collect()
  }

  // Progress

  /// The bar's value: a percentage in braille and speech, a tone in sound.
  /// Empty for an update that is throttled or out of scope.
  pub(super) fn progress_value(&self, request: &Request<'_, N>) -> Presentation {
    let node = request.node;
    let Some(percent) = node.value_or_none().and_then(|v| v.percent()) else {
      return Vec::new();
    };
    let options = request.options;
    if options.is_progress_bar_update {
      if !self.config.progress_updates {
        return Vec::new();
      }
      if !in_scope(self.config.progress_verbosity, node, options.prior_obj.as_ref()) {
        log::debug!(
          "Progress update of {node:?} is outside the {:?} scope",
          self.config.progress_verbosity
        );
        return Vec::new();
      }
      if !self.progress.lock().should_present_update(node) {
        return Vec::new();
      }
    }
    match self.config.mode {
      Mode::Sound => vec![PresentationUnit::Tone(Tone::for_percent(percent))],
      Mode::Braille | Mode::Speech => text(strings::percent(percent, self.config.mode)),
    }
  }

  /// "n of m" among tracked bars, when the last update came from another
  /// bar. Runs before this update is recorded.
  pub(super) fn progress_index(&self, request: &Request<'_, N>) -> Presentation {
    if !request.options.is_progress_bar_update {
      return Vec::new();
    }
    let node = request.node;
    let mut progress = self.progress.lock();
    if progress.most_recently_updated().as_ref() == Some(node) {
      return Vec::new();
    }
    progress
      .ordinal_and_count(node)
      .map(|(ordinal, count)| text(strings::position(ordinal, count)))
      .unwrap_or_default()
  }
}

const fn row_delimiter(mode: Mode) -> &'static str {
  match mode {
    Mode::Braille => "|",
    Mode::Speech | Mode::Sound => ",",
  }
}
