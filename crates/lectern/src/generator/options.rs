#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::a11y::Role;
use crate::types::TextRange;

/// The situation a presentation is produced for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum FormatType {
  /// Reviewing an object without moving focus to it.
  #[default]
  Unfocused,
  /// The object just received focus.
  Focused,
  /// The object is context for a focused descendant.
  Ancestor,
  WhereAmIBrief,
  WhereAmIDetailed,
}

impl FormatType {
  pub const fn is_where_am_i(self) -> bool {
    matches!(self, Self::WhereAmIBrief | Self::WhereAmIDetailed)
  }
}

/// Per-call arguments to [`Generator::generate`](crate::Generator::generate).
#[derive(Debug, Clone)]
pub struct PresentationOptions<N> {
  /// Present the node as this role instead of resolving one.
  pub role: Option<Role>,
  pub format_type: FormatType,
  pub start_offset: Option<u32>,
  pub end_offset: Option<u32>,
  /// Prefix focused presentations with the ancestors not shared with
  /// `prior_obj`.
  pub include_context: bool,
  pub omit_description: bool,
  /// The node is a progress bar whose value just changed.
  pub is_progress_bar_update: bool,
  /// Present every cell of the row containing the node.
  pub reading_row: bool,
  /// Only present context that changed since `prior_obj`.
  pub new_only: bool,
  /// The object presented before this one, usually the previous focus.
  pub prior_obj: Option<N>,
}

impl<N> Default for PresentationOptions<N> {
  fn default() -> Self {
    Self {
      role: None,
      format_type: FormatType::default(),
      start_offset: None,
      end_offset: None,
      include_context: true,
      omit_description: false,
      is_progress_bar_update: false,
      reading_row: false,
      new_only: false,
      prior_obj: None,
    }
  }
}

impl<N> PresentationOptions<N> {
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn focused() -> Self {
    Self::new().format(FormatType::Focused)
  }

  #[must_use]
  pub fn format(mut self, format_type: FormatType) -> Self {
    self.format_type = format_type;
    self
  }

  #[must_use]
  pub fn role(mut self, role: Role) -> Self {
    self.role = Some(role);
    self
  }

  #[must_use]
  pub fn range(mut self, start: u32, end: u32) -> Self {
    self.start_offset = Some(start);
    self.end_offset = Some(end);
    self
  }

  #[must_use]
  pub fn prior(mut self, prior: N) -> Self {
    self.prior_obj = Some(prior);
    self
  }

  #[must_use]
  pub fn progress_update(mut self) -> Self {
    self.is_progress_bar_update = true;
    self
  }

  #[must_use]
  pub fn without_context(mut self) -> Self {
    self.include_context = false;
    self
  }

  #[must_use]
  pub fn without_description(mut self) -> Self {
    self.omit_description = true;
    self
  }

  #[must_use]
  pub fn reading_row(mut self) -> Self {
    self.reading_row = true;
    self
  }

  #[must_use]
  pub fn new_only(mut self) -> Self {
    self.new_only = true;
    self
  }

  /// The requested text range, when both ends are given.
  pub fn text_range(&self) -> Option<TextRange> {
    Some(TextRange::new(self.start_offset?, self.end_offset?))
  }
}
