/*! Character-offset text types. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Character range within a node's text. End is exclusive, matching Rust's
/// `Range` semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TextRange {
  /// Start position (inclusive).
  pub start: u32,
  /// End position (exclusive).
  pub end: u32,
}

impl TextRange {
  /// Create a new text range.
  pub const fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }

  /// Length of the range in characters.
  pub const fn len(&self) -> u32 {
    self.end.saturating_sub(self.start)
  }

  /// Check if the range is empty (caret position, no text).
  pub const fn is_empty(&self) -> bool {
    self.start >= self.end
  }
}

impl From<(u32, u32)> for TextRange {
  fn from((start, end): (u32, u32)) -> Self {
    Self { start, end }
  }
}

/// A line of text and the range it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TextLine {
  pub text: String,
  pub range: TextRange,
}
