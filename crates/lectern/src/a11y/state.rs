/*!
Node states.

A [`StateSet`] is a snapshot of the boolean states a provider reports for a
node at query time.
*/

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum State {
  // === Visibility ===
  Showing,
  Visible,
  Hidden,

  // === Focus & interaction ===
  Focusable,
  Focused,
  /// Matches ARIA `aria-disabled`.
  Disabled,
  Editable,
  ReadOnly,
  Multiline,

  // === Toggles ===
  Checkable,
  Checked,
  Indeterminate,
  Pressed,

  // === Expansion ===
  Expandable,
  Expanded,
  HasPopup,

  // === Selection ===
  Selectable,
  Selected,

  // === Validation ===
  Required,
  InvalidEntry,

  /// The provider has torn the node down.
  Defunct,
}

/// Set of states reported for a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StateSet(HashSet<State>);

impl StateSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn contains(&self, state: State) -> bool {
    self.0.contains(&state)
  }

  pub fn insert(&mut self, state: State) -> bool {
    self.0.insert(state)
  }

  pub fn remove(&mut self, state: State) -> bool {
    self.0.remove(&state)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Showing, visible and not hidden. Geometry is checked separately.
  pub fn is_on_screen(&self) -> bool {
    self.contains(State::Showing) && self.contains(State::Visible) && !self.contains(State::Hidden)
  }

  /// Expandable and currently collapsed.
  pub fn is_collapsed(&self) -> bool {
    self.contains(State::Expandable) && !self.contains(State::Expanded)
  }
}

impl FromIterator<State> for StateSet {
  fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl<const N: usize> From<[State; N]> for StateSet {
  fn from(states: [State; N]) -> Self {
    states.into_iter().collect()
  }
}
