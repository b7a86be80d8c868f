/*!
Fault-tolerant queries.

Provider failures are never fatal: each query here checks liveness first,
logs a failure at info level and falls back to a neutral default (empty
string, empty list, `false`, `None`).
*/

use std::collections::HashMap;

use super::Accessible;
use crate::a11y::{RangeValue, Role, State, StateSet};
use crate::types::{Bounds, LecternError, LecternResult, TextLine, TextRange};

/// Guard against providers that report a node as its own ancestor.
const MAX_ANCESTOR_DEPTH: usize = 256;

fn checked<N: Accessible, T: Default>(
  node: &N,
  query: &'static str,
  f: impl FnOnce(&N) -> LecternResult<T>,
) -> T {
  let result = if node.is_valid() {
    f(node)
  } else {
    Err(LecternError::DeadNode)
  };
  result.unwrap_or_else(|err| {
    log::info!("{query} on {node:?}: {err}");
    T::default()
  })
}

/// Defaulting wrappers around [`Accessible`] queries.
pub trait NodeExt: Accessible {
  fn role_or_unknown(&self) -> Role {
    checked(self, "role", Self::role)
  }

  fn name_or_empty(&self) -> String {
    checked(self, "name", Self::name)
  }

  fn description_or_empty(&self) -> String {
    checked(self, "description", Self::description)
  }

  fn attributes_or_empty(&self) -> HashMap<String, String> {
    checked(self, "attributes", Self::attributes)
  }

  fn attribute(&self, key: &str) -> Option<String> {
    self.attributes_or_empty().remove(key)
  }

  /// Values of the space-separated `xml-roles` attribute.
  fn xml_roles(&self) -> Vec<String> {
    self
      .attribute("xml-roles")
      .map(|roles| roles.split_whitespace().map(str::to_owned).collect())
      .unwrap_or_default()
  }

  fn states_or_empty(&self) -> StateSet {
    checked(self, "states", Self::states)
  }

  fn has_state(&self, state: State) -> bool {
    self.states_or_empty().contains(state)
  }

  fn bounds_or_none(&self) -> Option<Bounds> {
    checked(self, "bounds", Self::bounds)
  }

  fn parent_or_none(&self) -> Option<Self> {
    checked(self, "parent", Self::parent)
  }

  fn children_or_empty(&self) -> Vec<Self> {
    checked(self, "children", Self::children)
  }

  fn actions_or_empty(&self) -> Vec<String> {
    checked(self, "actions", Self::actions)
  }

  fn has_action(&self, action: &str) -> bool {
    self
      .actions_or_empty()
      .iter()
      .any(|a| a.eq_ignore_ascii_case(action))
  }

  fn labels_or_empty(&self) -> Vec<Self> {
    checked(self, "labels", Self::labels)
  }

  fn value_or_none(&self) -> Option<RangeValue> {
    checked(self, "value", Self::value)
  }

  fn image_description_or_empty(&self) -> String {
    checked(self, "image_description", Self::image_description)
  }

  fn character_count_or_zero(&self) -> u32 {
    checked(self, "character_count", Self::character_count)
  }

  fn substring_or_empty(&self, range: TextRange) -> String {
    checked(self, "substring", |n| n.substring(range))
  }

  fn caret_offset_or_none(&self) -> Option<u32> {
    checked(self, "caret_offset", Self::caret_offset)
  }

  fn line_at_or_none(&self, offset: u32) -> Option<TextLine> {
    checked(self, "line_at", |n| n.line_at(offset))
  }

  fn all_text_or_empty(&self) -> String {
    checked(self, "all_text", Self::all_text)
  }

  fn row_headers_or_empty(&self) -> Vec<Self> {
    checked(self, "row_headers", Self::row_headers)
  }

  fn column_headers_or_empty(&self) -> Vec<Self> {
    checked(self, "column_headers", Self::column_headers)
  }

  fn table_size_or_none(&self) -> Option<(u32, u32)> {
    checked(self, "table_size", Self::table_size)
  }

  /// Parents from nearest to furthest. Stops at the root, on a provider
  /// failure, or on a cycle.
  fn ancestors(&self) -> Vec<Self> {
    let mut result: Vec<Self> = Vec::new();
    let mut current = self.parent_or_none();
    while let Some(parent) = current {
      if &parent == self || result.contains(&parent) || result.len() >= MAX_ANCESTOR_DEPTH {
        log::debug!("ancestors: cycle or excessive depth above {self:?}");
        break;
      }
      current = parent.parent_or_none();
      result.push(parent);
    }
    result
  }

  /// Nearest ancestor matching `predicate`.
  fn find_ancestor(&self, predicate: impl Fn(&Self) -> bool) -> Option<Self> {
    self.ancestors().into_iter().find(|a| predicate(a))
  }

  /// Text of the nodes that label this one, joined with spaces.
  fn displayed_label(&self) -> String {
    self
      .labels_or_empty()
      .iter()
      .map(|label| {
        let name = label.name_or_empty();
        if name.trim().is_empty() {
          label.all_text_or_empty()
        } else {
          name
        }
      })
      .map(|text| text.trim().to_owned())
      .filter(|text| !text.is_empty())
      .collect::<Vec<_>>()
      .join(" ")
  }

  /// Text a node visibly paints: its text content, else its name.
  fn displayed_text(&self) -> String {
    let text = self.all_text_or_empty();
    if text.trim().is_empty() {
      self.name_or_empty()
    } else {
      text
    }
  }
}

impl<N: Accessible> NodeExt for N {}
