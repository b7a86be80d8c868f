/*!
In-memory accessibility tree for tests.

Nodes live in an arena shared behind an `Arc`. Any node can be killed, made
to fail every query, or slowed down, to exercise the engine's tolerance of
misbehaving providers.
*/

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::a11y::{RangeValue, Role, State, StateSet};
use crate::provider::Accessible;
use crate::types::{Bounds, LecternError, LecternResult, TextLine, TextRange};

#[derive(Debug, Default)]
struct MockData {
  role: Role,
  name: String,
  description: String,
  attributes: HashMap<String, String>,
  states: StateSet,
  bounds: Option<Bounds>,
  parent: Option<usize>,
  children: Vec<usize>,
  actions: Vec<String>,
  labels: Vec<usize>,
  value: Option<RangeValue>,
  image_description: String,
  text: String,
  caret: Option<u32>,
  row_headers: Vec<usize>,
  column_headers: Vec<usize>,
  table_size: Option<(u32, u32)>,
  dead: bool,
  failing: bool,
  delay: Option<Duration>,
}

#[derive(Debug, Default)]
struct Arena {
  nodes: RwLock<Vec<MockData>>,
  queries: AtomicUsize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockTree {
  arena: Arc<Arena>,
}

impl MockTree {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  /// A showing, visible node with the given role and name.
  pub(crate) fn node(&self, role: Role, name: &str) -> MockNode {
    let mut nodes = self.arena.nodes.write();
    nodes.push(MockData {
      role,
      name: name.to_owned(),
      states: StateSet::from([State::Showing, State::Visible]),
      ..MockData::default()
    });
    MockNode {
      arena: Arc::clone(&self.arena),
      id: nodes.len() - 1,
    }
  }

  /// Total provider queries answered so far.
  pub(crate) fn query_count(&self) -> usize {
    self.arena.queries.load(Ordering::SeqCst)
  }
}

/// Route `log` output through the test harness. Set `RUST_LOG` to see it.
pub(crate) fn init_logging() {
  env_logger::builder().is_test(true).try_init().ok();
}

#[derive(Clone)]
pub(crate) struct MockNode {
  arena: Arc<Arena>,
  id: usize,
}

impl std::fmt::Debug for MockNode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "MockNode({})", self.id)
  }
}

impl PartialEq for MockNode {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id && Arc::ptr_eq(&self.arena, &other.arena)
  }
}

impl Eq for MockNode {}

impl std::hash::Hash for MockNode {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl MockNode {
  fn sibling(&self, id: usize) -> Self {
    Self {
      arena: Arc::clone(&self.arena),
      id,
    }
  }

  fn edit(&self, f: impl FnOnce(&mut MockData)) -> &Self {
    if let Some(data) = self.arena.nodes.write().get_mut(self.id) {
      f(data);
    }
    self
  }

  fn read<T>(&self, query: &'static str, f: impl FnOnce(&MockData) -> T) -> LecternResult<T> {
    self.arena.queries.fetch_add(1, Ordering::SeqCst);
    let delay = self.arena.nodes.read().get(self.id).and_then(|d| d.delay);
    if let Some(delay) = delay {
      std::thread::sleep(delay);
    }
    let nodes = self.arena.nodes.read();
    let data = nodes.get(self.id).ok_or(LecternError::DeadNode)?;
    if data.dead {
      return Err(LecternError::DeadNode);
    }
    if data.failing {
      return Err(LecternError::provider(query, "mock failure"));
    }
    Ok(f(data))
  }

  fn siblings(&self, ids: &[usize]) -> Vec<Self> {
    ids.iter().map(|&id| self.sibling(id)).collect()
  }

  pub(crate) fn append(&self, child: &MockNode) -> &Self {
    child.edit(|c| c.parent = Some(self.id));
    self.edit(|d| d.children.push(child.id))
  }

  pub(crate) fn set_name(&self, name: &str) -> &Self {
    self.edit(|d| d.name = name.to_owned())
  }

  pub(crate) fn set_description(&self, description: &str) -> &Self {
    self.edit(|d| d.description = description.to_owned())
  }

  pub(crate) fn set_attribute(&self, key: &str, value: &str) -> &Self {
    self.edit(|d| {
      d.attributes.insert(key.to_owned(), value.to_owned());
    })
  }

  pub(crate) fn add_state(&self, state: State) -> &Self {
    self.edit(|d| {
      d.states.insert(state);
    })
  }

  pub(crate) fn remove_state(&self, state: State) -> &Self {
    self.edit(|d| {
      d.states.remove(state);
    })
  }

  pub(crate) fn set_bounds(&self, bounds: Bounds) -> &Self {
    self.edit(|d| d.bounds = Some(bounds))
  }

  pub(crate) fn add_action(&self, action: &str) -> &Self {
    self.edit(|d| d.actions.push(action.to_owned()))
  }

  pub(crate) fn add_label(&self, label: &MockNode) -> &Self {
    self.edit(|d| d.labels.push(label.id))
  }

  pub(crate) fn set_value(&self, value: RangeValue) -> &Self {
    self.edit(|d| d.value = Some(value))
  }

  pub(crate) fn set_image_description(&self, description: &str) -> &Self {
    self.edit(|d| d.image_description = description.to_owned())
  }

  pub(crate) fn set_text(&self, text: &str) -> &Self {
    self.edit(|d| d.text = text.to_owned())
  }

  pub(crate) fn set_caret(&self, offset: u32) -> &Self {
    self.edit(|d| d.caret = Some(offset))
  }

  pub(crate) fn add_row_header(&self, header: &MockNode) -> &Self {
    self.edit(|d| d.row_headers.push(header.id))
  }

  pub(crate) fn add_column_header(&self, header: &MockNode) -> &Self {
    self.edit(|d| d.column_headers.push(header.id))
  }

  pub(crate) fn set_table_size(&self, rows: u32, columns: u32) -> &Self {
    self.edit(|d| d.table_size = Some((rows, columns)))
  }

  /// Tear the node down: it becomes invalid and every query fails.
  pub(crate) fn kill(&self) -> &Self {
    self.edit(|d| d.dead = true)
  }

  pub(crate) fn set_failing(&self, failing: bool) -> &Self {
    self.edit(|d| d.failing = failing)
  }

  /// Sleep before answering each query.
  pub(crate) fn set_delay(&self, delay: Duration) -> &Self {
    self.edit(|d| d.delay = Some(delay))
  }
}

fn chars(text: &str, range: TextRange) -> String {
  text
    .chars()
    .skip(range.start as usize)
    .take(range.len() as usize)
    .collect()
}

impl Accessible for MockNode {
  fn is_valid(&self) -> bool {
    self
      .arena
      .nodes
      .read()
      .get(self.id)
      .is_some_and(|d| !d.dead)
  }

  fn role(&self) -> LecternResult<Role> {
    self.read("role", |d| d.role)
  }

  fn name(&self) -> LecternResult<String> {
    self.read("name", |d| d.name.clone())
  }

  fn description(&self) -> LecternResult<String> {
    self.read("description", |d| d.description.clone())
  }

  fn attributes(&self) -> LecternResult<HashMap<String, String>> {
    self.read("attributes", |d| d.attributes.clone())
  }

  fn states(&self) -> LecternResult<StateSet> {
    self.read("states", |d| d.states.clone())
  }

  fn bounds(&self) -> LecternResult<Option<Bounds>> {
    self.read("bounds", |d| d.bounds)
  }

  fn parent(&self) -> LecternResult<Option<Self>> {
    let parent = self.read("parent", |d| d.parent)?;
    Ok(parent.map(|id| self.sibling(id)))
  }

  fn children(&self) -> LecternResult<Vec<Self>> {
    let ids = self.read("children", |d| d.children.clone())?;
    Ok(self.siblings(&ids))
  }

  fn actions(&self) -> LecternResult<Vec<String>> {
    self.read("actions", |d| d.actions.clone())
  }

  fn labels(&self) -> LecternResult<Vec<Self>> {
    let ids = self.read("labels", |d| d.labels.clone())?;
    Ok(self.siblings(&ids))
  }

  fn value(&self) -> LecternResult<Option<RangeValue>> {
    self.read("value", |d| d.value.clone())
  }

  fn image_description(&self) -> LecternResult<String> {
    self.read("image_description", |d| d.image_description.clone())
  }

  #[allow(clippy::cast_possible_truncation)]
  fn character_count(&self) -> LecternResult<u32> {
    self.read("character_count", |d| d.text.chars().count() as u32)
  }

  fn substring(&self, range: TextRange) -> LecternResult<String> {
    self.read("substring", |d| chars(&d.text, range))
  }

  fn caret_offset(&self) -> LecternResult<Option<u32>> {
    self.read("caret_offset", |d| d.caret)
  }

  #[allow(clippy::cast_possible_truncation)]
  fn line_at(&self, offset: u32) -> LecternResult<Option<TextLine>> {
    self.read("line_at", |d| {
      let mut start = 0u32;
      for line in d.text.split('\n') {
        let end = start + line.chars().count() as u32;
        if offset <= end {
          return Some(TextLine {
            text: line.to_owned(),
            range: TextRange::new(start, end),
          });
        }
        start = end + 1;
      }
      None
    })
  }

  fn row_headers(&self) -> LecternResult<Vec<Self>> {
    let ids = self.read("row_headers", |d| d.row_headers.clone())?;
    Ok(self.siblings(&ids))
  }

  fn column_headers(&self) -> LecternResult<Vec<Self>> {
    let ids = self.read("column_headers", |d| d.column_headers.clone())?;
    Ok(self.siblings(&ids))
  }

  fn table_size(&self) -> LecternResult<Option<(u32, u32)>> {
    self
      .read("table_size", |d| d.table_size)?
      .map(Some)
      .ok_or_else(|| LecternError::NotSupported("table".into()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::provider::NodeExt;

  #[test]
  fn parent_child_links() {
    let tree = MockTree::new();
    let list = tree.node(Role::List, "Fruit");
    let item = tree.node(Role::ListItem, "Apple");
    list.append(&item);
    assert_eq!(item.parent_or_none(), Some(list.clone()));
    assert_eq!(list.children_or_empty(), vec![item]);
  }

  #[test]
  fn killed_node_defaults() {
    let tree = MockTree::new();
    let button = tree.node(Role::PushButton, "OK");
    button.kill();
    assert!(!button.is_valid());
    assert_eq!(button.name_or_empty(), "");
    assert_eq!(button.role_or_unknown(), Role::Unknown);
  }

  #[test]
  fn failing_node_defaults_but_stays_valid() {
    let tree = MockTree::new();
    let label = tree.node(Role::Label, "Name");
    label.set_failing(true);
    assert!(label.is_valid());
    assert!(label.name().is_err());
    assert_eq!(label.name_or_empty(), "");
  }

  #[test]
  fn line_at_finds_line() {
    let tree = MockTree::new();
    let text = tree.node(Role::Text, "");
    text.set_text("first\nsecond line");
    let line = text.line_at_or_none(8).unwrap();
    assert_eq!(line.text, "second line");
    assert_eq!(line.range, TextRange::new(6, 17));
  }

  #[test]
  fn ancestors_nearest_first() {
    let tree = MockTree::new();
    let frame = tree.node(Role::Frame, "App");
    let panel = tree.node(Role::Panel, "");
    let button = tree.node(Role::PushButton, "OK");
    frame.append(&panel);
    panel.append(&button);
    assert_eq!(button.ancestors(), vec![panel, frame]);
  }

  #[test]
  fn unsupported_interface() {
    let tree = MockTree::new();
    let panel = tree.node(Role::Panel, "");
    assert!(matches!(panel.table_size(), Err(LecternError::NotSupported(_))));
    assert_eq!(panel.table_size_or_none(), None);

    let table = tree.node(Role::Table, "");
    table.set_table_size(2, 3);
    assert_eq!(table.table_size_or_none(), Some((2, 3)));
  }
}
