/*!
Role-dispatch presentation generator.

```ignore
use lectern::{Generator, Mode, PresentationOptions};

let speech = Generator::<MyNode>::new(Mode::Speech);
let units = speech.generate(&node, &PresentationOptions::focused());
```

A generation walks through the phases of [`GenerationPhase`]: the node's
functional role is resolved, the mode's dispatch table picks a handler, the
handler composes sub-generators, and progress-bar updates are recorded with
the throttle.
*/

mod handlers;
mod options;
mod parts;
mod role_resolve;
mod strings;
mod unit;

pub use options::{FormatType, PresentationOptions};
pub use role_resolve::functional_role;
pub use unit::{render, Hz, Presentation, PresentationUnit, Tone, MAX_TONE_FREQUENCY};

use derive_more::Display;
use parking_lot::{Mutex, MutexGuard};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::a11y::Role;
use crate::cache::{Cache, CacheTable, EvictionTask};
use crate::config::{GeneratorBuilder, GeneratorConfig, Mode};
use crate::discovery::OnScreenFinder;
use crate::progress::ProgressTracker;
use crate::provider::Accessible;
use crate::types::Bounds;

/// Where a generation currently is. Logged at trace level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GenerationPhase {
  #[display("idle")]
  Idle,
  #[display("resolving role")]
  ResolvingRole,
  #[display("dispatching")]
  Dispatching,
  #[display("composing")]
  Composing,
  #[display("recording progress")]
  RecordingProgress,
  #[display("done")]
  Done,
}

/// One generation: the node, the role it is presented as, and the caller's
/// options.
#[derive(Debug)]
pub(crate) struct Request<'a, N> {
  pub(crate) node: &'a N,
  pub(crate) role: Role,
  pub(crate) options: &'a PresentationOptions<N>,
}

/// Handlers and sub-generators share this shape.
pub(crate) type Handler<N> = fn(&Generator<N>, &Request<'_, N>) -> Presentation;

/// Computes presentations for one output mode.
///
/// Owns its caches, progress records and discovery workers. Sweep threads
/// stop when the generator is dropped.
pub struct Generator<N: Accessible> {
  config: GeneratorConfig,
  handlers: HashMap<Role, Handler<N>>,
  fallback: Handler<N>,
  /// Per-generation results, flushed every `results_sweep`.
  results: Arc<Cache<N>>,
  /// Coarse facts about tree shape, flushed every `facts_sweep`.
  facts: Arc<Cache<N>>,
  sweeps: Vec<EvictionTask>,
  progress: Mutex<ProgressTracker<N>>,
  finder: OnScreenFinder<N>,
}

impl<N: Accessible> std::fmt::Debug for Generator<N> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Generator")
      .field("mode", &self.config.mode)
      .field("handlers", &self.handlers.len())
      .field("results", &self.results)
      .field("facts", &self.facts)
      .field("sweeps", &self.sweeps.len())
      .finish_non_exhaustive()
  }
}

impl GeneratorBuilder {
  /// Build the generator. Periodic sweeps start here unless disabled.
  pub fn build<N: Accessible>(self) -> Generator<N> {
    Generator::with_config(self.config)
  }
}

impl<N: Accessible> Generator<N> {
  /// A generator with the mode's default configuration.
  pub fn new(mode: Mode) -> Self {
    Self::builder(mode).build()
  }

  /// Same as [`GeneratorBuilder::new`]. Name the node type when calling it,
  /// as in `Generator::<MyNode>::builder(mode)`.
  pub const fn builder(mode: Mode) -> GeneratorBuilder {
    GeneratorBuilder::new(mode)
  }

  fn with_config(config: GeneratorConfig) -> Self {
    let config = config.sanitized();
    let (handlers, fallback) = handlers::table::<N>(config.mode);
    let results = Arc::new(Cache::new(results_cache_name(config.mode)));
    let facts = Arc::new(Cache::new(facts_cache_name(config.mode)));

    let sweeps = if config.auto_sweep {
      vec![
        EvictionTask::start(Arc::clone(&results), config.results_sweep),
        EvictionTask::start(Arc::clone(&facts), config.facts_sweep),
      ]
    } else {
      Vec::new()
    };

    log::debug!(
      "{} generator ready with {} role handlers",
      config.mode,
      handlers.len()
    );

    Self {
      config,
      handlers,
      fallback,
      results,
      facts,
      sweeps,
      progress: Mutex::new(ProgressTracker::new(config.progress_interval)),
      finder: OnScreenFinder::new(),
    }
  }

  pub const fn config(&self) -> &GeneratorConfig {
    &self.config
  }

  pub const fn mode(&self) -> Mode {
    self.config.mode
  }

  /// The ordered presentation of `node`.
  ///
  /// Provider failures are logged and yield less output, never an error.
  /// Within a cache epoch the same input gives the same output.
  pub fn generate(&self, node: &N, options: &PresentationOptions<N>) -> Presentation {
    let started = Instant::now();
    self.enter(GenerationPhase::ResolvingRole, node);
    let role = options.role.unwrap_or_else(|| functional_role(node));

    self.enter(GenerationPhase::Dispatching, node);
    let handler = if let Some(handler) = self.handlers.get(&role) {
      *handler
    } else {
      log::debug!("No {} handler for {role:?}, using the default", self.config.mode);
      self.fallback
    };

    self.enter(GenerationPhase::Composing, node);
    let request = Request { node, role, options };
    let units: Presentation = handler(self, &request)
      .into_iter()
      .filter(|u| !u.is_empty() || *u == PresentationUnit::SpaceIfPreceded)
      .collect();
    let result = match self.config.mode {
      Mode::Braille => join_segments(units),
      Mode::Speech | Mode::Sound => units,
    };

    if options.is_progress_bar_update && result.first().is_some_and(|u| !u.is_empty()) {
      self.enter(GenerationPhase::RecordingProgress, node);
      self.progress.lock().record_update(node);
    }

    self.enter(GenerationPhase::Done, node);
    log::debug!(
      "Generated {} {} unit(s) for {node:?} as {role:?} in {:?}",
      result.len(),
      self.config.mode,
      started.elapsed()
    );
    result
  }

  fn enter(&self, phase: GenerationPhase, node: &N) {
    log::trace!("{} generation of {node:?}: {phase}", self.config.mode);
  }

  /// Run one sub-generator, logging its output size and duration.
  pub(crate) fn part(
    &self,
    name: &'static str,
    request: &Request<'_, N>,
    part: Handler<N>,
  ) -> Presentation {
    let started = Instant::now();
    let units = part(self, request);
    log::trace!(
      "{name} for {:?}: {} unit(s) in {:?}",
      request.node,
      units.len(),
      started.elapsed()
    );
    units
  }

  /// Concatenate named sub-generators in order.
  pub(crate) fn compose(
    &self,
    request: &Request<'_, N>,
    parts: &[(&'static str, Handler<N>)],
  ) -> Presentation {
    parts
      .iter()
      .flat_map(|(name, part)| self.part(name, request, *part))
      .collect()
  }

  /// Flush both caches. The only way cached results are invalidated
  /// besides the periodic sweeps.
  pub fn clear_caches(&self, reason: &str) {
    self.results.clear_all(reason);
    self.facts.clear_all(reason);
  }

  pub fn results_cache(&self) -> &Cache<N> {
    &self.results
  }

  pub fn facts_cache(&self) -> &Cache<N> {
    &self.facts
  }

  fn cache_for(&self, table: CacheTable) -> &Cache<N> {
    match table {
      CacheTable::NestingLevel | CacheTable::TreeItemLevel | CacheTable::LayoutOnly => &self.facts,
      CacheTable::Description
      | CacheTable::ImageDescription
      | CacheTable::NamelessToggle
      | CacheTable::StaticText
      | CacheTable::Substring
      | CacheTable::LineText
      | CacheTable::FullText
      | CacheTable::ExpandedEmbeddedText
      | CacheTable::Descendants
      | CacheTable::UsedDescriptionAsName
      | CacheTable::UsedDescriptionAsStaticText => &self.results,
    }
  }

  /// Progress-bar records. Hold the guard briefly.
  pub fn progress(&self) -> MutexGuard<'_, ProgressTracker<N>> {
    self.progress.lock()
  }

  /// On-screen presentable nodes under `root`, bounded by the configured
  /// discovery timeout.
  pub fn discover(&self, root: &N, clip: Option<Bounds>) -> Vec<N> {
    self.finder.discover(root, clip, self.config.discovery_timeout)
  }
}

const fn results_cache_name(mode: Mode) -> &'static str {
  match mode {
    Mode::Braille => "braille-results",
    Mode::Speech => "speech-results",
    Mode::Sound => "sound-results",
  }
}

const fn facts_cache_name(mode: Mode) -> &'static str {
  match mode {
    Mode::Braille => "braille-facts",
    Mode::Speech => "speech-facts",
    Mode::Sound => "sound-facts",
  }
}

/// Separate braille segments with [`PresentationUnit::SpaceIfPreceded`].
fn join_segments(units: Presentation) -> Presentation {
  let mut out: Presentation = Vec::with_capacity(units.len() * 2);
  for unit in units {
    let previous_is_separator = matches!(
      out.last(),
      None | Some(PresentationUnit::SpaceIfPreceded | PresentationUnit::Delimiter(_))
    );
    match unit {
      PresentationUnit::SpaceIfPreceded => {
        if !previous_is_separator {
          out.push(unit);
        }
      }
      PresentationUnit::Delimiter(_) | PresentationUnit::Tone(_) => out.push(unit),
      PresentationUnit::Text(_) | PresentationUnit::Role(_) | PresentationUnit::Indicator(_) => {
        if !previous_is_separator {
          out.push(PresentationUnit::SpaceIfPreceded);
        }
        out.push(unit);
      }
    }
  }
  if out.last() == Some(&PresentationUnit::SpaceIfPreceded) {
    out.pop();
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::a11y::{RangeValue, State};
  use crate::progress::ProgressVerbosity;
  use crate::testing::{init_logging, MockNode, MockTree};
  use std::time::Duration;

  fn generator(mode: Mode) -> Generator<MockNode> {
    init_logging();
    GeneratorBuilder::new(mode).auto_sweep(false).build()
  }

  fn text(s: &str) -> PresentationUnit {
    PresentationUnit::Text(s.into())
  }

  fn role(s: &str) -> PresentationUnit {
    PresentationUnit::Role(s.into())
  }

  fn indicator(s: &str) -> PresentationUnit {
    PresentationUnit::Indicator(s.into())
  }

  fn check_box(tree: &MockTree) -> MockNode {
    let node = tree.node(Role::CheckBox, "Accept terms");
    node.set_description("Accept terms").add_state(State::Focusable);
    node
  }

  #[test]
  fn builder_from_generator_type() {
    let braille: Generator<MockNode> = Generator::<MockNode>::builder(Mode::Braille)
      .auto_sweep(false)
      .build();
    assert_eq!(braille.mode(), Mode::Braille);
    assert!(format!("{:?}", braille.results_cache()).contains("braille-results"));
  }

  mod composition {
    use super::*;

    #[test]
    fn check_box_speech() {
      let tree = MockTree::new();
      let node = check_box(&tree);
      let units = generator(Mode::Speech).generate(&node, &PresentationOptions::new());
      assert_eq!(
        units,
        vec![text("Accept terms"), role("check box"), indicator("not checked")]
      );
    }

    #[test]
    fn check_box_braille_focused() {
      let tree = MockTree::new();
      let node = check_box(&tree);
      let units = generator(Mode::Braille).generate(&node, &PresentationOptions::focused());
      assert_eq!(
        units,
        vec![
          text("Accept terms"),
          PresentationUnit::SpaceIfPreceded,
          role("chk"),
          PresentationUnit::SpaceIfPreceded,
          indicator("< >"),
        ]
      );
      assert_eq!(render(&units), "Accept terms chk < >");

      node.add_state(State::Checked);
      let checked = generator(Mode::Braille);
      assert_eq!(
        render(&checked.generate(&node, &PresentationOptions::focused())),
        "Accept terms chk <x>"
      );
    }

    #[test]
    fn role_override() {
      let tree = MockTree::new();
      let node = check_box(&tree);
      let options = PresentationOptions::new().role(Role::PushButton);
      let units = generator(Mode::Speech).generate(&node, &options);
      assert_eq!(units, vec![text("Accept terms"), role("button")]);
    }

    #[test]
    fn label_and_distinct_name() {
      let tree = MockTree::new();
      let entry = tree.node(Role::Entry, "");
      let label = tree.node(Role::Label, "Email");
      entry.add_label(&label).set_text("me@example.com");
      let options = PresentationOptions::focused();
      let units = generator(Mode::Speech).generate(&entry, &options);
      assert_eq!(units, vec![text("Email"), role("text"), text("me@example.com")]);
    }

    #[test]
    fn description_used_as_name_is_not_repeated() {
      let tree = MockTree::new();
      let button = tree.node(Role::PushButton, "");
      button.set_description("Close window");
      let units = generator(Mode::Speech).generate(&button, &PresentationOptions::new());
      assert_eq!(units, vec![text("Close window"), role("button")]);
    }

    #[test]
    fn distinct_description_follows() {
      let tree = MockTree::new();
      let button = tree.node(Role::PushButton, "Save");
      button.set_description("Writes the file to disk");
      let speech = generator(Mode::Speech);
      let units = speech.generate(&button, &PresentationOptions::new());
      assert_eq!(
        units,
        vec![text("Save"), role("button"), text("Writes the file to disk")]
      );

      let brief: Generator<MockNode> = GeneratorBuilder::new(Mode::Speech)
        .verbosity(crate::config::Verbosity::Brief)
        .auto_sweep(false)
        .build();
      let units = brief.generate(&button, &PresentationOptions::new());
      assert_eq!(units, vec![text("Save"), role("button")]);
    }

    #[test]
    fn heading_level() {
      let tree = MockTree::new();
      let heading = tree.node(Role::Heading, "Intro");
      heading.set_attribute("level", "2");
      let options = PresentationOptions::new();
      assert_eq!(
        generator(Mode::Speech).generate(&heading, &options),
        vec![text("Intro"), role("heading level 2")]
      );
      assert_eq!(
        render(&generator(Mode::Braille).generate(&heading, &options)),
        "Intro h2"
      );
    }

    #[test]
    fn anchor_has_no_role_name() {
      let tree = MockTree::new();
      let anchor = tree.node(Role::Link, "top");
      let units = generator(Mode::Speech).generate(&anchor, &PresentationOptions::new());
      assert_eq!(units, vec![text("top")]);
    }

    #[test]
    fn embedded_objects_are_expanded() {
      let tree = MockTree::new();
      let para = tree.node(Role::Paragraph, "");
      para.set_text("See \u{fffc} now");
      let link = tree.node(Role::Link, "docs");
      link.add_state(State::Focusable);
      para.append(&link);
      let units = generator(Mode::Speech).generate(&para, &PresentationOptions::new());
      assert_eq!(units, vec![text("See docs now")]);
    }

    #[test]
    fn embedded_cycle_falls_back_to_name() {
      let tree = MockTree::new();
      let para = tree.node(Role::Paragraph, "");
      para.set_text("See \u{fffc} now");
      let quote = tree.node(Role::Section, "");
      quote.set_text("said \u{fffc}");
      para.append(&quote);
      quote.append(&para);
      let units = generator(Mode::Speech).generate(&para, &PresentationOptions::new());
      assert_eq!(units, vec![text("See said now")]);
    }

    #[test]
    fn text_range() {
      let tree = MockTree::new();
      let para = tree.node(Role::Paragraph, "");
      para.set_text("Hello brave new world");
      let options = PresentationOptions::new().range(6, 11);
      let units = generator(Mode::Speech).generate(&para, &options);
      assert_eq!(units, vec![text("brave")]);
    }

    #[test]
    fn unknown_role_uses_default_handler() {
      let tree = MockTree::new();
      let node = tree.node(Role::Unknown, "Thing");
      let units = generator(Mode::Speech).generate(&node, &PresentationOptions::new());
      assert_eq!(units, vec![text("Thing")]);
    }

    #[test]
    fn dead_node_yields_nothing() {
      let tree = MockTree::new();
      let node = check_box(&tree);
      node.kill();
      assert!(generator(Mode::Speech)
        .generate(&node, &PresentationOptions::new())
        .is_empty());
    }

    #[test]
    fn failing_provider_yields_nothing() {
      let tree = MockTree::new();
      let node = check_box(&tree);
      node.set_failing(true);
      assert!(generator(Mode::Braille)
        .generate(&node, &PresentationOptions::new())
        .is_empty());
    }

    #[test]
    fn sound_cues() {
      let tree = MockTree::new();
      let node = check_box(&tree);
      node.add_state(State::Checked);
      let units = generator(Mode::Sound).generate(&node, &PresentationOptions::new());
      assert_eq!(units, vec![role("check box"), indicator("checked")]);
    }
  }

  mod context {
    use super::*;

    fn window(tree: &MockTree) -> (MockNode, MockNode, MockNode) {
      let frame = tree.node(Role::Frame, "Editor");
      let panel = tree.node(Role::Panel, "");
      let save = tree.node(Role::PushButton, "Save");
      let cancel = tree.node(Role::PushButton, "Cancel");
      frame.append(&panel);
      panel.append(&save).append(&cancel);
      (frame, save, cancel)
    }

    #[test]
    fn focus_from_nowhere_presents_ancestors() {
      let tree = MockTree::new();
      let (_, save, _) = window(&tree);
      let units = generator(Mode::Speech).generate(&save, &PresentationOptions::focused());
      assert_eq!(
        units,
        vec![text("Editor"), role("frame"), text("Save"), role("button")]
      );
    }

    #[test]
    fn shared_ancestors_are_skipped() {
      let tree = MockTree::new();
      let (_, save, cancel) = window(&tree);
      let options = PresentationOptions::focused().prior(cancel);
      let units = generator(Mode::Speech).generate(&save, &options);
      assert_eq!(units, vec![text("Save"), role("button")]);
    }

    #[test]
    fn context_can_be_disabled() {
      let tree = MockTree::new();
      let (_, save, _) = window(&tree);
      let options = PresentationOptions::focused().without_context();
      let units = generator(Mode::Speech).generate(&save, &options);
      assert_eq!(units, vec![text("Save"), role("button")]);
    }

    #[test]
    fn dialog_presents_unrelated_labels() {
      let tree = MockTree::new();
      let dialog = tree.node(Role::Dialog, "Confirm");
      let message = tree.node(Role::Label, "Delete 3 files?");
      let ok = tree.node(Role::PushButton, "OK");
      dialog.append(&message).append(&ok);
      let units = generator(Mode::Speech).generate(&dialog, &PresentationOptions::new());
      assert_eq!(
        units,
        vec![text("Confirm"), role("dialog"), text("Delete 3 files?")]
      );
    }

    #[test]
    fn where_am_i_position() {
      let tree = MockTree::new();
      let list = tree.node(Role::List, "Fruit");
      let items: Vec<MockNode> = ["Apple", "Pear", "Plum"]
        .iter()
        .map(|name| tree.node(Role::ListItem, name))
        .collect();
      for item in &items {
        list.append(item);
      }
      let options = PresentationOptions::new().format(FormatType::WhereAmIBrief);
      let units = generator(Mode::Speech).generate(&items[1], &options);
      assert_eq!(units, vec![text("Pear"), text("2 of 3")]);
    }

    #[test]
    fn nested_list_level() {
      let tree = MockTree::new();
      let outer = tree.node(Role::List, "");
      let parent_item = tree.node(Role::ListItem, "");
      let inner = tree.node(Role::List, "");
      let item = tree.node(Role::ListItem, "Child");
      outer.append(&parent_item);
      parent_item.append(&inner);
      inner.append(&item);
      let units = generator(Mode::Speech).generate(&item, &PresentationOptions::new());
      assert_eq!(units, vec![text("Child"), text("nesting level 1")]);
    }

    #[test]
    fn tree_level_only_when_changed() {
      let tree = MockTree::new();
      let root = tree.node(Role::Tree, "");
      let a = tree.node(Role::TreeItem, "a");
      let b = tree.node(Role::TreeItem, "b");
      let a1 = tree.node(Role::TreeItem, "a1");
      root.append(&a).append(&b);
      a.append(&a1);
      let speech = generator(Mode::Speech);

      let options = PresentationOptions::new().prior(b.clone());
      assert_eq!(speech.generate(&a, &options), vec![text("a")]);

      let options = PresentationOptions::new().prior(a.clone());
      assert_eq!(
        speech.generate(&a1, &options),
        vec![text("a1"), text("tree level 2")]
      );
    }
  }

  mod tables {
    use super::*;

    #[test]
    fn headers_are_presented_once() {
      let tree = MockTree::new();
      let age = tree.node(Role::ColumnHeader, "Age");
      let cell = tree.node(Role::TableCell, "42");
      let previous = tree.node(Role::TableCell, "37");
      cell.add_column_header(&age);
      previous.add_column_header(&age);
      let speech = generator(Mode::Speech);

      let units = speech.generate(&cell, &PresentationOptions::focused());
      assert_eq!(units, vec![text("Age"), text("42")]);

      let options = PresentationOptions::focused().prior(previous).new_only();
      assert_eq!(speech.generate(&cell, &options), vec![text("42")]);
    }

    #[test]
    fn reading_row() {
      let tree = MockTree::new();
      let row = tree.node(Role::TableRow, "");
      let name = tree.node(Role::TableCell, "Alice");
      let age = tree.node(Role::TableCell, "30");
      row.append(&name).append(&age);
      let options = PresentationOptions::new().reading_row();
      let units = generator(Mode::Speech).generate(&age, &options);
      assert_eq!(
        units,
        vec![text("Alice"), PresentationUnit::Delimiter(",".into()), text("30")]
      );
    }

    #[test]
    fn nameless_toggle_named_by_header() {
      let tree = MockTree::new();
      let done = tree.node(Role::ColumnHeader, "Done");
      let cell = tree.node(Role::TableCell, "");
      let toggle = tree.node(Role::CheckBox, "");
      toggle.add_state(State::Checked);
      cell.add_column_header(&done).append(&toggle);
      let units = generator(Mode::Speech).generate(&cell, &PresentationOptions::new());
      assert_eq!(units, vec![text("Done"), indicator("checked")]);
    }

    #[test]
    fn table_size_and_sort_order() {
      let tree = MockTree::new();
      let table = tree.node(Role::Table, "Scores");
      table.set_table_size(3, 2);
      let speech = generator(Mode::Speech);
      assert_eq!(
        speech.generate(&table, &PresentationOptions::new()),
        vec![text("Scores"), role("table"), text("with 3 rows 2 columns")]
      );

      let header = tree.node(Role::ColumnHeader, "Points");
      header.set_attribute("sort", "descending");
      assert_eq!(
        speech.generate(&header, &PresentationOptions::new()),
        vec![text("Points"), role("column header"), text("sorted descending")]
      );
    }
  }

  mod caching {
    use super::*;

    #[test]
    fn generation_is_idempotent() {
      let tree = MockTree::new();
      let (node, options) = (check_box(&tree), PresentationOptions::focused());
      let speech = generator(Mode::Speech);
      let first = speech.generate(&node, &options);
      let second = speech.generate(&node, &options);
      assert_eq!(first, second);
      assert!(!speech.results_cache().is_empty());
    }

    #[test]
    fn results_survive_until_flush() {
      let tree = MockTree::new();
      let button = tree.node(Role::PushButton, "Save");
      button.set_description("Writes the file");
      let speech = generator(Mode::Speech);
      let options = PresentationOptions::new();

      let before = speech.generate(&button, &options);
      button.set_description("Discards all changes");
      assert_eq!(speech.generate(&button, &options), before);

      speech.clear_caches("focus changed");
      assert_eq!(
        speech.generate(&button, &options),
        vec![text("Save"), role("button"), text("Discards all changes")]
      );
    }

    #[test]
    fn flush_forces_recomputation() {
      let tree = MockTree::new();
      let label = tree.node(Role::Label, "Status: idle");
      let speech = generator(Mode::Speech);
      let options = PresentationOptions::new();

      let start = tree.query_count();
      speech.generate(&label, &options);
      let first = tree.query_count() - start;

      let start = tree.query_count();
      speech.generate(&label, &options);
      let second = tree.query_count() - start;
      assert!(second < first, "cached: {second}, uncached: {first}");

      speech.clear_caches("test");
      let start = tree.query_count();
      speech.generate(&label, &options);
      assert_eq!(tree.query_count() - start, first);
    }

    #[test]
    fn periodic_sweep_runs() {
      let generator: Generator<MockNode> = GeneratorBuilder::new(Mode::Speech)
        .results_sweep(Duration::from_millis(20))
        .build();
      let deadline = Instant::now() + Duration::from_secs(5);
      while generator.results_cache().epoch() == 0 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
      }
      assert!(generator.results_cache().epoch() >= 1);
    }
  }

  mod progress {
    use super::*;

    fn bar(tree: &MockTree, percent: f64) -> MockNode {
      let node = tree.node(Role::ProgressBar, "Download");
      node.set_value(RangeValue::new(percent, 0.0, 100.0));
      node
    }

    #[test]
    fn update_is_presented_and_recorded() {
      let tree = MockTree::new();
      let node = bar(&tree, 10.0);
      let speech = generator(Mode::Speech);
      let options = PresentationOptions::new().progress_update();

      assert_eq!(
        speech.generate(&node, &options),
        vec![text("Download"), text("10 percent"), role("progress bar")]
      );
      assert_eq!(speech.progress().len(), 1);

      // Same value, then a new value inside the interval.
      assert!(speech.generate(&node, &options).is_empty());
      node.set_value(RangeValue::new(20.0, 0.0, 100.0));
      assert!(speech.generate(&node, &options).is_empty());

      // Completion always gets through.
      node.set_value(RangeValue::new(100.0, 0.0, 100.0));
      assert!(!speech.generate(&node, &options).is_empty());
    }

    #[test]
    fn zero_interval_presents_every_change() {
      let tree = MockTree::new();
      let node = bar(&tree, 10.0);
      let speech: Generator<MockNode> = GeneratorBuilder::new(Mode::Speech)
        .progress_interval(Duration::ZERO)
        .auto_sweep(false)
        .build();
      let options = PresentationOptions::new().progress_update();
      assert!(!speech.generate(&node, &options).is_empty());
      node.set_value(RangeValue::new(20.0, 0.0, 100.0));
      assert!(!speech.generate(&node, &options).is_empty());
    }

    #[test]
    fn plain_generation_is_not_throttled() {
      let tree = MockTree::new();
      let node = bar(&tree, 40.0);
      let speech = generator(Mode::Speech);
      let options = PresentationOptions::new();
      assert!(!speech.generate(&node, &options).is_empty());
      assert!(!speech.generate(&node, &options).is_empty());
      assert!(speech.progress().is_empty());
    }

    #[test]
    fn updates_can_be_disabled() {
      let tree = MockTree::new();
      let node = bar(&tree, 10.0);
      let speech: Generator<MockNode> = GeneratorBuilder::new(Mode::Speech)
        .progress_updates(false)
        .auto_sweep(false)
        .build();
      let options = PresentationOptions::new().progress_update();
      assert!(speech.generate(&node, &options).is_empty());
      assert!(speech.progress().is_empty());
    }

    #[test]
    fn other_window_is_out_of_scope() {
      let tree = MockTree::new();
      let downloads = tree.node(Role::Frame, "Downloads");
      let editor = tree.node(Role::Frame, "Editor");
      let node = bar(&tree, 10.0);
      let entry = tree.node(Role::Entry, "Body");
      downloads.append(&node);
      editor.append(&entry);

      let speech: Generator<MockNode> = GeneratorBuilder::new(Mode::Speech)
        .progress_verbosity(ProgressVerbosity::Window)
        .auto_sweep(false)
        .build();
      let options = PresentationOptions::new().progress_update().prior(entry);
      assert!(speech.generate(&node, &options).is_empty());
    }

    #[test]
    fn index_only_when_another_bar_updated_last() {
      let tree = MockTree::new();
      let first = bar(&tree, 10.0);
      let second = tree.node(Role::ProgressBar, "Upload");
      second.set_value(RangeValue::new(50.0, 0.0, 100.0));
      let speech = generator(Mode::Speech);
      let options = PresentationOptions::new().progress_update();

      speech.generate(&first, &options);
      speech.generate(&second, &options);
      assert_eq!(speech.progress().most_recently_updated(), Some(second.clone()));

      second.set_value(RangeValue::new(100.0, 0.0, 100.0));
      assert_eq!(
        speech.generate(&second, &options),
        vec![text("Upload"), text("100 percent"), role("progress bar")]
      );

      first.set_value(RangeValue::new(100.0, 0.0, 100.0));
      assert_eq!(
        speech.generate(&first, &options),
        vec![
          text("Download"),
          text("100 percent"),
          role("progress bar"),
          text("1 of 2"),
        ]
      );
      assert_eq!(speech.progress().most_recently_updated(), Some(first));
    }

    #[test]
    fn sound_beeps() {
      let tree = MockTree::new();
      let node = bar(&tree, 50.0);
      let sound = generator(Mode::Sound);
      let units = sound.generate(&node, &PresentationOptions::new().progress_update());
      assert_eq!(units, vec![PresentationUnit::Tone(Tone::for_percent(50))]);
      assert_eq!(sound.progress().len(), 1);
    }
  }

  #[test]
  fn braille_segments_do_not_double_space() {
    let units = vec![
      text("a"),
      PresentationUnit::SpaceIfPreceded,
      text("b"),
      PresentationUnit::Delimiter("|".into()),
      text("c"),
      PresentationUnit::SpaceIfPreceded,
    ];
    assert_eq!(
      join_segments(units),
      vec![
        text("a"),
        PresentationUnit::SpaceIfPreceded,
        text("b"),
        PresentationUnit::Delimiter("|".into()),
        text("c"),
      ]
    );
  }
}
