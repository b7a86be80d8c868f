/*!
Memoization tables for generated presentation data.

A [`Cache`] holds several named tables keyed by node identity (plus an
optional character range). There is no per-entry expiry: the whole cache is
flushed by [`Cache::clear_all`], either explicitly or by an [`EvictionTask`]
sweeping on a fixed period. A cached value is therefore stale for at most
one sweep interval.

## Invariants

1. Entries are replaced whole or absent, never partially updated.
2. A value computed before a flush is never stored after it: the epoch is
   read before computing and re-checked under the write lock.
3. The lock is held only for the map operation, never while computing.
*/

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::types::TextRange;

/// Sweep interval for generation results.
pub const DEFAULT_RESULTS_SWEEP: Duration = Duration::from_secs(2);

/// Sweep interval for coarse derived facts (nesting level, layout-only).
pub const DEFAULT_FACTS_SWEEP: Duration = Duration::from_secs(60);

/// Named tables. Each concern gets its own so unrelated results never
/// collide on the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTable {
  /// Description text after redundancy filtering.
  Description,
  /// Image description after redundancy filtering.
  ImageDescription,
  /// Whether a toggle has no name of its own.
  NamelessToggle,
  /// List nesting depth.
  NestingLevel,
  /// Text of a static-text node.
  StaticText,
  /// Text inside a character range.
  Substring,
  /// Text of the line at the caret.
  LineText,
  /// All text of a node.
  FullText,
  /// Text with embedded-object characters replaced by the objects' text.
  ExpandedEmbeddedText,
  /// Zero-based depth of a tree item.
  TreeItemLevel,
  /// Presentable descendants found by on-screen discovery.
  Descendants,
  /// The description was already spoken as the name.
  UsedDescriptionAsName,
  /// The description was already spoken as static text.
  UsedDescriptionAsStaticText,
  /// The node only wraps other content.
  LayoutOnly,
}

/// Node identity, optionally scoped to a character range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey<N> {
  /// The node the value was computed for.
  pub node: N,
  /// Character range, for text queries.
  pub range: Option<TextRange>,
}

impl<N> CacheKey<N> {
  /// Key for a whole node.
  pub const fn node(node: N) -> Self {
    Self { node, range: None }
  }

  /// Key for a character range of a node.
  pub const fn range(node: N, range: TextRange) -> Self {
    Self {
      node,
      range: Some(range),
    }
  }
}

/// A cached result.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum CachedValue<N> {
  Text(String),
  Flag(bool),
  Level(i32),
  Nodes(Vec<N>),
}

#[allow(missing_docs)]
impl<N> CachedValue<N> {
  pub fn as_text(&self) -> Option<&str> {
    match self {
      Self::Text(s) => Some(s),
      Self::Flag(_) | Self::Level(_) | Self::Nodes(_) => None,
    }
  }

  pub const fn as_flag(&self) -> Option<bool> {
    match self {
      Self::Flag(b) => Some(*b),
      Self::Text(_) | Self::Level(_) | Self::Nodes(_) => None,
    }
  }

  pub const fn as_level(&self) -> Option<i32> {
    match self {
      Self::Level(l) => Some(*l),
      Self::Text(_) | Self::Flag(_) | Self::Nodes(_) => None,
    }
  }

  pub fn as_nodes(&self) -> Option<&[N]> {
    match self {
      Self::Nodes(n) => Some(n),
      Self::Text(_) | Self::Flag(_) | Self::Level(_) => None,
    }
  }
}

type Table<N> = HashMap<CacheKey<N>, CachedValue<N>>;

/// A set of memoization tables sharing one flush lock and epoch.
pub struct Cache<N> {
  name: &'static str,
  tables: RwLock<HashMap<CacheTable, Table<N>>>,
  epoch: AtomicU64,
}

impl<N> std::fmt::Debug for Cache<N> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Cache")
      .field("name", &self.name)
      .field("epoch", &self.epoch())
      .finish_non_exhaustive()
  }
}

impl<N> Cache<N> {
  /// An empty cache. `name` appears in log lines.
  pub fn new(name: &'static str) -> Self {
    Self {
      name,
      tables: RwLock::new(HashMap::new()),
      epoch: AtomicU64::new(0),
    }
  }

  /// Name given at construction.
  pub const fn name(&self) -> &'static str {
    self.name
  }

  /// Number of flushes so far.
  pub fn epoch(&self) -> u64 {
    self.epoch.load(Ordering::Acquire)
  }
}

impl<N: Clone + Eq + Hash> Cache<N> {
  /// The stored value, if any.
  pub fn get(&self, table: CacheTable, key: &CacheKey<N>) -> Option<CachedValue<N>> {
    self.tables.read().get(&table)?.get(key).cloned()
  }

  /// Store `value`, replacing any previous entry.
  pub fn put(&self, table: CacheTable, key: CacheKey<N>, value: CachedValue<N>) {
    self
      .tables
      .write()
      .entry(table)
      .or_default()
      .insert(key, value);
  }

  /// Store `value` only if no flush happened since `epoch`.
  fn put_in_epoch(&self, epoch: u64, table: CacheTable, key: CacheKey<N>, value: CachedValue<N>) {
    let mut tables = self.tables.write();
    if self.epoch() != epoch {
      log::trace!("{}: dropping {table:?} result computed before a flush", self.name);
      return;
    }
    tables.entry(table).or_default().insert(key, value);
  }

  /// Read-through lookup: return the cached value, or compute, store and
  /// return it. `compute` runs without the lock held.
  pub fn get_or_insert_with(
    &self,
    table: CacheTable,
    key: CacheKey<N>,
    compute: impl FnOnce() -> CachedValue<N>,
  ) -> CachedValue<N> {
    if let Some(value) = self.get(table, &key) {
      return value;
    }
    let epoch = self.epoch();
    let value = compute();
    self.put_in_epoch(epoch, table, key, value.clone());
    value
  }

  /// [`Cache::get_or_insert_with`] for text values.
  pub fn text_or_insert_with(
    &self,
    table: CacheTable,
    key: CacheKey<N>,
    compute: impl FnOnce() -> String,
  ) -> String {
    let value = self.get_or_insert_with(table, key, || CachedValue::Text(compute()));
    value.as_text().map(str::to_owned).unwrap_or_default()
  }

  /// [`Cache::get_or_insert_with`] for flags.
  pub fn flag_or_insert_with(
    &self,
    table: CacheTable,
    key: CacheKey<N>,
    compute: impl FnOnce() -> bool,
  ) -> bool {
    let value = self.get_or_insert_with(table, key, || CachedValue::Flag(compute()));
    value.as_flag().unwrap_or_default()
  }

  /// [`Cache::get_or_insert_with`] for levels.
  pub fn level_or_insert_with(
    &self,
    table: CacheTable,
    key: CacheKey<N>,
    compute: impl FnOnce() -> i32,
  ) -> i32 {
    let value = self.get_or_insert_with(table, key, || CachedValue::Level(compute()));
    value.as_level().unwrap_or_default()
  }

  /// [`Cache::get_or_insert_with`] for node lists.
  pub fn nodes_or_insert_with(
    &self,
    table: CacheTable,
    key: CacheKey<N>,
    compute: impl FnOnce() -> Vec<N>,
  ) -> Vec<N> {
    let value = self.get_or_insert_with(table, key, || CachedValue::Nodes(compute()));
    value.as_nodes().map(<[N]>::to_vec).unwrap_or_default()
  }

  /// Empty every table atomically and start a new epoch.
  pub fn clear_all(&self, reason: &str) {
    let mut tables = self.tables.write();
    let entries: usize = tables.values().map(HashMap::len).sum();
    tables.clear();
    self.epoch.fetch_add(1, Ordering::AcqRel);
    drop(tables);
    log::info!("{}: cleared {entries} cached entries. Reason: {reason}", self.name);
  }

  /// Total entries across all tables.
  pub fn len(&self) -> usize {
    self.tables.read().values().map(HashMap::len).sum()
  }

  /// Whether every table is empty.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Background sweep that flushes a cache on a fixed period.
///
/// Stops promptly and joins its thread on [`EvictionTask::stop`] or drop.
pub struct EvictionTask {
  stop_tx: Option<Sender<()>>,
  thread: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for EvictionTask {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EvictionTask")
      .field("running", &self.thread.is_some())
      .finish()
  }
}

impl EvictionTask {
  /// Start sweeping `cache` every `interval`.
  pub fn start<N>(cache: Arc<Cache<N>>, interval: Duration) -> Self
  where
    N: Clone + Eq + Hash + Send + Sync + 'static,
  {
    let (stop_tx, stop_rx) = bounded::<()>(1);
    let spawned = thread::Builder::new()
      .name(format!("lectern-sweep-{}", cache.name()))
      .spawn(move || loop {
        match stop_rx.recv_timeout(interval) {
          Err(RecvTimeoutError::Timeout) => cache.clear_all("periodic sweep"),
          Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
      });

    let thread = match spawned {
      Ok(thread) => Some(thread),
      Err(err) => {
        log::warn!("Failed to start cache sweep thread, cache will only clear on demand: {err}");
        None
      }
    };

    Self {
      stop_tx: Some(stop_tx),
      thread,
    }
  }

  /// Whether the sweep thread started.
  pub const fn is_running(&self) -> bool {
    self.thread.is_some()
  }

  /// Stop sweeping and wait for the thread to exit.
  pub fn stop(mut self) {
    self.shutdown();
  }

  fn shutdown(&mut self) {
    // Dropping the sender disconnects the channel and wakes the thread.
    drop(self.stop_tx.take());
    if let Some(t) = self.thread.take() {
      drop(t.join());
    }
  }
}

impl Drop for EvictionTask {
  fn drop(&mut self) {
    self.shutdown();
  }
}
