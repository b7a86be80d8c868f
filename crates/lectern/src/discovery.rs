/*!
On-screen object discovery.

Finds the presentable nodes under a root that are actually on screen, in
depth-first order. The provider may hang (a frozen application) so every
search runs on its own worker thread and the caller waits at most the given
timeout. On timeout the worker is cancelled cooperatively and the caller
gets an empty list.

## Rules

- Off-screen nodes (not showing, not visible, hidden, or outside the
  accumulated clip) prune their whole subtree.
- Opaque leaves are reported whole: widgets whose children are
  presentational, collapsed expandable nodes, and named leaf-like nodes.
- A node with content is reported before its descendants, unless a child
  repeats its name (a wrapper around a single named child).
- A subtree with no content still reports a focusable or actionable root.
*/

use crossbeam_channel::{bounded, RecvTimeoutError};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::a11y::{Role, State, StateSet};
use crate::provider::{Accessible, NodeExt};
use crate::types::Bounds;

/// Default upper bound on a single discovery.
pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Deep trees recurse deeply; give workers room.
const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Deepest subtree a walk descends into.
const MAX_WALK_DEPTH: usize = 512;

/// A cancellation token for cooperative task cancellation.
///
/// Cloning shares the flag. Workers poll [`is_cancelled`](Self::is_cancelled)
/// and unwind when it flips.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
  cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub fn is_cancelled(&self) -> bool {
    self.cancelled.load(Ordering::Acquire)
  }

  pub fn cancel(&self) {
    self.cancelled.store(true, Ordering::Release);
  }
}

struct Worker {
  token: CancellationToken,
  thread: JoinHandle<()>,
}

/// Runs bounded-time discoveries and owns their worker threads.
///
/// Workers that outlive their caller's timeout are cancelled and reaped on
/// later calls; any still running when the finder drops are cancelled and
/// joined.
pub struct OnScreenFinder<N> {
  workers: Mutex<Vec<Worker>>,
  _node: PhantomData<fn() -> N>,
}

impl<N> std::fmt::Debug for OnScreenFinder<N> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OnScreenFinder")
      .field("outstanding_workers", &self.workers.lock().len())
      .finish()
  }
}

impl<N> Default for OnScreenFinder<N> {
  fn default() -> Self {
    Self {
      workers: Mutex::new(Vec::new()),
      _node: PhantomData,
    }
  }
}

impl<N: Accessible> OnScreenFinder<N> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Presentable on-screen nodes under `root`, or an empty list if the
  /// search does not finish within `timeout`.
  pub fn discover(&self, root: &N, clip: Option<Bounds>, timeout: Duration) -> Vec<N> {
    self.reap();

    let started = Instant::now();
    let token = CancellationToken::new();
    let (tx, rx) = bounded::<Vec<N>>(1);

    let walk = Walk {
      token: token.clone(),
    };
    let worker_root = root.clone();
    let spawned = thread::Builder::new()
      .name("lectern-discovery".into())
      .stack_size(WORKER_STACK_SIZE)
      .spawn(move || {
        if let Some(found) = walk.visit(&worker_root, clip, 0, &mut HashSet::new()) {
          // The caller may have timed out and dropped the receiver.
          drop(tx.try_send(found));
        }
      });

    let thread = match spawned {
      Ok(thread) => thread,
      Err(err) => {
        log::warn!("Failed to start discovery worker: {err}");
        return Vec::new();
      }
    };

    let result = match rx.recv_timeout(timeout) {
      Ok(found) => {
        log::debug!(
          "Discovered {} on-screen object(s) under {root:?} in {:?}",
          found.len(),
          started.elapsed()
        );
        found
      }
      Err(RecvTimeoutError::Timeout) => {
        token.cancel();
        log::debug!("Discovery under {root:?} timed out after {timeout:?}");
        Vec::new()
      }
      Err(RecvTimeoutError::Disconnected) => {
        log::info!("Discovery worker under {root:?} exited without a result");
        Vec::new()
      }
    };

    self.workers.lock().push(Worker { token, thread });
    result
  }

  /// Join workers that have finished.
  fn reap(&self) {
    let mut workers = self.workers.lock();
    let (finished, running): (Vec<_>, Vec<_>) =
      workers.drain(..).partition(|w| w.thread.is_finished());
    *workers = running;
    drop(workers);
    for worker in finished {
      drop(worker.thread.join());
    }
  }

  /// Workers not yet reaped.
  pub fn outstanding(&self) -> usize {
    self.workers.lock().len()
  }
}

impl<N> Drop for OnScreenFinder<N> {
  fn drop(&mut self) {
    let workers: Vec<Worker> = self.workers.get_mut().drain(..).collect();
    for worker in &workers {
      worker.token.cancel();
    }
    for worker in workers {
      drop(worker.thread.join());
    }
  }
}

struct Walk {
  token: CancellationToken,
}

impl Walk {
  /// `None` means the walk was cancelled. A node reached a second time, or
  /// below [`MAX_WALK_DEPTH`], contributes nothing.
  fn visit<N: Accessible>(
    &self,
    node: &N,
    clip: Option<Bounds>,
    depth: usize,
    seen: &mut HashSet<N>,
  ) -> Option<Vec<N>> {
    if self.token.is_cancelled() {
      return None;
    }
    if depth > MAX_WALK_DEPTH {
      log::debug!("discovery: stopping below {node:?}, subtree deeper than {MAX_WALK_DEPTH}");
      return Some(Vec::new());
    }
    if !seen.insert(node.clone()) {
      log::debug!("discovery: {node:?} reached twice, tree has a cycle");
      return Some(Vec::new());
    }

    let states = node.states_or_empty();
    if !states.is_on_screen() {
      return Some(Vec::new());
    }

    let child_clip = match (node.bounds_or_none().filter(Bounds::is_valid), clip) {
      (Some(bounds), Some(clip)) => match clip.intersection(&bounds) {
        Some(overlap) => Some(overlap),
        None => return Some(Vec::new()),
      },
      (Some(bounds), None) => Some(bounds),
      (None, clip) => clip,
    };

    let role = node.role_or_unknown();
    let name = node.name_or_empty();
    let name = name.trim();
    if is_opaque_leaf(role, name, &states) {
      return Some(vec![node.clone()]);
    }

    let children = node.children_or_empty();
    let mut descendants = Vec::new();
    for child in &children {
      if self.token.is_cancelled() {
        return None;
      }
      descendants.extend(self.visit(child, child_clip, depth + 1, seen)?);
    }

    let mut result = Vec::new();
    let repeated_by_child =
      !name.is_empty() && children.iter().any(|c| c != node && c.name_or_empty().trim() == name);
    if has_content(node, name) && !repeated_by_child {
      result.push(node.clone());
    }
    result.extend(descendants);

    if result.is_empty() && (states.contains(State::Focusable) || !node.actions_or_empty().is_empty())
    {
      result.push(node.clone());
    }
    Some(result)
  }
}

fn is_opaque_leaf(role: Role, name: &str, states: &StateSet) -> bool {
  role.has_presentational_children()
    || states.is_collapsed()
    || (role.is_leaf_like() && !name.is_empty())
}

fn has_content<N: Accessible>(node: &N, name: &str) -> bool {
  !name.is_empty()
    || !node.description_or_empty().trim().is_empty()
    || node.character_count_or_zero() > 0
}
