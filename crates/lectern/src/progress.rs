/*!
Progress-bar update throttling.

Progress bars can change many times a second. The tracker remembers, per
bar, when an update was last presented and at what percentage, and decides
whether a new value is worth presenting:

- same percentage as last time: no
- 100%: always
- otherwise: only once the configured interval has passed

Records live as long as the owning generator and are unaffected by cache
flushes. Dead nodes are pruned lazily before the multi-record queries.
*/

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use ts_rs::TS;

use crate::provider::{Accessible, NodeExt};

/// Which progress bars are presented relative to the user's current context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ProgressVerbosity {
  /// Every progress bar.
  #[default]
  All,
  /// Only bars in the same application as the reference node.
  Application,
  /// Only bars in the same top-level window as the reference node.
  Window,
}

/// When a bar's update was last presented, and at what percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressRecord {
  pub time: Instant,
  pub percent: Option<i32>,
}

/// Per-generator record of presented progress-bar updates.
#[derive(Debug)]
pub struct ProgressTracker<N> {
  /// Insertion-ordered. Re-recording a bar keeps its original position.
  records: Vec<(N, ProgressRecord)>,
  interval: Duration,
}

impl<N: Accessible> ProgressTracker<N> {
  pub const fn new(interval: Duration) -> Self {
    Self {
      records: Vec::new(),
      interval,
    }
  }

  pub const fn interval(&self) -> Duration {
    self.interval
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn record(&self, node: &N) -> Option<ProgressRecord> {
    self
      .records
      .iter()
      .find(|(n, _)| n == node)
      .map(|(_, r)| *r)
  }

  /// Whether the bar's current value should be presented now.
  pub fn should_present_update(&self, node: &N) -> bool {
    self.should_present_update_at(node, Instant::now())
  }

  pub(crate) fn should_present_update_at(&self, node: &N, now: Instant) -> bool {
    let percent = current_percent(node);
    let (last_time, last_percent) = match self.record(node) {
      Some(record) => (Some(record.time), record.percent),
      None => (None, None),
    };

    if percent == last_percent {
      return false;
    }
    if percent == Some(100) {
      return true;
    }
    match last_time {
      Some(t) => now.saturating_duration_since(t) >= self.interval,
      None => true,
    }
  }

  /// Remember that the bar's current value was presented.
  pub fn record_update(&mut self, node: &N) {
    self.record_update_at(node, Instant::now());
  }

  pub(crate) fn record_update_at(&mut self, node: &N, now: Instant) {
    let record = ProgressRecord {
      time: now,
      percent: current_percent(node),
    };
    match self.records.iter_mut().find(|(n, _)| n == node) {
      Some((_, existing)) => *existing = record,
      None => self.records.push((node.clone(), record)),
    }
  }

  /// The bar whose update was recorded last.
  pub fn most_recently_updated(&mut self) -> Option<N> {
    self.prune();
    self
      .records
      .iter()
      .max_by_key(|(_, r)| r.time)
      .map(|(n, _)| n.clone())
  }

  /// 1-based position of the bar among tracked bars, and the total.
  ///
  /// The position is found by comparing `(time, percent)` records, so two
  /// bars with identical records resolve to the first of them.
  pub fn ordinal_and_count(&mut self, node: &N) -> Option<(usize, usize)> {
    self.prune();
    let target = self.record(node)?;
    let index = self.records.iter().position(|(_, r)| *r == target)?;
    Some((index + 1, self.records.len()))
  }

  /// Drop records of nodes the provider has torn down.
  pub fn prune(&mut self) {
    let before = self.records.len();
    self.records.retain(|(n, _)| n.is_valid());
    let removed = before - self.records.len();
    if removed > 0 {
      log::debug!("Pruned {removed} dead progress bar record(s)");
    }
  }
}

fn current_percent<N: Accessible>(node: &N) -> Option<i32> {
  node.value_or_none().and_then(|v| v.percent())
}

/// Whether `node` falls within `verbosity` relative to `reference`
/// (typically the object that had focus). No reference means no narrowing.
pub(crate) fn in_scope<N: Accessible>(
  verbosity: ProgressVerbosity,
  node: &N,
  reference: Option<&N>,
) -> bool {
  let Some(reference) = reference else {
    return true;
  };
  match verbosity {
    ProgressVerbosity::All => true,
    ProgressVerbosity::Application => root_of(node) == root_of(reference),
    ProgressVerbosity::Window => top_level_of(node) == top_level_of(reference),
  }
}

fn root_of<N: Accessible>(node: &N) -> N {
  node.ancestors().pop().unwrap_or_else(|| node.clone())
}

fn top_level_of<N: Accessible>(node: &N) -> Option<N> {
  node.find_ancestor(|a| a.role_or_unknown().is_top_level())
}
