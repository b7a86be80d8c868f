/*!
Generator configuration.

Each output mode has its own defaults; [`GeneratorBuilder`] adjusts them
before a [`Generator`](crate::Generator) is built.

```ignore
use lectern::{Generator, Mode};

let generator = Generator::<MyNode>::builder(Mode::Speech)
  .progress_interval(Duration::from_secs(5))
  .discovery_timeout(Duration::from_secs(2))
  .build();
```
*/

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use ts_rs::TS;

use crate::cache::{DEFAULT_FACTS_SWEEP, DEFAULT_RESULTS_SWEEP};
use crate::discovery::DEFAULT_DISCOVERY_TIMEOUT;
use crate::progress::ProgressVerbosity;
use crate::redundancy::DEFAULT_REDUNDANCY_THRESHOLD;

/// Interval between repeated progress-bar updates in braille and speech.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(10);

/// Output modality a generator composes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Display)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Mode {
  #[display("braille")]
  Braille,
  #[display("speech")]
  Speech,
  #[display("sound")]
  Sound,
}

/// How much secondary information (descriptions) is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Verbosity {
  Brief,
  #[default]
  Verbose,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
  pub mode: Mode,
  /// Minimum time between presented updates of the same progress bar.
  pub progress_interval: Duration,
  /// Whether progress-bar updates are presented at all.
  pub progress_updates: bool,
  pub progress_verbosity: ProgressVerbosity,
  pub discovery_timeout: Duration,
  /// Flush period of the per-generation results cache.
  pub results_sweep: Duration,
  /// Flush period of the long-lived facts cache.
  pub facts_sweep: Duration,
  pub redundancy_threshold: f64,
  pub verbosity: Verbosity,
  /// Start the periodic cache sweeps. Disable to flush only on demand.
  pub auto_sweep: bool,
}

impl GeneratorConfig {
  pub const fn for_mode(mode: Mode) -> Self {
    let progress_interval = match mode {
      Mode::Braille | Mode::Speech => DEFAULT_PROGRESS_INTERVAL,
      Mode::Sound => Duration::ZERO,
    };
    Self {
      mode,
      progress_interval,
      progress_updates: true,
      progress_verbosity: ProgressVerbosity::All,
      discovery_timeout: DEFAULT_DISCOVERY_TIMEOUT,
      results_sweep: DEFAULT_RESULTS_SWEEP,
      facts_sweep: DEFAULT_FACTS_SWEEP,
      redundancy_threshold: DEFAULT_REDUNDANCY_THRESHOLD,
      verbosity: Verbosity::Verbose,
      auto_sweep: true,
    }
  }

  /// Replace unusable values with the mode's defaults.
  pub(crate) fn sanitized(mut self) -> Self {
    let defaults = Self::for_mode(self.mode);
    if !(0.0..=1.0).contains(&self.redundancy_threshold) {
      log::warn!(
        "Redundancy threshold {} is outside 0..=1, using {}",
        self.redundancy_threshold,
        defaults.redundancy_threshold
      );
      self.redundancy_threshold = defaults.redundancy_threshold;
    }
    if self.results_sweep.is_zero() {
      log::warn!("Results sweep interval is zero, using {:?}", defaults.results_sweep);
      self.results_sweep = defaults.results_sweep;
    }
    if self.facts_sweep.is_zero() {
      log::warn!("Facts sweep interval is zero, using {:?}", defaults.facts_sweep);
      self.facts_sweep = defaults.facts_sweep;
    }
    if self.discovery_timeout.is_zero() {
      log::warn!(
        "Discovery timeout is zero, using {:?}",
        defaults.discovery_timeout
      );
      self.discovery_timeout = defaults.discovery_timeout;
    }
    self
  }
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self::for_mode(Mode::Speech)
  }
}

/// Builder for configuring a [`Generator`](crate::Generator).
#[derive(Debug, Clone, Copy)]
#[must_use = "Builder does nothing until .build() is called"]
pub struct GeneratorBuilder {
  pub(crate) config: GeneratorConfig,
}

impl GeneratorBuilder {
  pub const fn new(mode: Mode) -> Self {
    Self {
      config: GeneratorConfig::for_mode(mode),
    }
  }

  /// Default: 10s for braille and speech, 0 for sound.
  pub const fn progress_interval(mut self, interval: Duration) -> Self {
    self.config.progress_interval = interval;
    self
  }

  /// Present progress-bar updates. Default: true.
  pub const fn progress_updates(mut self, enabled: bool) -> Self {
    self.config.progress_updates = enabled;
    self
  }

  /// Which progress bars may interrupt. Default: all.
  pub const fn progress_verbosity(mut self, verbosity: ProgressVerbosity) -> Self {
    self.config.progress_verbosity = verbosity;
    self
  }

  /// Upper bound on on-screen discovery. Default: 5s.
  pub const fn discovery_timeout(mut self, timeout: Duration) -> Self {
    self.config.discovery_timeout = timeout;
    self
  }

  /// Default: 2s.
  pub const fn results_sweep(mut self, interval: Duration) -> Self {
    self.config.results_sweep = interval;
    self
  }

  /// Default: 60s.
  pub const fn facts_sweep(mut self, interval: Duration) -> Self {
    self.config.facts_sweep = interval;
    self
  }

  /// Similarity at or above which two strings count as the same. Default: 0.7.
  pub const fn redundancy_threshold(mut self, threshold: f64) -> Self {
    self.config.redundancy_threshold = threshold;
    self
  }

  pub const fn verbosity(mut self, verbosity: Verbosity) -> Self {
    self.config.verbosity = verbosity;
    self
  }

  /// Run periodic cache sweeps. Default: true.
  pub const fn auto_sweep(mut self, enabled: bool) -> Self {
    self.config.auto_sweep = enabled;
    self
  }

  pub const fn config(&self) -> &GeneratorConfig {
    &self.config
  }
}
