/*!
Lectern - presentation generation for screen readers

Reads a live accessibility tree through the [`Accessible`] trait and turns a
node into an ordered list of braille, speech or sound units.

```ignore
use lectern::{Generator, Mode, PresentationOptions};

// One generator per output mode. Cache sweeps start automatically.
let speech = Generator::<MyNode>::new(Mode::Speech);

// Present the newly focused node, with the ancestors entered since `previous`
let units = speech.generate(&node, &PresentationOptions::focused().prior(previous));

// Progress bars are throttled per bar
let units = speech.generate(&bar, &PresentationOptions::new().progress_update());

// Everything on screen inside a window, bounded by the discovery timeout
let visible = speech.discover(&window, None);

// Flush cached results when the tree changes under you
speech.clear_caches("window activated");
```
*/

mod cache;
mod config;
mod discovery;
mod generator;
mod progress;
mod provider;
mod redundancy;

pub mod a11y;

mod types;
pub use types::*;

pub use crate::cache::{
  Cache, CacheKey, CacheTable, CachedValue, EvictionTask, DEFAULT_FACTS_SWEEP,
  DEFAULT_RESULTS_SWEEP,
};
pub use crate::config::{
  GeneratorBuilder, GeneratorConfig, Mode, Verbosity, DEFAULT_PROGRESS_INTERVAL,
};
pub use crate::discovery::{CancellationToken, OnScreenFinder, DEFAULT_DISCOVERY_TIMEOUT};
pub use crate::generator::{
  functional_role, render, FormatType, GenerationPhase, Generator, Hz, Presentation,
  PresentationOptions, PresentationUnit, Tone, MAX_TONE_FREQUENCY,
};
pub use crate::progress::{ProgressRecord, ProgressTracker, ProgressVerbosity};
pub use crate::provider::{Accessible, NodeExt};
pub use crate::redundancy::{is_redundant, similarity, DEFAULT_REDUNDANCY_THRESHOLD};

#[cfg(test)]
mod testing;
