/*!
Output units.

A [`Presentation`] is an ordered list of units. Rendering them (joining
text, playing tones, routing braille cells) is the output layer's job.
*/

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Highest frequency a tone may request.
pub const MAX_TONE_FREQUENCY: u32 = 20_000;

/// Tone frequency in hertz.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS, Display, From, Into,
)]
#[ts(export)]
pub struct Hz(pub u32);

/// A sine tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Tone {
  pub duration_ms: u32,
  pub frequency: Hz,
  /// Multiplier on the output volume, `0.0..=1.0`.
  pub volume: f32,
}

impl Tone {
  pub fn new(duration_ms: u32, frequency: u32, volume: f32) -> Self {
    Self {
      duration_ms,
      frequency: Hz(frequency.min(MAX_TONE_FREQUENCY)),
      volume: volume.clamp(0.0, 1.0),
    }
  }

  /// The beep for a progress value. Pitch rises with the percentage and
  /// volume falls; completion is a long tone.
  #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
  pub fn for_percent(percent: i32) -> Self {
    let percent = percent.clamp(0, 100);
    let duration_ms = if percent >= 99 { 1000 } else { 75 };
    let volume = 1.0 - percent as f32 / 120.0;
    // Keep the first beeps from being too deep.
    let frequency = if percent < 7 {
      (98.0 + f64::from(percent) * 5.4) as u32
    } else {
      percent as u32 * 22
    };
    Self::new(duration_ms, frequency, volume)
  }
}

/// One element of a presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
#[ts(export)]
pub enum PresentationUnit {
  Text(String),
  Role(String),
  /// A state marker: a word in speech, a cell pattern in braille, a cue
  /// name in sound.
  Indicator(String),
  /// Insert a space if anything precedes this point.
  SpaceIfPreceded,
  Tone(Tone),
  /// Separates items of a compound presentation, such as the cells of a row.
  Delimiter(String),
}

impl PresentationUnit {
  pub fn text(s: impl Into<String>) -> Self {
    Self::Text(s.into())
  }

  /// The unit's string content, if it has one.
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Text(s) | Self::Role(s) | Self::Indicator(s) | Self::Delimiter(s) => Some(s),
      Self::SpaceIfPreceded | Self::Tone(_) => None,
    }
  }

  /// Carries nothing to present.
  pub fn is_empty(&self) -> bool {
    match self {
      Self::Text(s) | Self::Role(s) | Self::Indicator(s) | Self::Delimiter(s) => {
        s.trim().is_empty()
      }
      Self::SpaceIfPreceded => true,
      Self::Tone(_) => false,
    }
  }
}

pub type Presentation = Vec<PresentationUnit>;

/// Flatten a presentation into one line of text. Tones are skipped.
pub fn render(units: &[PresentationUnit]) -> String {
  let mut out = String::new();
  for unit in units {
    match unit {
      PresentationUnit::SpaceIfPreceded => {
        if !out.is_empty() && !out.ends_with(' ') {
          out.push(' ');
        }
      }
      PresentationUnit::Tone(_) => {}
      PresentationUnit::Delimiter(s) => out.push_str(s),
      PresentationUnit::Text(s) | PresentationUnit::Role(s) | PresentationUnit::Indicator(s) => {
        if !out.is_empty() && !out.ends_with(' ') {
          out.push(' ');
        }
        out.push_str(s);
      }
    }
  }
  out
}
