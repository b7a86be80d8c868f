/*!
Range values.

Sliders, spin buttons, scroll bars and progress bars expose a current
position within a minimum/maximum range, optionally with a provider-supplied
display text (`aria-valuetext`).
*/

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Current value of a range widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RangeValue {
  pub current: f64,
  pub minimum: f64,
  pub maximum: f64,
  /// Display text supplied by the provider, used verbatim when present.
  pub text: Option<String>,
}

impl RangeValue {
  /// Create a value without display text.
  pub const fn new(current: f64, minimum: f64, maximum: f64) -> Self {
    Self {
      current,
      minimum,
      maximum,
      text: None,
    }
  }

  /// Attach provider display text.
  #[must_use]
  pub fn with_text(mut self, text: impl Into<String>) -> Self {
    self.text = Some(text.into());
    self
  }

  /// Position in the range as a whole percentage.
  ///
  /// `None` when the range is empty or any bound is not finite.
  ///
  /// ```
  /// use lectern::a11y::RangeValue;
  ///
  /// assert_eq!(RangeValue::new(50.0, 0.0, 200.0).percent(), Some(25));
  /// assert_eq!(RangeValue::new(1.0, 1.0, 1.0).percent(), None);
  /// ```
  #[allow(clippy::cast_possible_truncation)] // Clamped to 0..=100 before the cast
  pub fn percent(&self) -> Option<i32> {
    let span = self.maximum - self.minimum;
    if !(span.is_finite() && self.current.is_finite()) || span <= 0.0 {
      return None;
    }
    let ratio = ((self.current - self.minimum) / span).clamp(0.0, 1.0);
    Some((ratio * 100.0).round() as i32)
  }

  /// Text to present for this value.
  ///
  /// Provider text wins; otherwise the number, without a decimal point
  /// when it is whole.
  #[allow(clippy::cast_possible_truncation)] // Intentional: formatting display value
  pub fn display_text(&self) -> String {
    if let Some(text) = self.text.as_deref().filter(|t| !t.trim().is_empty()) {
      return text.to_owned();
    }
    let n = self.current;
    if n.is_finite() && n.fract() == 0.0 {
      format!("{}", n as i64)
    } else {
      n.to_string()
    }
  }
}


#[cfg(test)]
mod proptests {
  use super::*;
  use proptest::prelude::*;

  proptest! {
    /// Percent always lands in 0..=100 for well-formed ranges
    #[test]
    fn percent_is_bounded(
      min in -1e6..1e6f64,
      span in 0.001..1e6f64,
      current in -2e6..2e6f64,
    ) {
      let value = RangeValue::new(current, min, min + span);
      let percent = value.percent().unwrap();
      prop_assert!((0..=100).contains(&percent));
    }
  }
}
