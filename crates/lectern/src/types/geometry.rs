/*! Geometry types for screen coordinates. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Rectangle bounds in screen coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Bounds {
  pub x: f64,
  pub y: f64,
  pub w: f64,
  pub h: f64,
}

impl Bounds {
  pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
    Self { x, y, w, h }
  }

  /// Providers report `(0, 0, 0, 0)` or negative sizes for nodes without
  /// real geometry. Those bounds take no part in clipping.
  pub fn is_valid(&self) -> bool {
    self.w > 0.0 && self.h > 0.0
  }

  pub fn right(&self) -> f64 {
    self.x + self.w
  }

  pub fn bottom(&self) -> f64 {
    self.y + self.h
  }

  /// Check if two bounds overlap. Touching edges do not count.
  pub fn intersects(&self, other: &Bounds) -> bool {
    self.x < other.right()
      && other.x < self.right()
      && self.y < other.bottom()
      && other.y < self.bottom()
  }

  /// The overlapping area of two bounds, if any.
  pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
    if !self.intersects(other) {
      return None;
    }
    let x = self.x.max(other.x);
    let y = self.y.max(other.y);
    Some(Bounds {
      x,
      y,
      w: self.right().min(other.right()) - x,
      h: self.bottom().min(other.bottom()) - y,
    })
  }
}
