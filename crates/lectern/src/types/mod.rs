/*! Core value types for Lectern. */

#![allow(missing_docs)]

mod error;
mod geometry;
mod text;

pub use error::{LecternError, LecternResult};
pub use geometry::Bounds;
pub use text::{TextLine, TextRange};
