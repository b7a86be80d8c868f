/*! Accessibility vocabulary shared by every part of the engine. */

mod role;
mod state;
mod value;

pub use role::Role;
pub use state::{State, StateSet};
pub use value::RangeValue;
