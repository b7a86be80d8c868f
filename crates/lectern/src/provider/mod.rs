/*!
The boundary between Lectern and the accessibility-tree provider.

`traits.rs` defines what a provider must answer; `ext.rs` wraps those
answers so the rest of the engine never sees a provider error.
*/

mod ext;
mod traits;

pub use ext::NodeExt;
pub use traits::Accessible;
