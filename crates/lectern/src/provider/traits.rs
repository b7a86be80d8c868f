/*!
Accessibility-tree provider contract.

The tree is owned and mutated by an external provider (AT-SPI, UIA, AX, a
test fixture). Lectern only reads it, through this trait. Every query may
fail: the node may have died, the provider may have errored. Implementations
return `Err` in those cases and the engine substitutes neutral defaults
(see [`NodeExt`](super::NodeExt)).
*/

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::a11y::{RangeValue, Role, StateSet};
use crate::types::{Bounds, LecternResult, TextLine, TextRange};

/// A node in the external accessibility tree.
///
/// Clone is expected to be cheap (a reference-counted handle). Equality and
/// hashing identify the underlying node, not its current contents.
///
/// Never assume a handle stays valid between two calls: the provider may
/// tear the node down at any time.
pub trait Accessible: Clone + Eq + Hash + Debug + Send + Sync + 'static {
  /// Whether the node is still alive in the provider.
  fn is_valid(&self) -> bool;

  /// Literal role as reported by the provider.
  fn role(&self) -> LecternResult<Role>;

  fn name(&self) -> LecternResult<String>;

  fn description(&self) -> LecternResult<String>;

  /// Object attributes (`tag`, `xml-roles`, `level`, `sort`, ...).
  fn attributes(&self) -> LecternResult<HashMap<String, String>>;

  fn states(&self) -> LecternResult<StateSet>;

  /// Screen bounds, `None` when the node has no component interface.
  fn bounds(&self) -> LecternResult<Option<Bounds>>;

  fn parent(&self) -> LecternResult<Option<Self>>;

  fn children(&self) -> LecternResult<Vec<Self>>;

  /// Names of the actions the node supports (`click`, `jump`, `toggle`, ...).
  fn actions(&self) -> LecternResult<Vec<String>>;

  /// Targets of the labelled-by relation.
  fn labels(&self) -> LecternResult<Vec<Self>> {
    Ok(Vec::new())
  }

  fn value(&self) -> LecternResult<Option<RangeValue>> {
    Ok(None)
  }

  fn image_description(&self) -> LecternResult<String> {
    Ok(String::new())
  }

  // === Text ===

  fn character_count(&self) -> LecternResult<u32> {
    Ok(0)
  }

  fn substring(&self, _range: TextRange) -> LecternResult<String> {
    Ok(String::new())
  }

  fn caret_offset(&self) -> LecternResult<Option<u32>> {
    Ok(None)
  }

  /// The line containing `offset`.
  fn line_at(&self, _offset: u32) -> LecternResult<Option<TextLine>> {
    Ok(None)
  }

  fn all_text(&self) -> LecternResult<String> {
    let count = self.character_count()?;
    if count == 0 {
      return Ok(String::new());
    }
    self.substring(TextRange::new(0, count))
  }

  // === Tables ===

  /// Row headers for a table cell.
  fn row_headers(&self) -> LecternResult<Vec<Self>> {
    Ok(Vec::new())
  }

  /// Column headers for a table cell.
  fn column_headers(&self) -> LecternResult<Vec<Self>> {
    Ok(Vec::new())
  }

  /// `(rows, columns)` for a table.
  fn table_size(&self) -> LecternResult<Option<(u32, u32)>> {
    Ok(None)
  }
}
