/*!
Semantic UI roles.

Roles describe what a node *is*. Providers report a literal role; the
generator may resolve a different *functional* role from structural context
(see `generator::role_resolve`). Functional-only roles such as
[`Role::Anchor`] or the math sub-kinds are never reported by providers but
are valid dispatch keys.
*/

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Semantic UI role.
///
/// Modelled on the AT-SPI / WAI-ARIA role sets, trimmed to what the
/// presentation engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Default)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
  // === Top level ===
  Application,
  Frame,
  Window,
  Dialog,
  Alert,
  Notification,

  // === Documents & structure ===
  Document,
  DocumentWeb,
  Article,
  Feed,
  Section,
  Paragraph,
  Heading,
  BlockQuote,
  Comment,
  Footnote,
  Landmark,
  Form,
  Panel,
  Filler,
  Grouping,
  ScrollPane,
  Toolbar,
  StatusBar,
  Tooltip,

  // === Static content ===
  Label,
  StaticText,
  Image,
  Icon,
  Canvas,
  Separator,
  Math,

  // === Description lists ===
  DescriptionList,
  DescriptionTerm,
  DescriptionValue,

  // === Navigation ===
  Link,
  Menu,
  MenuBar,
  MenuItem,
  CheckMenuItem,
  RadioMenuItem,
  PageTab,
  PageTabList,

  // === Collections ===
  List,
  ListBox,
  ListItem,
  Table,
  TableRow,
  TableCell,
  ColumnHeader,
  RowHeader,
  Tree,
  TreeTable,
  TreeItem,

  // === Interactive ===
  PushButton,
  ToggleButton,
  CheckBox,
  RadioButton,
  Switch,
  ComboBox,
  Entry,
  PasswordText,
  Text,
  SpinButton,
  Slider,
  ScrollBar,
  ProgressBar,

  // === Functional roles (resolved, never reported) ===
  /// A link target: a link that is neither focusable nor jumpable.
  Anchor,
  /// An article whose parent is a feed.
  FeedArticle,
  /// A named `region` landmark.
  RegionLandmark,
  /// Digital-publishing landmark (`doc-toc`, `doc-glossary`, ...).
  DpubLandmark,
  /// Digital-publishing section (`doc-chapter`, `doc-abstract`, ...).
  DpubSection,
  MathFraction,
  MathRoot,
  MathSubscript,
  MathSuperscript,
  MathUnderOver,
  MathMultiscript,
  MathEnclosed,
  MathFenced,
  MathTable,
  MathRow,
  MathCell,

  /// Unknown role - the provider reported something we don't map.
  #[default]
  Unknown,
}

impl Role {
  /// Roles whose children are purely presentational.
  ///
  /// On-screen discovery stops at these nodes and reports them whole.
  pub const fn has_presentational_children(&self) -> bool {
    matches!(
      self,
      Self::PushButton
        | Self::ToggleButton
        | Self::CheckBox
        | Self::RadioButton
        | Self::Switch
        | Self::Image
        | Self::Icon
        | Self::Slider
        | Self::ScrollBar
        | Self::ProgressBar
        | Self::Separator
        | Self::Entry
        | Self::PasswordText
        | Self::SpinButton
        | Self::Math
    )
  }

  /// Leaf-like roles that are reported whole once they carry a name.
  pub const fn is_leaf_like(&self) -> bool {
    matches!(
      self,
      Self::Link
        | Self::Heading
        | Self::ListItem
        | Self::Label
        | Self::PageTab
        | Self::MenuItem
        | Self::CheckMenuItem
        | Self::RadioMenuItem
        | Self::TableCell
        | Self::ColumnHeader
        | Self::RowHeader
    )
  }

  pub const fn is_text_input(&self) -> bool {
    matches!(
      self,
      Self::Entry | Self::PasswordText | Self::Text | Self::ComboBox | Self::SpinButton
    )
  }

  /// Roles that typically wrap their content without adding meaning.
  pub const fn is_layout_container(&self) -> bool {
    matches!(
      self,
      Self::Panel | Self::Filler | Self::Section | Self::Grouping | Self::ScrollPane
    )
  }

  /// Top-level roles used to decide "same window" for progress verbosity.
  pub const fn is_top_level(&self) -> bool {
    matches!(
      self,
      Self::Frame | Self::Window | Self::Dialog | Self::Alert
    )
  }
}
