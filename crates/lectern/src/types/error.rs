/*! Error types for Lectern operations. */

/// Errors raised by accessibility-tree queries.
///
/// None of these escape [`Generator::generate`](crate::Generator::generate):
/// the generation pipeline logs them and substitutes a neutral default.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LecternError {
  #[error("Node is no longer valid")]
  DeadNode,

  #[error("Provider call '{query}' failed: {reason}")]
  ProviderCall { query: &'static str, reason: String },

  /// The node lacks the interface a query needs.
  #[error("Operation not supported: {0}")]
  NotSupported(String),
}

impl LecternError {
  /// Shorthand for a failed provider query.
  pub fn provider(query: &'static str, reason: impl Into<String>) -> Self {
    Self::ProviderCall {
      query,
      reason: reason.into(),
    }
  }
}

/// Result type for Lectern operations.
pub type LecternResult<T> = Result<T, LecternError>;
