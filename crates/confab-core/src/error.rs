//! Error types for `confab-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Lookup-by-name matched zero sessions. This is the only absence that
  /// surfaces as an error; every other missing record is an absent/default
  /// result and callers branch on presence instead.
  #[error("no session named {0:?}")]
  SessionNotFound(String),

  /// A backend-specific failure, boxed so this crate stays free of any
  /// concrete store dependency.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
