//! Error type for `confab-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] confab_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

impl Error {
  /// True when the underlying failure is a SQLite integrity error — a
  /// foreign-key violation (e.g. appending to a session that does not
  /// exist) or a uniqueness violation.
  pub fn is_constraint_violation(&self) -> bool {
    matches!(
      self,
      Error::Database(tokio_rusqlite::Error::Rusqlite(
        rusqlite::Error::SqliteFailure(e, _),
      )) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
  }
}

impl From<Error> for confab_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Core(core) => core,
      other => confab_core::Error::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
