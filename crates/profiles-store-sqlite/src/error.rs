//! Error type for `profiles-store-sqlite`.

use profiles_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] profiles_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// The unique index on `username` rejected the write.
  #[error("duplicate key: username {0:?} already exists")]
  DuplicateUsername(String),

  /// A table CHECK constraint rejected the write.
  #[error("constraint violation: {0}")]
  ConstraintViolation(String),
}

impl Error {
  /// Classify a failed write of `username`, lifting constraint failures out
  /// of the generic database error.
  pub(crate) fn from_write(e: tokio_rusqlite::Error, username: &str) -> Self {
    use rusqlite::ffi::{SQLITE_CONSTRAINT_CHECK, SQLITE_CONSTRAINT_UNIQUE};

    let failure = match &e {
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, msg)) => {
        Some((f.extended_code, msg.clone().unwrap_or_else(|| f.to_string())))
      }
      _ => None,
    };

    match failure {
      Some((SQLITE_CONSTRAINT_UNIQUE, _)) => {
        Error::DuplicateUsername(username.to_owned())
      }
      Some((SQLITE_CONSTRAINT_CHECK, msg)) => Error::ConstraintViolation(msg),
      _ => Error::Database(e),
    }
  }
}

impl StoreError for Error {
  fn is_duplicate_key(&self) -> bool { matches!(self, Error::DuplicateUsername(_)) }

  fn is_invariant_violation(&self) -> bool {
    matches!(self, Error::ConstraintViolation(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
