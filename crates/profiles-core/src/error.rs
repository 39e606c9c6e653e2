//! Error types for `profiles-core`.

use thiserror::Error;

use crate::profile::MIN_USERNAME_LEN;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Username must be at least {MIN_USERNAME_LEN} characters long.")]
  UsernameTooShort,

  #[error("Only companies can be verified.")]
  VerifiedNonCompany,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
