//! Error type for `slab-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored enum discriminant that no variant matches.
  #[error("cannot decode stored value: {0}")]
  Decode(String),

  #[error("email already registered: {0}")]
  EmailTaken(String),

  #[error("user not found: {0}")]
  UserNotFound(uuid::Uuid),

  #[error("card not found: {0}")]
  CardNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
