//! Error type for `arcadia-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored value did not have the expected shape (e.g. a rating outside
  /// the integer range, an unknown role string).
  #[error("unexpected column value: {0}")]
  Decode(String),
}

impl Error {
  /// Whether this error is a storage-level uniqueness-constraint violation.
  /// Used to convert insert races into their domain conflict outcome.
  pub(crate) fn is_unique_violation(&self) -> bool {
    matches!(
      self,
      Error::Database(tokio_rusqlite::Error::Rusqlite(
        rusqlite::Error::SqliteFailure(e, _),
      )) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
  }
}

/// Everything the backend cannot express as a domain rule violation is a
/// storage fault to callers of the [`arcadia_core::store::MarketStore`]
/// trait.
impl From<Error> for arcadia_core::Error {
  fn from(e: Error) -> Self { arcadia_core::Error::Storage(e.to_string()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
