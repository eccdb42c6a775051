//! Error type for `lazydog-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] lazydog_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A column held a value no domain type accepts.
  #[error("corrupt column {column}: {value:?}")]
  Corrupt { column: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for lazydog_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Core(inner) => inner,
      other => lazydog_core::Error::Store(Box::new(other)),
    }
  }
}

/// Map a UNIQUE/PRIMARY KEY violation onto [`lazydog_core::Error::Conflict`].
///
/// `messages` pairs a `table.column` fragment of SQLite's error text with the
/// conflict message to report; the first match wins. Other errors pass
/// through unchanged.
pub(crate) fn remap_unique(err: rusqlite::Error, messages: &[(&str, &str)]) -> Error {
  use rusqlite::ffi::{SQLITE_CONSTRAINT_PRIMARYKEY, SQLITE_CONSTRAINT_UNIQUE};

  let detail = match &err {
    rusqlite::Error::SqliteFailure(e, detail)
      if e.extended_code == SQLITE_CONSTRAINT_UNIQUE
        || e.extended_code == SQLITE_CONSTRAINT_PRIMARYKEY =>
    {
      detail.clone().unwrap_or_default()
    }
    _ => return Error::Sqlite(err),
  };

  let message = messages
    .iter()
    .find(|(fragment, _)| detail.contains(fragment))
    .map_or("duplicate record", |&(_, message)| message);

  tracing::warn!(%detail, message, "storage constraint rejected duplicate write");
  Error::Core(lazydog_core::Error::conflict(message))
}
