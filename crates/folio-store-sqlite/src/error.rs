//! Error type for `folio-store-sqlite`.

use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] folio_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored column held a value no domain type accepts.
  #[error("undecodable column {column}: {value:?}")]
  Decode { column: &'static str, value: String },

  /// The transaction body failed and so did the rollback.
  #[error("rollback failed ({rollback}) after: {source}")]
  Rollback {
    source:   Box<Error>,
    rollback: rusqlite::Error,
  },
}

impl Error {
  fn rusqlite(&self) -> Option<&rusqlite::Error> {
    match self {
      Self::Sqlite(e) | Self::Database(tokio_rusqlite::Error::Rusqlite(e)) => Some(e),
      _ => None,
    }
  }

  /// `true` for UNIQUE and PRIMARY KEY violations.
  pub fn is_unique_violation(&self) -> bool {
    matches!(
      self.rusqlite(),
      Some(rusqlite::Error::SqliteFailure(e, _))
        if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
          || e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
  }
}

impl From<Error> for folio_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Core(e) => e,
      e if e.is_unique_violation() => folio_core::Error::conflict(e.to_string()),
      e => folio_core::Error::storage(e),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
