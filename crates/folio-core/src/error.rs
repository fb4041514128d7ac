//! Error types for `folio-core`.
//!
//! The taxonomy is closed: every error carries one of four [`ErrorKind`]s and
//! the HTTP layer picks a status code from the kind alone. Construct errors
//! through the factory functions rather than ad hoc variants.

use thiserror::Error;

use crate::validate::ValidationError;

/// Coarse classification used to choose a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Validation,
  NotFound,
  Conflict,
  Internal,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("invalid contact: {0}")]
  InvalidContact(#[source] ValidationError),

  #[error("id cannot be empty")]
  IdEmpty,

  #[error("{0} not found")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("internal error: {0}")]
  Internal(String),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn invalid_input(message: impl Into<String>) -> Self {
    Self::InvalidInput(message.into())
  }

  pub fn invalid_contact(err: ValidationError) -> Self { Self::InvalidContact(err) }

  /// `resource` names the missing thing, e.g. `"contact"`.
  pub fn not_found(resource: impl Into<String>) -> Self {
    Self::NotFound(resource.into())
  }

  pub fn conflict(message: impl Into<String>) -> Self { Self::Conflict(message.into()) }

  pub fn internal(message: impl Into<String>) -> Self { Self::Internal(message.into()) }

  pub fn storage<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(err))
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Validation(_) | Self::InvalidInput(_) | Self::InvalidContact(_) | Self::IdEmpty => {
        ErrorKind::Validation
      }
      Self::NotFound(_) => ErrorKind::NotFound,
      Self::Conflict(_) => ErrorKind::Conflict,
      Self::Internal(_) | Self::Storage(_) => ErrorKind::Internal,
    }
  }

  pub fn is_not_found(&self) -> bool { self.kind() == ErrorKind::NotFound }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
