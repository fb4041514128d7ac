//! Error type for `folio-mail`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid email address {address:?}: {source}")]
  Address {
    address: String,
    source:  lettre::address::AddressError,
  },

  #[error("failed to build message: {0}")]
  Message(#[from] lettre::error::Error),

  #[error("smtp error: {0}")]
  Smtp(#[from] lettre::transport::smtp::Error),

  #[error("failed to render email body: {0}")]
  Template(#[from] askama::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
