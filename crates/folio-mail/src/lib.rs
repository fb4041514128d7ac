//! Outbound email for contact submissions.
//!
//! [`compose`] turns a contact into message bodies; [`SmtpMailer`] either
//! logs them (development mode) or delivers them over SMTP with `lettre`.

pub mod compose;
pub mod config;
pub mod error;
mod mailer;

pub use config::{EmailMode, MailConfig};
pub use error::{Error, Result};
pub use mailer::SmtpMailer;
