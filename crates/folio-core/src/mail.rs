//! The outbound email capability used by the contact pipeline.

use std::future::Future;

use crate::contact::Contact;

/// Sends the two messages a submission triggers.
///
/// Callers treat both as best-effort; an implementation should report
/// failures rather than retry.
pub trait Mailer: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Tell the site owner about a new submission.
  fn send_contact_notification<'a>(
    &'a self,
    contact: &'a Contact,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Thank the submitter and echo back what they sent.
  fn send_confirmation_email<'a>(
    &'a self,
    contact: &'a Contact,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
