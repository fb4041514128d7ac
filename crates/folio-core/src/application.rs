//! The contact-form pipeline.
//!
//! [`ContactService::submit`] runs strictly in order: build the contact,
//! save it, notify the owner, confirm to the submitter, mark it processed and
//! store that status. Only the first two steps can fail the submission. The
//! rest are best-effort and their failures come back in the
//! [`SubmissionReport`] instead of being lost in the log.

use std::{fmt, sync::Arc};

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
  Error, ErrorKind, Result,
  contact::{Contact, ContactStatus, NewContact},
  id::IdGenerator,
  mail::Mailer,
  store::ContactRepository,
  validate::{ValidationError, Validator},
};

/// Shown to the submitter after a successful submission.
pub const THANK_YOU_MESSAGE: &str =
  "Thank you for your message! We'll get back to you within 24 hours.";

// ─── Request / response ──────────────────────────────────────────────────────

/// A contact-form submission as the application sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
  pub name:    String,
  pub company: String,
  pub email:   String,
  pub message: String,
  pub subject: String,
}

impl From<ContactSubmission> for NewContact {
  fn from(s: ContactSubmission) -> Self {
    NewContact {
      name:    s.name,
      company: s.company,
      email:   s.email,
      message: s.message,
      subject: s.subject,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactFormResponse {
  pub id:      String,
  pub message: String,
  pub success: bool,
}

/// A best-effort pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
  Notification,
  Confirmation,
  StatusUpdate,
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Notification => "owner notification",
      Self::Confirmation => "confirmation email",
      Self::StatusUpdate => "status update",
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedStep {
  pub step:  Step,
  pub error: String,
}

/// Outcome of a submission that was durably saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
  pub response:     ContactFormResponse,
  pub failed_steps: Vec<FailedStep>,
}

impl SubmissionReport {
  /// `true` when every best-effort step succeeded as well.
  pub fn is_complete(&self) -> bool { self.failed_steps.is_empty() }

  pub fn failed(&self, step: Step) -> bool { self.failed_steps.iter().any(|f| f.step == step) }
}

#[derive(Debug, Error)]
pub enum SubmitError {
  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),

  #[error("failed to save contact: {0}")]
  Save(#[source] Error),
}

impl SubmitError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Validation(_) => ErrorKind::Validation,
      Self::Save(_) => ErrorKind::Internal,
    }
  }
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// Orchestrates contact submissions over a repository and a mailer.
pub struct ContactService<R, M> {
  repo:      Arc<R>,
  mailer:    Arc<M>,
  validator: Arc<dyn Validator>,
  ids:       Arc<dyn IdGenerator>,
}

impl<R, M> Clone for ContactService<R, M> {
  fn clone(&self) -> Self {
    Self {
      repo:      Arc::clone(&self.repo),
      mailer:    Arc::clone(&self.mailer),
      validator: Arc::clone(&self.validator),
      ids:       Arc::clone(&self.ids),
    }
  }
}

impl<R, M> ContactService<R, M>
where
  R: ContactRepository,
  M: Mailer,
{
  pub fn new(
    repo: Arc<R>,
    mailer: Arc<M>,
    validator: Arc<dyn Validator>,
    ids: Arc<dyn IdGenerator>,
  ) -> Self {
    Self { repo, mailer, validator, ids }
  }

  pub fn repository(&self) -> &R { &self.repo }

  /// Run the full submission pipeline.
  pub async fn submit(
    &self,
    submission: ContactSubmission,
  ) -> Result<SubmissionReport, SubmitError> {
    let mut contact =
      match Contact::new(submission.into(), self.validator.as_ref(), self.ids.as_ref()) {
        Ok(c) => c,
        Err(e) => {
          warn!(field = e.field, error = %e, "contact submission rejected");
          return Err(SubmitError::Validation(e));
        }
      };

    if let Err(e) = self.repo.save(&contact).await {
      error!(
        contact_id = contact.id(),
        email = contact.email(),
        company = contact.company(),
        error = %e,
        "failed to save contact",
      );
      return Err(SubmitError::Save(e));
    }
    info!(
      contact_id = contact.id(),
      email = contact.email(),
      company = contact.company(),
      "contact saved",
    );

    let mut failed_steps = Vec::new();

    match self.mailer.send_contact_notification(&contact).await {
      Ok(()) => info!(contact_id = contact.id(), "owner notification sent"),
      Err(e) => {
        warn!(
          contact_id = contact.id(),
          email = contact.email(),
          error = %e,
          "failed to send owner notification",
        );
        failed_steps.push(FailedStep { step: Step::Notification, error: e.to_string() });
      }
    }

    match self.mailer.send_confirmation_email(&contact).await {
      Ok(()) => info!(contact_id = contact.id(), email = contact.email(), "confirmation sent"),
      Err(e) => {
        warn!(
          contact_id = contact.id(),
          email = contact.email(),
          error = %e,
          "failed to send confirmation email",
        );
        failed_steps.push(FailedStep { step: Step::Confirmation, error: e.to_string() });
      }
    }

    contact.mark_as_processed();
    match self.repo.update(&contact).await {
      Ok(()) => info!(contact_id = contact.id(), status = %contact.status(), "contact processed"),
      Err(e) => {
        warn!(contact_id = contact.id(), error = %e, "failed to store processed status");
        failed_steps.push(FailedStep { step: Step::StatusUpdate, error: e.to_string() });
      }
    }

    Ok(SubmissionReport {
      response: ContactFormResponse {
        id:      contact.id().to_owned(),
        message: THANK_YOU_MESSAGE.to_owned(),
        success: true,
      },
      failed_steps,
    })
  }

  // ── Reads and erasure ─────────────────────────────────────────────────

  pub async fn get_contact(&self, id: &str) -> Result<Contact> { self.repo.find_by_id(id).await }

  pub async fn list_contacts(
    &self,
    status: Option<ContactStatus>,
    limit: usize,
    offset: usize,
  ) -> Result<Vec<Contact>> {
    self.repo.find_all(status, limit, offset).await
  }

  pub async fn count_contacts(&self, status: Option<ContactStatus>) -> Result<usize> {
    self.repo.count(status).await
  }

  /// Permanently remove a contact (right to erasure).
  pub async fn erase_contact(&self, id: &str) -> Result<()> {
    self.repo.delete(id).await?;
    info!(contact_id = id, "contact erased");
    Ok(())
  }
}
