//! Contact: one contact-form submission and its processing status.
//!
//! A contact is validated once, at construction, and afterwards only changes
//! through its lifecycle methods. Every lifecycle method stamps
//! `processed_at`; none of them re-runs validation.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  id::IdGenerator,
  validate::{ContactRules, ValidationError, Validator},
};

/// Origin tag applied when the caller does not name one.
pub const DEFAULT_SOURCE: &str = "website";

// ─── Status ──────────────────────────────────────────────────────────────────

/// Processing state of a contact.
///
/// `new → read → replied`, with `processed` set by the submission pipeline
/// and `archived` reachable from anywhere. Transitions are not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
  #[default]
  #[serde(alias = "pending")]
  New,
  Read,
  Processed,
  Replied,
  Archived,
}

impl ContactStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::New => "new",
      Self::Read => "read",
      Self::Processed => "processed",
      Self::Replied => "replied",
      Self::Archived => "archived",
    }
  }
}

impl fmt::Display for ContactStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Returned when a status string is not one of the known states.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contact status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for ContactStatus {
  type Err = UnknownStatus;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "new" | "pending" => Ok(Self::New),
      "read" => Ok(Self::Read),
      "processed" => Ok(Self::Processed),
      "replied" => Ok(Self::Replied),
      "archived" => Ok(Self::Archived),
      other => Err(UnknownStatus(other.to_owned())),
    }
  }
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// Raw, unvalidated contact input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewContact {
  pub name:    String,
  #[serde(default)]
  pub company: String,
  pub email:   String,
  pub message: String,
  #[serde(default)]
  pub subject: String,
}

/// Every stored field of a contact; used by backends to rehydrate rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
  pub id:           String,
  pub name:         String,
  pub company:      String,
  pub email:        String,
  pub message:      String,
  pub subject:      String,
  pub status:       ContactStatus,
  pub source:       String,
  pub submitted_at: DateTime<Utc>,
  pub processed_at: Option<DateTime<Utc>>,
}

// ─── Entity ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
  id:           String,
  name:         String,
  #[serde(skip_serializing_if = "String::is_empty")]
  company:      String,
  email:        String,
  message:      String,
  #[serde(skip_serializing_if = "String::is_empty")]
  subject:      String,
  status:       ContactStatus,
  source:       String,
  submitted_at: DateTime<Utc>,
  #[serde(skip_serializing_if = "Option::is_none")]
  processed_at: Option<DateTime<Utc>>,
}

impl Contact {
  /// Validate `input` and build a new contact in the initial state.
  pub fn new(
    input: NewContact,
    validator: &dyn Validator,
    ids: &dyn IdGenerator,
  ) -> Result<Self, ValidationError> {
    let name = validator.name(&input.name)?;
    let email = validator.email(&input.email)?;
    let message = validator.message(&input.message)?;
    let company = validator.company(&input.company)?;
    let subject = validator.subject(&input.subject)?;

    Ok(Self {
      id: ids.new_id(),
      name,
      company,
      email,
      message,
      subject,
      status: ContactStatus::New,
      source: DEFAULT_SOURCE.to_owned(),
      submitted_at: Utc::now(),
      processed_at: None,
    })
  }

  /// Rebuild a contact from stored fields without validating or
  /// generating anything.
  pub fn restore(record: ContactRecord) -> Self {
    Self {
      id:           record.id,
      name:         record.name,
      company:      record.company,
      email:        record.email,
      message:      record.message,
      subject:      record.subject,
      status:       record.status,
      source:       record.source,
      submitted_at: record.submitted_at,
      processed_at: record.processed_at,
    }
  }

  /// Override the origin tag (defaults to [`DEFAULT_SOURCE`]).
  pub fn with_source(mut self, source: impl Into<String>) -> Self {
    let source = source.into();
    if !source.trim().is_empty() {
      self.source = source.trim().to_owned();
    }
    self
  }

  pub fn id(&self) -> &str { &self.id }
  pub fn name(&self) -> &str { &self.name }
  pub fn company(&self) -> &str { &self.company }
  pub fn email(&self) -> &str { &self.email }
  pub fn message(&self) -> &str { &self.message }
  pub fn subject(&self) -> &str { &self.subject }
  pub fn status(&self) -> ContactStatus { self.status }
  pub fn source(&self) -> &str { &self.source }
  pub fn submitted_at(&self) -> DateTime<Utc> { self.submitted_at }
  pub fn processed_at(&self) -> Option<DateTime<Utc>> { self.processed_at }

  // ── Lifecycle ─────────────────────────────────────────────────────────

  pub fn mark_as_read(&mut self) { self.transition(ContactStatus::Read); }

  pub fn mark_as_processed(&mut self) { self.transition(ContactStatus::Processed); }

  pub fn mark_as_replied(&mut self) { self.transition(ContactStatus::Replied); }

  pub fn archive(&mut self) { self.transition(ContactStatus::Archived); }

  fn transition(&mut self, status: ContactStatus) {
    self.status = status;
    self.processed_at = Some(Utc::now());
  }

  // ── Validation ────────────────────────────────────────────────────────

  /// Re-check the current field values against the default rules.
  pub fn is_valid(&self) -> Result<(), ValidationError> { self.validate_with(&ContactRules) }

  pub fn validate_with(&self, validator: &dyn Validator) -> Result<(), ValidationError> {
    validator.name(&self.name)?;
    validator.email(&self.email)?;
    validator.message(&self.message)?;
    Ok(())
  }

  /// Expose every field as a [`ContactRecord`], e.g. for persistence.
  pub fn to_record(&self) -> ContactRecord {
    ContactRecord {
      id:           self.id.clone(),
      name:         self.name.clone(),
      company:      self.company.clone(),
      email:        self.email.clone(),
      message:      self.message.clone(),
      subject:      self.subject.clone(),
      status:       self.status,
      source:       self.source.clone(),
      submitted_at: self.submitted_at,
      processed_at: self.processed_at,
    }
  }
}
