//! `POST /contact`, the contact form endpoint.
//!
//! Accepts `application/json` or `application/x-www-form-urlencoded`. The
//! body is checked against the binding rules on [`ContactFormRequest`] before
//! the submission reaches [`ContactService`](folio_core::application::ContactService).

use axum::{
  Form, Json,
  extract::{FromRequest, Request, State},
  http::header,
};
use folio_core::{
  application::{ContactFormResponse, ContactSubmission},
  mail::Mailer,
  store::{CatalogRepository, ContactRepository},
};
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use crate::{AppState, error::FormError};

/// The form as posted.
///
/// These length limits apply to the raw input, before the domain rules trim
/// it; padding counts against the maximum here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactFormRequest {
  #[validate(length(min = 2, max = 100))]
  pub name:    String,
  #[serde(default)]
  #[validate(length(max = 100))]
  pub company: String,
  #[validate(email)]
  pub email:   String,
  #[validate(length(min = 10, max = 2000))]
  pub project: String,
}

impl From<ContactFormRequest> for ContactSubmission {
  fn from(form: ContactFormRequest) -> Self {
    ContactSubmission {
      name:    form.name,
      company: form.company,
      email:   form.email,
      message: form.project,
      subject: String::new(),
    }
  }
}

/// Extractor for a bound and validated [`ContactFormRequest`].
pub struct ContactForm(pub ContactFormRequest);

impl<S> FromRequest<S> for ContactForm
where
  S: Send + Sync,
{
  type Rejection = FormError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let is_form = req
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    let form = if is_form {
      let Form(form) = Form::<ContactFormRequest>::from_request(req, state)
        .await
        .map_err(|e| FormError::Malformed(e.body_text()))?;
      form
    } else {
      let Json(form) = Json::<ContactFormRequest>::from_request(req, state)
        .await
        .map_err(|e| FormError::Malformed(e.body_text()))?;
      form
    };

    if let Err(errors) = form.validate() {
      warn!(error = %errors, "contact form failed binding validation");
      return Err(errors.into());
    }
    Ok(Self(form))
  }
}

/// `POST /contact`
pub async fn submit<R, C, M>(
  State(state): State<AppState<R, C, M>>,
  ContactForm(form): ContactForm,
) -> Result<Json<ContactFormResponse>, FormError>
where
  R: ContactRepository,
  C: CatalogRepository,
  M: Mailer,
{
  let report = state.contacts.submit(form.into()).await?;

  if report.is_complete() {
    info!(contact_id = %report.response.id, "contact form submitted");
  } else {
    let failed: Vec<String> = report.failed_steps.iter().map(|f| f.step.to_string()).collect();
    warn!(
      contact_id = %report.response.id,
      failed_steps = ?failed,
      "contact form saved; some follow-up steps failed",
    );
  }
  Ok(Json(report.response))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn form() -> ContactFormRequest {
    ContactFormRequest {
      name:    "John Doe".into(),
      company: String::new(),
      email:   "john.doe@example.com".into(),
      project: "We need a security review.".into(),
    }
  }

  #[test]
  fn binding_rules() {
    assert!(form().validate().is_ok());

    let short_name = ContactFormRequest { name: "J".into(), ..form() };
    assert!(short_name.validate().unwrap_err().field_errors().contains_key("name"));

    let bad_email = ContactFormRequest { email: "invalid-email".into(), ..form() };
    assert!(bad_email.validate().unwrap_err().field_errors().contains_key("email"));

    let short_project = ContactFormRequest { project: "Short".into(), ..form() };
    assert!(short_project.validate().unwrap_err().field_errors().contains_key("project"));

    let long_company = ContactFormRequest { company: "x".repeat(101), ..form() };
    assert!(long_company.validate().unwrap_err().field_errors().contains_key("company"));
  }

  #[test]
  fn limits_count_untrimmed_input() {
    let padded = ContactFormRequest { project: format!(" {} ", "x".repeat(2000)), ..form() };
    assert!(padded.validate().unwrap_err().field_errors().contains_key("project"));

    let exact = ContactFormRequest { project: "x".repeat(2000), ..form() };
    assert!(exact.validate().is_ok());
  }

  #[test]
  fn project_becomes_message() {
    let submission = ContactSubmission::from(form());
    assert_eq!(submission.message, "We need a security review.");
    assert!(submission.subject.is_empty());
  }
}
