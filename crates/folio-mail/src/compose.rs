//! Message composition. Pure functions; nothing here touches the network.

use askama::Template;
use folio_core::contact::Contact;

use crate::Result;

/// A rendered message ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composed {
  pub subject: String,
  pub text:    String,
  /// Optional HTML alternative to `text`.
  pub html:    Option<String>,
}

#[derive(Template)]
#[template(path = "notification.txt")]
struct NotificationText<'a> {
  id:           &'a str,
  name:         &'a str,
  company:      &'a str,
  email:        &'a str,
  subject:      &'a str,
  message:      &'a str,
  submitted_at: String,
}

#[derive(Template)]
#[template(path = "confirmation.txt")]
struct ConfirmationText<'a> {
  name:         &'a str,
  message:      &'a str,
  submitted_on: String,
  owner_name:   &'a str,
  owner_email:  &'a str,
}

#[derive(Template)]
#[template(path = "confirmation.html")]
struct ConfirmationHtml<'a> {
  name:         &'a str,
  message:      &'a str,
  submitted_on: String,
  owner_name:   &'a str,
  owner_email:  &'a str,
}

pub fn notification_subject(contact: &Contact) -> String {
  format!("New Contact Form Submission - {}", contact.name())
}

pub fn confirmation_subject(owner_name: &str) -> String {
  format!("Thank you for contacting {owner_name}")
}

/// Plaintext message telling the owner about a new submission.
pub fn notification(contact: &Contact) -> Result<Composed> {
  let company = if contact.company().is_empty() { "-" } else { contact.company() };
  let text = NotificationText {
    id: contact.id(),
    name: contact.name(),
    company,
    email: contact.email(),
    subject: contact.subject(),
    message: contact.message(),
    submitted_at: contact.submitted_at().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
  }
  .render()?;

  Ok(Composed { subject: notification_subject(contact), text, html: None })
}

/// Plaintext + HTML confirmation for the submitter. `owner_email` is shown as
/// the direct contact address.
pub fn confirmation(contact: &Contact, owner_name: &str, owner_email: &str) -> Result<Composed> {
  let submitted_on = contact.submitted_at().format("%B %-d, %Y").to_string();
  let text = ConfirmationText {
    name: contact.name(),
    message: contact.message(),
    submitted_on: submitted_on.clone(),
    owner_name,
    owner_email,
  }
  .render()?;
  let html = ConfirmationHtml {
    name: contact.name(),
    message: contact.message(),
    submitted_on,
    owner_name,
    owner_email,
  }
  .render()?;

  Ok(Composed { subject: confirmation_subject(owner_name), text, html: Some(html) })
}

#[cfg(test)]
mod tests {
  use folio_core::{
    contact::NewContact,
    id::SequentialIds,
    validate::ContactRules,
  };

  use super::*;

  fn contact(message: &str) -> Contact {
    Contact::new(
      NewContact {
        name:    "John Doe".into(),
        company: "Test Corp".into(),
        email:   "john.doe@example.com".into(),
        message: message.into(),
        subject: String::new(),
      },
      &ContactRules,
      &SequentialIds::new("contact"),
    )
    .unwrap()
  }

  #[test]
  fn notification_lists_every_field() {
    let c = contact("Need help with a custody integration.");
    let m = notification(&c).unwrap();

    assert_eq!(m.subject, "New Contact Form Submission - John Doe");
    assert!(m.html.is_none());
    for needle in [
      "Name: John Doe",
      "Company: Test Corp",
      "Email: john.doe@example.com",
      "Need help with a custody integration.",
      "Contact ID: contact-1",
      "Submitted at: ",
      "Please respond within 24 hours.",
    ] {
      assert!(m.text.contains(needle), "missing {needle:?} in:\n{}", m.text);
    }
    assert!(!m.text.contains("Subject:"));
  }

  #[test]
  fn confirmation_has_text_and_html() {
    let c = contact("Need help with a custody integration.");
    let m = confirmation(&c, "Jane Owner", "jane@example.com").unwrap();

    assert_eq!(m.subject, "Thank you for contacting Jane Owner");
    assert!(m.text.starts_with("Dear John Doe,"));
    assert!(m.text.contains("jane@example.com"));
    let html = m.html.unwrap();
    assert!(html.contains("<p>Dear John Doe,</p>"));
  }

  #[test]
  fn confirmation_html_escapes_user_input() {
    let c = contact("<script>alert('x')</script> please call me");
    let m = confirmation(&c, "Jane Owner", "jane@example.com").unwrap();

    let html = m.html.unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    // The plaintext part is not escaped.
    assert!(m.text.contains("<script>"));
  }
}
