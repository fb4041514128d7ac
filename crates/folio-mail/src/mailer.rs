//! [`SmtpMailer`], the production [`Mailer`].

use folio_core::{contact::Contact, mail::Mailer};
use lettre::{
  AsyncSmtpTransport, AsyncTransport as _, Message, Tokio1Executor,
  message::{Mailbox, MultiPart, SinglePart},
  transport::smtp::authentication::Credentials,
};
use tracing::{debug, info};

use crate::{
  EmailMode, Error, MailConfig, Result,
  compose::{self, Composed},
};

pub struct SmtpMailer {
  config:    MailConfig,
  from:      Mailbox,
  owner:     Mailbox,
  /// `None` in development mode.
  transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

fn mailbox(name: Option<&str>, address: &str) -> Result<Mailbox> {
  let parsed = address.trim().parse().map_err(|source| Error::Address {
    address: address.to_owned(),
    source,
  })?;
  Ok(Mailbox::new(name.map(str::to_owned), parsed))
}

impl SmtpMailer {
  /// Validate addresses and, in live mode, build the SMTP transport. No
  /// connection is opened until the first send.
  pub fn new(config: MailConfig) -> Result<Self> {
    let from = mailbox(Some(&config.owner_name), &config.from_email)?;
    let owner = mailbox(Some(&config.owner_name), &config.to_email)?;

    let transport = match config.mode {
      EmailMode::Development => None,
      EmailMode::Live => {
        let mut builder = if config.smtp_tls {
          AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        } else {
          AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        };
        builder = builder.port(config.smtp_port);
        if let Some(username) = &config.smtp_username {
          builder = builder.credentials(Credentials::new(
            username.clone(),
            config.smtp_password.clone().unwrap_or_default(),
          ));
        }
        Some(builder.build())
      }
    };

    debug!(mode = ?config.mode, host = %config.smtp_host, port = config.smtp_port, "mailer ready");
    Ok(Self { config, from, owner, transport })
  }

  pub fn mode(&self) -> EmailMode { self.config.mode }

  fn build(&self, to: Mailbox, composed: &Composed) -> Result<Message> {
    let builder = Message::builder()
      .from(self.from.clone())
      .to(to)
      .subject(composed.subject.clone());
    let message = match &composed.html {
      Some(html) => builder.multipart(MultiPart::alternative_plain_html(
        composed.text.clone(),
        html.clone(),
      ))?,
      None => builder.singlepart(SinglePart::plain(composed.text.clone()))?,
    };
    Ok(message)
  }

  async fn deliver(&self, to: Mailbox, composed: Composed) -> Result<()> {
    let message = self.build(to.clone(), &composed)?;
    match &self.transport {
      None => {
        info!(
          target: "folio::mail",
          to = %to,
          subject = %composed.subject,
          body = %composed.text,
          "email not sent (development mode)",
        );
      }
      Some(transport) => {
        transport.send(message).await?;
        info!(target: "folio::mail", to = %to, subject = %composed.subject, "email sent");
      }
    }
    Ok(())
  }
}

impl Mailer for SmtpMailer {
  type Error = Error;

  async fn send_contact_notification(&self, contact: &Contact) -> Result<()> {
    let composed = compose::notification(contact)?;
    self.deliver(self.owner.clone(), composed).await
  }

  async fn send_confirmation_email(&self, contact: &Contact) -> Result<()> {
    let to = mailbox(Some(contact.name()), contact.email())?;
    let composed =
      compose::confirmation(contact, &self.config.owner_name, &self.config.to_email)?;
    self.deliver(to, composed).await
  }
}

#[cfg(test)]
mod tests {
  use folio_core::{
    contact::{ContactRecord, NewContact},
    id::SequentialIds,
    validate::ContactRules,
  };

  use super::*;

  fn contact() -> Contact {
    Contact::new(
      NewContact {
        name:    "John Doe".into(),
        email:   "john.doe@example.com".into(),
        message: "Looking for an architecture review.".into(),
        ..Default::default()
      },
      &ContactRules,
      &SequentialIds::new("contact"),
    )
    .unwrap()
  }

  #[tokio::test]
  async fn development_mode_logs_instead_of_sending() {
    let mailer = SmtpMailer::new(MailConfig::default()).unwrap();
    assert_eq!(mailer.mode(), EmailMode::Development);
    assert!(mailer.transport.is_none());

    let c = contact();
    mailer.send_contact_notification(&c).await.unwrap();
    mailer.send_confirmation_email(&c).await.unwrap();
  }

  #[test]
  fn live_mode_builds_transport() {
    let config = MailConfig {
      mode: EmailMode::Live,
      smtp_tls: false,
      smtp_username: Some("user".into()),
      smtp_password: Some("secret".into()),
      ..Default::default()
    };
    let mailer = SmtpMailer::new(config).unwrap();
    assert!(mailer.transport.is_some());
  }

  #[test]
  fn invalid_from_address_is_rejected() {
    let config = MailConfig { from_email: "not an address".into(), ..Default::default() };
    let err = SmtpMailer::new(config).err().unwrap();
    assert!(matches!(err, Error::Address { ref address, .. } if address == "not an address"));
  }

  #[tokio::test]
  async fn unparseable_recipient_fails_confirmation() {
    let mailer = SmtpMailer::new(MailConfig::default()).unwrap();
    let c = Contact::restore(ContactRecord { email: "bad address".into(), ..contact().to_record() });
    let err = mailer.send_confirmation_email(&c).await.unwrap_err();
    assert!(matches!(err, Error::Address { .. }));
  }

  #[test]
  fn confirmation_message_is_multipart() {
    let mailer = SmtpMailer::new(MailConfig::default()).unwrap();
    let c = contact();
    let composed = compose::confirmation(&c, "Site Owner", "hello@example.com").unwrap();
    let to = mailbox(Some(c.name()), c.email()).unwrap();
    let formatted = String::from_utf8(mailer.build(to, &composed).unwrap().formatted()).unwrap();
    assert!(formatted.contains("multipart/alternative"));
    assert!(formatted.contains("Subject: Thank you for contacting Site Owner"));
  }
}
