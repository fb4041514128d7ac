//! Mail settings, deserialised from the `[mail]` configuration section.

use std::fmt;

use serde::Deserialize;

use crate::{Error, Result};

/// Whether messages are actually sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailMode {
  /// Compose and log; never touch the network.
  #[default]
  Development,
  /// Deliver over SMTP.
  #[serde(alias = "production")]
  Live,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
  pub mode:          EmailMode,
  pub smtp_host:     String,
  pub smtp_port:     u16,
  pub smtp_username: Option<String>,
  pub smtp_password: Option<String>,
  /// STARTTLS when `true`, plaintext otherwise.
  pub smtp_tls:      bool,
  pub from_email:    String,
  /// Where owner notifications go.
  pub to_email:      String,
  /// Signs confirmation emails.
  pub owner_name:    String,
}

impl Default for MailConfig {
  fn default() -> Self {
    Self {
      mode:          EmailMode::Development,
      smtp_host:     "localhost".into(),
      smtp_port:     587,
      smtp_username: None,
      smtp_password: None,
      smtp_tls:      true,
      from_email:    "hello@example.com".into(),
      to_email:      "hello@example.com".into(),
      owner_name:    "Site Owner".into(),
    }
  }
}

impl MailConfig {
  /// Parse `from_email` and `to_email` without building a transport.
  pub fn check_addresses(&self) -> Result<()> {
    for address in [&self.from_email, &self.to_email] {
      address
        .trim()
        .parse::<lettre::Address>()
        .map_err(|source| Error::Address { address: address.clone(), source })?;
    }
    Ok(())
  }
}

impl fmt::Debug for MailConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MailConfig")
      .field("mode", &self.mode)
      .field("smtp_host", &self.smtp_host)
      .field("smtp_port", &self.smtp_port)
      .field("smtp_username", &self.smtp_username)
      .field("smtp_password", &self.smtp_password.as_ref().map(|_| "<redacted>"))
      .field("smtp_tls", &self.smtp_tls)
      .field("from_email", &self.from_email)
      .field("to_email", &self.to_email)
      .field("owner_name", &self.owner_name)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn debug_redacts_password() {
    let config = MailConfig { smtp_password: Some("hunter2".into()), ..Default::default() };
    let debug = format!("{config:?}");
    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("<redacted>"));
  }

  #[test]
  fn check_addresses_names_the_bad_one() {
    assert!(MailConfig::default().check_addresses().is_ok());

    let config = MailConfig { to_email: "owner at example".into(), ..Default::default() };
    let err = config.check_addresses().unwrap_err();
    assert!(matches!(err, Error::Address { ref address, .. } if address == "owner at example"));
  }
}
