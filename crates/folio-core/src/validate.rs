//! Input normalisation and validation.
//!
//! Every free-text field that enters the domain passes through a
//! [`StringField`]: the value is trimmed, then checked against fixed
//! required / minimum / maximum rules. Lengths are counted in Unicode scalar
//! values, not bytes.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[^@\s]+@[^@\s]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

// ─── Error ───────────────────────────────────────────────────────────────────

/// The rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
  Required,
  TooShort { min: usize },
  TooLong { max: usize },
  Format,
}

/// A validation failure naming the offending field and the rule it broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
  pub field: &'static str,
  pub rule:  Rule,
}

impl ValidationError {
  pub fn new(field: &'static str, rule: Rule) -> Self { Self { field, rule } }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.rule {
      Rule::Required => write!(f, "{} is required", self.field),
      Rule::TooShort { min } => {
        write!(f, "{} must be at least {min} characters long", self.field)
      }
      Rule::TooLong { max } => {
        write!(f, "{} must be at most {max} characters long", self.field)
      }
      Rule::Format => write!(f, "{} has an invalid format", self.field),
    }
  }
}

// ─── Field builder ───────────────────────────────────────────────────────────

/// Builder-style validator for a single string field.
///
/// ```
/// use folio_core::validate::StringField;
///
/// let name = StringField::new("name", "  Ada  ").required().min_len(2).validate();
/// assert_eq!(name.unwrap(), "Ada");
/// ```
#[derive(Debug, Clone)]
pub struct StringField<'a> {
  field:    &'static str,
  raw:      &'a str,
  required: bool,
  min:      Option<usize>,
  max:      Option<usize>,
}

impl<'a> StringField<'a> {
  pub fn new(field: &'static str, raw: &'a str) -> Self {
    Self { field, raw, required: false, min: None, max: None }
  }

  pub fn required(mut self) -> Self {
    self.required = true;
    self
  }

  pub fn min_len(mut self, min: usize) -> Self {
    self.min = Some(min);
    self
  }

  pub fn max_len(mut self, max: usize) -> Self {
    self.max = Some(max);
    self
  }

  /// Trim the value and apply the configured rules.
  ///
  /// An empty optional field is accepted as-is; the minimum length only
  /// applies once something was entered.
  pub fn validate(self) -> Result<String, ValidationError> {
    let value = self.raw.trim();
    let len = value.chars().count();

    if value.is_empty() {
      if self.required {
        return Err(ValidationError::new(self.field, Rule::Required));
      }
      return Ok(String::new());
    }
    if let Some(min) = self.min
      && len < min
    {
      return Err(ValidationError::new(self.field, Rule::TooShort { min }));
    }
    if let Some(max) = self.max
      && len > max
    {
      return Err(ValidationError::new(self.field, Rule::TooLong { max }));
    }

    Ok(value.to_owned())
  }
}

// ─── Validator capability ────────────────────────────────────────────────────

/// The rules applied to contact-form input.
///
/// Injected into [`Contact::new`](crate::contact::Contact::new) so tests can
/// substitute their own rules. Each method returns the normalised value.
pub trait Validator: Send + Sync {
  fn name(&self, raw: &str) -> Result<String, ValidationError>;
  fn company(&self, raw: &str) -> Result<String, ValidationError>;
  fn email(&self, raw: &str) -> Result<String, ValidationError>;
  fn message(&self, raw: &str) -> Result<String, ValidationError>;
  fn subject(&self, raw: &str) -> Result<String, ValidationError>;
}

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const COMPANY_MAX: usize = 100;
pub const MESSAGE_MIN: usize = 10;
pub const MESSAGE_MAX: usize = 2000;
pub const SUBJECT_MAX: usize = 200;

/// Fixed-threshold contact rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactRules;

impl Validator for ContactRules {
  fn name(&self, raw: &str) -> Result<String, ValidationError> {
    // A blank name is reported as too short, like any other short name.
    StringField::new("name", raw)
      .min_len(NAME_MIN)
      .max_len(NAME_MAX)
      .validate()
      .and_then(|v| {
        if v.is_empty() {
          Err(ValidationError::new("name", Rule::TooShort { min: NAME_MIN }))
        } else {
          Ok(v)
        }
      })
  }

  fn company(&self, raw: &str) -> Result<String, ValidationError> {
    StringField::new("company", raw).max_len(COMPANY_MAX).validate()
  }

  fn email(&self, raw: &str) -> Result<String, ValidationError> {
    let email = StringField::new("email", raw).required().validate()?.to_lowercase();
    if !EMAIL_PATTERN.is_match(&email) {
      return Err(ValidationError::new("email", Rule::Format));
    }
    Ok(email)
  }

  fn message(&self, raw: &str) -> Result<String, ValidationError> {
    StringField::new("message", raw)
      .required()
      .min_len(MESSAGE_MIN)
      .max_len(MESSAGE_MAX)
      .validate()
      .map_err(|e| match e.rule {
        Rule::Required => {
          ValidationError::new("message", Rule::TooShort { min: MESSAGE_MIN })
        }
        _ => e,
      })
  }

  fn subject(&self, raw: &str) -> Result<String, ValidationError> {
    StringField::new("subject", raw).max_len(SUBJECT_MAX).validate()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn string_field_trims_and_accepts() {
    let v = StringField::new("name", "  Grace Hopper \n")
      .required()
      .min_len(2)
      .max_len(100)
      .validate()
      .unwrap();
    assert_eq!(v, "Grace Hopper");
  }

  #[test]
  fn string_field_required_rejects_whitespace() {
    let err = StringField::new("category", "   ").required().validate().unwrap_err();
    assert_eq!(err, ValidationError::new("category", Rule::Required));
    assert_eq!(err.to_string(), "category is required");
  }

  #[test]
  fn optional_empty_field_skips_min_length() {
    let v = StringField::new("company", "").min_len(5).validate().unwrap();
    assert_eq!(v, "");
  }

  #[test]
  fn lengths_count_characters_not_bytes() {
    // Ten two-byte characters.
    let raw = "éééééééééé";
    assert!(ContactRules.message(raw).is_ok());
    let too_long = "é".repeat(101);
    assert_eq!(
      ContactRules.name(&too_long).unwrap_err().rule,
      Rule::TooLong { max: 100 }
    );
  }

  #[test]
  fn name_bounds() {
    assert_eq!(ContactRules.name("A").unwrap_err().field, "name");
    assert_eq!(ContactRules.name("  ").unwrap_err().rule, Rule::TooShort { min: 2 });
    assert_eq!(ContactRules.name("Al").unwrap(), "Al");
    assert!(ContactRules.name(&"x".repeat(100)).is_ok());
    assert!(ContactRules.name(&"x".repeat(101)).is_err());
  }

  #[test]
  fn email_is_normalised() {
    assert_eq!(ContactRules.email("  A@B.COM ").unwrap(), "a@b.com");
  }

  #[test]
  fn email_rejects_bad_shapes() {
    for bad in ["invalid-email", "a@b", "a b@c.com", "a@b.c", "@b.com", "a@@b.com", ""] {
      let err = ContactRules.email(bad).unwrap_err();
      assert_eq!(err.field, "email", "{bad:?}");
    }
  }

  #[test]
  fn message_bounds() {
    assert!(ContactRules.message("Short").is_err());
    assert!(ContactRules.message("123456789").is_err());
    assert!(ContactRules.message("1234567890").is_ok());
    assert!(ContactRules.message(&"m".repeat(2000)).is_ok());
    assert_eq!(
      ContactRules.message(&"m".repeat(2001)).unwrap_err().rule,
      Rule::TooLong { max: 2000 }
    );
  }

  #[test]
  fn company_is_optional_but_bounded() {
    assert_eq!(ContactRules.company("").unwrap(), "");
    assert!(ContactRules.company(&"c".repeat(101)).is_err());
  }
}
