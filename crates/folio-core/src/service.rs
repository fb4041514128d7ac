//! Service: a professional offering listed on the site.
//!
//! Not to be confused with [`ContactService`](crate::application::ContactService),
//! the application service that handles form submissions.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  technology::Technology,
  validate::{StringField, ValidationError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
  Consulting,
  Development,
  Architecture,
  Auditing,
  Training,
  Mentoring,
}

impl ServiceCategory {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Consulting => "consulting",
      Self::Development => "development",
      Self::Architecture => "architecture",
      Self::Auditing => "auditing",
      Self::Training => "training",
      Self::Mentoring => "mentoring",
    }
  }
}

impl fmt::Display for ServiceCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ServiceCategory {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "consulting" => Ok(Self::Consulting),
      "development" => Ok(Self::Development),
      "architecture" => Ok(Self::Architecture),
      "auditing" => Ok(Self::Auditing),
      "training" => Ok(Self::Training),
      "mentoring" => Ok(Self::Mentoring),
      other => Err(Error::invalid_input(format!("invalid service category: {other:?}"))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingKind {
  Hourly,
  Daily,
  Project,
  Retainer,
  Custom,
}

impl PricingKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Hourly => "hourly",
      Self::Daily => "daily",
      Self::Project => "project",
      Self::Retainer => "retainer",
      Self::Custom => "custom",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInfo {
  #[serde(rename = "type")]
  pub kind:        PricingKind,
  #[serde(default)]
  pub amount:      f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub currency:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deliverable {
  pub id:          String,
  pub name:        String,
  pub description: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timeline:    Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
  pub id:           String,
  pub name:         String,
  pub description:  String,
  pub category:     ServiceCategory,
  /// Free text, e.g. "3-6 months".
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub duration:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pricing:      Option<PricingInfo>,
  #[serde(default)]
  pub technologies: Vec<Technology>,
  #[serde(default)]
  pub deliverables: Vec<Deliverable>,
  pub is_active:    bool,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

impl Service {
  /// New services start active.
  pub fn new(
    id: impl Into<String>,
    name: &str,
    description: &str,
    category: ServiceCategory,
  ) -> Result<Self, ValidationError> {
    let name = StringField::new("service name", name).required().min_len(2).max_len(100).validate()?;
    let description = StringField::new("service description", description)
      .required()
      .max_len(2000)
      .validate()?;
    let now = Utc::now();
    Ok(Self {
      id: id.into(),
      name,
      description,
      category,
      duration: None,
      pricing: None,
      technologies: Vec::new(),
      deliverables: Vec::new(),
      is_active: true,
      created_at: now,
      updated_at: now,
    })
  }

  pub fn set_pricing(&mut self, pricing: PricingInfo) -> Result<()> {
    if !pricing.amount.is_finite() || pricing.amount < 0.0 {
      return Err(Error::invalid_input("pricing amount must be a finite, non-negative number"));
    }
    self.pricing = Some(pricing);
    self.touch();
    Ok(())
  }

  pub fn set_duration(&mut self, duration: impl Into<String>) {
    self.duration = Some(duration.into());
    self.touch();
  }

  pub fn add_deliverable(&mut self, deliverable: Deliverable) {
    self.deliverables.push(deliverable);
    self.touch();
  }

  pub fn add_technology(&mut self, technology: Technology) {
    self.technologies.push(technology);
    self.touch();
  }

  pub fn activate(&mut self) {
    self.is_active = true;
    self.touch();
  }

  pub fn deactivate(&mut self) {
    self.is_active = false;
    self.touch();
  }

  fn touch(&mut self) { self.updated_at = Utc::now(); }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn service() -> Service {
    Service::new("s-1", "Architecture review", "Two-week review", ServiceCategory::Architecture)
      .unwrap()
  }

  #[test]
  fn new_service_is_active() {
    assert!(service().is_active);
  }

  #[test]
  fn negative_pricing_is_rejected() {
    let mut s = service();
    let pricing = PricingInfo {
      kind:        PricingKind::Daily,
      amount:      -1.0,
      currency:    Some("EUR".into()),
      description: None,
    };
    assert!(s.set_pricing(pricing).is_err());
    assert!(s.pricing.is_none());
  }

  #[test]
  fn non_finite_pricing_is_rejected() {
    let mut s = service();
    for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
      let pricing = PricingInfo { kind: PricingKind::Project, amount, currency: None, description: None };
      assert!(s.set_pricing(pricing).is_err(), "{amount} accepted");
    }
    assert!(s.pricing.is_none());

    let free = PricingInfo { kind: PricingKind::Custom, amount: 0.0, currency: None, description: None };
    s.set_pricing(free).unwrap();
    assert_eq!(s.pricing.as_ref().map(|p| p.amount), Some(0.0));
  }

  #[test]
  fn deactivate_touches_updated_at() {
    let mut s = service();
    let before = s.updated_at;
    s.deactivate();
    assert!(!s.is_active);
    assert!(s.updated_at >= before);
  }

  #[test]
  fn pricing_kind_serialises_as_type() {
    let p = PricingInfo { kind: PricingKind::Hourly, amount: 150.0, currency: None, description: None };
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json["type"], "hourly");
  }

  #[test]
  fn category_round_trips_through_str() {
    for c in [ServiceCategory::Consulting, ServiceCategory::Mentoring] {
      assert_eq!(c.as_str().parse::<ServiceCategory>().unwrap(), c);
    }
  }
}
