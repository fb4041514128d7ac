//! Technology: a skill or tool shown in the portfolio catalog.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  validate::{StringField, ValidationError},
};

/// Proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Beginner,
  Intermediate,
  Advanced,
  Expert,
}

impl Level {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Beginner => "beginner",
      Self::Intermediate => "intermediate",
      Self::Advanced => "advanced",
      Self::Expert => "expert",
    }
  }
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Level {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "beginner" => Ok(Self::Beginner),
      "intermediate" => Ok(Self::Intermediate),
      "advanced" => Ok(Self::Advanced),
      "expert" => Ok(Self::Expert),
      other => Err(Error::invalid_input(format!("invalid technology level: {other:?}"))),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
  pub id:          String,
  pub name:        String,
  pub category:    String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub icon_url:    Option<String>,
  pub level:       Level,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

impl Technology {
  /// Validate and build a technology. Name 2–100 characters, category at
  /// most 50.
  pub fn new(
    id: impl Into<String>,
    name: &str,
    category: &str,
    level: Level,
  ) -> Result<Self, ValidationError> {
    let name = StringField::new("technology name", name)
      .required()
      .min_len(2)
      .max_len(100)
      .validate()?;
    let category = StringField::new("category", category).required().max_len(50).validate()?;
    let now = Utc::now();
    Ok(Self {
      id: id.into(),
      name,
      category,
      icon_url: None,
      level,
      description: None,
      created_at: now,
      updated_at: now,
    })
  }

  pub fn update_level(&mut self, level: Level) {
    self.level = level;
    self.touch();
  }

  pub fn set_description(&mut self, description: impl Into<String>) {
    self.description = Some(description.into());
    self.touch();
  }

  pub fn set_icon_url(&mut self, url: impl Into<String>) {
    self.icon_url = Some(url.into());
    self.touch();
  }

  fn touch(&mut self) { self.updated_at = Utc::now(); }
}

/// Filter for [`CatalogRepository::list_technologies`](crate::store::CatalogRepository::list_technologies).
#[derive(Debug, Clone, Default)]
pub struct TechnologyFilter {
  pub category: Option<String>,
  pub level:    Option<Level>,
}

impl TechnologyFilter {
  pub fn matches(&self, tech: &Technology) -> bool {
    self.category.as_deref().is_none_or(|c| tech.category == c)
      && self.level.is_none_or(|l| tech.level == l)
  }
}
