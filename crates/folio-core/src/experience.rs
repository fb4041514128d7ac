//! Experience: a professional engagement with quantified achievements.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  technology::Technology,
  validate::{StringField, ValidationError},
};

// ─── Metrics ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageMetric {
  pub before:      f64,
  pub after:       f64,
  /// Percentage points gained.
  pub improvement: f64,
  pub unit:        String,
}

impl CoverageMetric {
  pub fn new(before: f64, after: f64) -> Self {
    Self { before, after, improvement: after - before, unit: "%".into() }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeMetric {
  /// Minutes.
  pub before:      u32,
  pub after:       u32,
  /// Percent reduction.
  pub improvement: f64,
  pub unit:        String,
}

impl TimeMetric {
  pub fn new(before_minutes: u32, after_minutes: u32) -> Self {
    let improvement = if before_minutes == 0 {
      0.0
    } else {
      (f64::from(before_minutes) - f64::from(after_minutes)) / f64::from(before_minutes) * 100.0
    };
    Self { before: before_minutes, after: after_minutes, improvement, unit: "minutes".into() }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityMetric {
  pub uptime:    f64,
  /// Mean time between failures, hours.
  pub mtbf:      u32,
  /// Mean time to recovery, minutes.
  pub mttr:      u32,
  /// Incidents per month.
  pub incidents: u32,
  pub unit:      String,
}

impl ReliabilityMetric {
  pub fn new(uptime: f64, mtbf: u32, mttr: u32, incidents: u32) -> Self {
    Self { uptime, mtbf, mttr, incidents, unit: "%".into() }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityMetric {
  /// Deployments per week.
  pub deployment_frequency: u32,
  /// Hours.
  pub lead_time:            u32,
  /// Hours.
  pub cycle_time:           u32,
  pub efficiency:           f64,
  pub unit:                 String,
}

impl ProductivityMetric {
  pub fn new(deployment_frequency: u32, lead_time: u32, cycle_time: u32, efficiency: f64) -> Self {
    Self { deployment_frequency, lead_time, cycle_time, efficiency, unit: "per week".into() }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostMetric {
  pub monthly_savings: f64,
  pub annual_savings:  f64,
  pub roi:             f64,
  /// Months.
  pub payback_period:  u32,
  pub unit:            String,
}

impl CostMetric {
  pub fn new(monthly_savings: f64, annual_savings: f64, roi: f64, payback_period: u32) -> Self {
    Self { monthly_savings, annual_savings, roi, payback_period, unit: "USD".into() }
  }
}

/// Optional quantified impact attached to an achievement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub test_coverage:      Option<CoverageMetric>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub deployment_time:    Option<TimeMetric>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub system_reliability: Option<ReliabilityMetric>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub productivity:       Option<ProductivityMetric>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cost_savings:       Option<CostMetric>,
}

// ─── Achievement ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
  pub id:          String,
  pub title:       String,
  pub description: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub impact:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub metrics:     Option<Metrics>,
  pub created_at:  DateTime<Utc>,
}

impl Achievement {
  pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      id:          id.into(),
      title:       title.into(),
      description: description.into(),
      impact:      None,
      metrics:     None,
      created_at:  Utc::now(),
    }
  }

  pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
    self.impact = Some(impact.into());
    self
  }

  pub fn with_metrics(mut self, metrics: Metrics) -> Self {
    self.metrics = Some(metrics);
    self
  }
}

// ─── Experience ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
  pub id:           String,
  pub company_name: String,
  pub position:     String,
  pub description:  String,
  pub location:     String,
  pub start_date:   DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end_date:     Option<DateTime<Utc>>,
  pub is_remote:    bool,
  #[serde(default)]
  pub technologies: Vec<Technology>,
  #[serde(default)]
  pub achievements: Vec<Achievement>,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

/// Input for [`Experience::new`].
#[derive(Debug, Clone)]
pub struct NewExperience {
  pub company_name: String,
  pub position:     String,
  pub description:  String,
  pub location:     String,
  pub start_date:   DateTime<Utc>,
  pub is_remote:    bool,
}

impl Experience {
  pub fn new(id: impl Into<String>, input: NewExperience) -> Result<Self, ValidationError> {
    let company_name = StringField::new("company name", &input.company_name)
      .required()
      .max_len(100)
      .validate()?;
    let position = StringField::new("position", &input.position).required().max_len(100).validate()?;
    let now = Utc::now();
    Ok(Self {
      id: id.into(),
      company_name,
      position,
      description: input.description.trim().to_owned(),
      location: input.location.trim().to_owned(),
      start_date: input.start_date,
      end_date: None,
      is_remote: input.is_remote,
      technologies: Vec::new(),
      achievements: Vec::new(),
      created_at: now,
      updated_at: now,
    })
  }

  /// An experience without an end date is ongoing.
  pub fn is_current(&self) -> bool { self.end_date.is_none() }

  /// Time from the start date to the end date, or to now if still ongoing.
  pub fn duration(&self) -> Duration { self.duration_at(Utc::now()) }

  /// [`duration`](Self::duration) measured against `now` for ongoing
  /// engagements.
  pub fn duration_at(&self, now: DateTime<Utc>) -> Duration {
    self.end_date.unwrap_or(now) - self.start_date
  }

  pub fn set_end_date(&mut self, end_date: DateTime<Utc>) -> Result<()> {
    if end_date < self.start_date {
      return Err(Error::invalid_input("end date cannot be before start date"));
    }
    self.end_date = Some(end_date);
    self.touch();
    Ok(())
  }

  pub fn add_achievement(&mut self, achievement: Achievement) {
    self.achievements.push(achievement);
    self.touch();
  }

  pub fn add_technology(&mut self, technology: Technology) {
    self.technologies.push(technology);
    self.touch();
  }

  fn touch(&mut self) { self.updated_at = Utc::now(); }
}
