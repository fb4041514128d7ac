//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (nanosecond
//! precision, `Z` suffix) so that lexical order matches time order. Nested
//! collections are stored as compact JSON.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use folio_core::{
  contact::{Contact, ContactRecord, ContactStatus},
  experience::Experience,
  service::{Service, ServiceCategory},
  technology::{Level, Technology},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Nanos, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

fn decode_opt_dt(s: Option<String>) -> Result<Option<DateTime<Utc>>> {
  s.as_deref().map(decode_dt).transpose()
}

// ─── Enums ───────────────────────────────────────────────────────────────────

fn decode_enum<T: FromStr>(column: &'static str, value: String) -> Result<T> {
  value.parse().map_err(|_| Error::Decode { column, value })
}

pub fn encode_status(s: ContactStatus) -> &'static str { s.as_str() }

pub fn encode_level(l: Level) -> &'static str { l.as_str() }

pub fn encode_category(c: ServiceCategory) -> &'static str { c.as_str() }

// ─── JSON ────────────────────────────────────────────────────────────────────

pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
  Ok(serde_json::to_string(value)?)
}

fn decode_json<T: DeserializeOwned>(s: &str) -> Result<T> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

pub const CONTACT_COLUMNS: &str =
  "id, name, email, company, message, subject, status, source, created_at, processed_at";

/// Raw strings read directly from a `contacts` row.
pub struct RawContact {
  pub id:           String,
  pub name:         String,
  pub email:        String,
  pub company:      String,
  pub message:      String,
  pub subject:      String,
  pub status:       String,
  pub source:       String,
  pub created_at:   String,
  pub processed_at: Option<String>,
}

impl RawContact {
  /// Expects the columns in [`CONTACT_COLUMNS`] order.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      name:         row.get(1)?,
      email:        row.get(2)?,
      company:      row.get(3)?,
      message:      row.get(4)?,
      subject:      row.get(5)?,
      status:       row.get(6)?,
      source:       row.get(7)?,
      created_at:   row.get(8)?,
      processed_at: row.get(9)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact::restore(ContactRecord {
      id:           self.id,
      name:         self.name,
      company:      self.company,
      email:        self.email,
      message:      self.message,
      subject:      self.subject,
      status:       decode_enum("contacts.status", self.status)?,
      source:       self.source,
      submitted_at: decode_dt(&self.created_at)?,
      processed_at: decode_opt_dt(self.processed_at)?,
    }))
  }
}

pub const TECHNOLOGY_COLUMNS: &str =
  "id, name, category, icon_url, level, description, created_at, updated_at";

pub struct RawTechnology {
  pub id:          String,
  pub name:        String,
  pub category:    String,
  pub icon_url:    Option<String>,
  pub level:       String,
  pub description: Option<String>,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawTechnology {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      category:    row.get(2)?,
      icon_url:    row.get(3)?,
      level:       row.get(4)?,
      description: row.get(5)?,
      created_at:  row.get(6)?,
      updated_at:  row.get(7)?,
    })
  }

  pub fn into_technology(self) -> Result<Technology> {
    Ok(Technology {
      id:          self.id,
      name:        self.name,
      category:    self.category,
      icon_url:    self.icon_url,
      level:       decode_enum::<Level>("technologies.level", self.level)?,
      description: self.description,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub const EXPERIENCE_COLUMNS: &str = "id, company_name, position, description, location, \
                                      start_date, end_date, is_remote, technologies, \
                                      achievements, created_at, updated_at";

pub struct RawExperience {
  pub id:           String,
  pub company_name: String,
  pub position:     String,
  pub description:  String,
  pub location:     String,
  pub start_date:   String,
  pub end_date:     Option<String>,
  pub is_remote:    bool,
  pub technologies: String,
  pub achievements: String,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawExperience {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      company_name: row.get(1)?,
      position:     row.get(2)?,
      description:  row.get(3)?,
      location:     row.get(4)?,
      start_date:   row.get(5)?,
      end_date:     row.get(6)?,
      is_remote:    row.get(7)?,
      technologies: row.get(8)?,
      achievements: row.get(9)?,
      created_at:   row.get(10)?,
      updated_at:   row.get(11)?,
    })
  }

  pub fn into_experience(self) -> Result<Experience> {
    Ok(Experience {
      id:           self.id,
      company_name: self.company_name,
      position:     self.position,
      description:  self.description,
      location:     self.location,
      start_date:   decode_dt(&self.start_date)?,
      end_date:     decode_opt_dt(self.end_date)?,
      is_remote:    self.is_remote,
      technologies: decode_json(&self.technologies)?,
      achievements: decode_json(&self.achievements)?,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}

pub const SERVICE_COLUMNS: &str = "id, name, description, category, duration, pricing, \
                                   technologies, deliverables, is_active, created_at, updated_at";

pub struct RawService {
  pub id:           String,
  pub name:         String,
  pub description:  String,
  pub category:     String,
  pub duration:     Option<String>,
  pub pricing:      Option<String>,
  pub technologies: String,
  pub deliverables: String,
  pub is_active:    bool,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawService {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      name:         row.get(1)?,
      description:  row.get(2)?,
      category:     row.get(3)?,
      duration:     row.get(4)?,
      pricing:      row.get(5)?,
      technologies: row.get(6)?,
      deliverables: row.get(7)?,
      is_active:    row.get(8)?,
      created_at:   row.get(9)?,
      updated_at:   row.get(10)?,
    })
  }

  pub fn into_service(self) -> Result<Service> {
    Ok(Service {
      id:           self.id,
      name:         self.name,
      description:  self.description,
      category:     decode_enum::<ServiceCategory>("services.category", self.category)?,
      duration:     self.duration,
      pricing:      self.pricing.as_deref().map(decode_json).transpose()?,
      technologies: decode_json(&self.technologies)?,
      deliverables: decode_json(&self.deliverables)?,
      is_active:    self.is_active,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}
