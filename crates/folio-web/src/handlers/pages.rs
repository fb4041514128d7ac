//! The homepage and the health probe.

use askama::Template;
use axum::{
  Json,
  extract::State,
  response::Html,
};
use folio_core::{
  experience::Experience,
  mail::Mailer,
  service::{PricingInfo, Service},
  store::{CatalogRepository, ContactRepository},
  technology::{Level, TechnologyFilter},
};
use serde::Serialize;
use tracing::warn;

use crate::{AppState, error::ApiError};

// ─── Health ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Health {
  pub status:  &'static str,
  pub version: &'static str,
}

/// `GET /health`
pub async fn health() -> Json<Health> {
  Json(Health { status: "healthy", version: env!("CARGO_PKG_VERSION") })
}

// ─── Homepage ─────────────────────────────────────────────────────────────────

pub struct ExperienceView {
  pub position:     String,
  pub company:      String,
  pub location:     String,
  pub period:       String,
  pub is_remote:    bool,
  pub description:  String,
  pub achievements: Vec<String>,
  pub technologies: Vec<String>,
}

impl From<&Experience> for ExperienceView {
  fn from(e: &Experience) -> Self {
    let end = match e.end_date {
      Some(end) => end.format("%b %Y").to_string(),
      None => "Present".to_owned(),
    };
    Self {
      position:     e.position.clone(),
      company:      e.company_name.clone(),
      location:     e.location.clone(),
      period:       format!("{} - {end}", e.start_date.format("%b %Y")),
      is_remote:    e.is_remote,
      description:  e.description.clone(),
      achievements: e.achievements.iter().map(|a| a.title.clone()).collect(),
      technologies: e.technologies.iter().map(|t| t.name.clone()).collect(),
    }
  }
}

pub struct ServiceView {
  pub name:        String,
  pub category:    String,
  pub description: String,
  /// Empty when the service has no fixed duration.
  pub duration:    String,
  /// Empty when the service has no published price.
  pub price:       String,
}

/// `"12000 EUR (Fixed price)"`, falling back to the pricing kind as the label.
fn format_price(p: &PricingInfo) -> String {
  let label = p.description.as_deref().unwrap_or(p.kind.as_str());
  match &p.currency {
    Some(currency) => format!("{:.0} {currency} ({label})", p.amount),
    None => format!("{:.0} ({label})", p.amount),
  }
}

impl From<&Service> for ServiceView {
  fn from(s: &Service) -> Self {
    Self {
      name:        s.name.clone(),
      category:    s.category.to_string(),
      description: s.description.clone(),
      duration:    s.duration.clone().unwrap_or_default(),
      price:       s.pricing.as_ref().map(format_price).unwrap_or_default(),
    }
  }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomePage {
  pub experiences:  Vec<ExperienceView>,
  pub services:     Vec<ServiceView>,
  pub technologies: Vec<String>,
  pub version:      &'static str,
}

/// Load a homepage section, logging and falling back to nothing on failure.
fn or_empty<T>(section: &'static str, loaded: folio_core::Result<Vec<T>>) -> Vec<T> {
  loaded.unwrap_or_else(|e| {
    warn!(section, error = %e, "failed to load homepage section");
    Vec::new()
  })
}

/// `GET /`
///
/// Catalog failures degrade to empty sections; only a render failure is an
/// error.
pub async fn home<R, C, M>(
  State(state): State<AppState<R, C, M>>,
) -> Result<Html<String>, ApiError>
where
  R: ContactRepository,
  C: CatalogRepository,
  M: Mailer,
{
  let experiences = or_empty("experiences", state.catalog.current_experiences().await);
  let services = or_empty("services", state.catalog.list_services(true).await);
  let expert = TechnologyFilter { category: None, level: Some(Level::Expert) };
  let mut technologies: Vec<String> =
    or_empty("technologies", state.catalog.list_technologies(&expert).await)
      .into_iter()
      .map(|t| t.name)
      .collect();
  technologies.sort_by_key(|name| name.to_lowercase());

  let page = HomePage {
    experiences:  experiences.iter().map(ExperienceView::from).collect(),
    services:     services.iter().map(ServiceView::from).collect(),
    technologies,
    version:      env!("CARGO_PKG_VERSION"),
  };
  let body = page
    .render()
    .map_err(|e| ApiError::Internal(format!("failed to render template: {e}")))?;
  Ok(Html(body))
}
