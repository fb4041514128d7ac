//! Handlers for the read-only catalog API.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/api/v1/technologies` | Optional `?category=<name>&level=<level>` |
//! | `GET`  | `/api/v1/experiences`  | Newest first |
//! | `GET`  | `/api/v1/services`     | Active and inactive |

use axum::{
  Json,
  extract::{Query, State},
};
use folio_core::{
  experience::Experience,
  mail::Mailer,
  service::Service,
  store::{CatalogRepository, ContactRepository},
  technology::{Level, Technology, TechnologyFilter},
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

// ─── Technologies ─────────────────────────────────────────────────────────────

/// Query string for `/api/v1/technologies`. Empty values are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct TechnologyParams {
  pub category: Option<String>,
  pub level:    Option<String>,
}

impl TechnologyParams {
  pub fn into_filter(self) -> Result<TechnologyFilter, ApiError> {
    let category = self.category.filter(|c| !c.trim().is_empty());
    let level = match self.level.as_deref().map(str::trim) {
      None | Some("") => None,
      Some(raw) => Some(raw.to_ascii_lowercase().parse::<Level>()?),
    };
    Ok(TechnologyFilter { category, level })
  }
}

/// `GET /api/v1/technologies[?category=..][&level=..]`
pub async fn technologies<R, C, M>(
  State(state): State<AppState<R, C, M>>,
  Query(params): Query<TechnologyParams>,
) -> Result<Json<Vec<Technology>>, ApiError>
where
  R: ContactRepository,
  C: CatalogRepository,
  M: Mailer,
{
  let filter = params.into_filter()?;
  let technologies = state.catalog.list_technologies(&filter).await?;
  Ok(Json(technologies))
}

// ─── Experiences ──────────────────────────────────────────────────────────────

/// `GET /api/v1/experiences`
pub async fn experiences<R, C, M>(
  State(state): State<AppState<R, C, M>>,
) -> Result<Json<Vec<Experience>>, ApiError>
where
  R: ContactRepository,
  C: CatalogRepository,
  M: Mailer,
{
  Ok(Json(state.catalog.list_experiences().await?))
}

// ─── Services ─────────────────────────────────────────────────────────────────

/// `GET /api/v1/services`
pub async fn services<R, C, M>(
  State(state): State<AppState<R, C, M>>,
) -> Result<Json<Vec<Service>>, ApiError>
where
  R: ContactRepository,
  C: CatalogRepository,
  M: Mailer,
{
  Ok(Json(state.catalog.list_services(false).await?))
}
