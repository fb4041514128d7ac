//! HTTP layer for the Folio site.
//!
//! Exposes an axum [`Router`] serving the homepage, the contact form endpoint
//! and the read-only catalog API, backed by any [`ContactRepository`],
//! [`CatalogRepository`] and [`Mailer`].

pub mod config;
pub mod error;
pub mod handlers;

pub use crate::config::Settings;
pub use error::{ApiError, FormError};

use std::sync::Arc;

use axum::{
  Router,
  http::StatusCode,
  routing::{get, post},
};
use folio_core::{
  application::ContactService,
  mail::Mailer,
  store::{CatalogRepository, ContactRepository},
};
use tower::ServiceBuilder;
use tower_http::{
  services::ServeDir,
  timeout::{ResponseBodyTimeoutLayer, TimeoutLayer},
  trace::TraceLayer,
};

use crate::{
  config::ServerConfig,
  handlers::{catalog, contact, pages},
};

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<R, C, M> {
  pub contacts: ContactService<R, M>,
  pub catalog:  Arc<C>,
}

impl<R, C, M> Clone for AppState<R, C, M> {
  fn clone(&self) -> Self {
    Self { contacts: self.contacts.clone(), catalog: Arc::clone(&self.catalog) }
  }
}

impl<R, C, M> AppState<R, C, M> {
  pub fn new(contacts: ContactService<R, M>, catalog: Arc<C>) -> Self {
    Self { contacts, catalog }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the site [`Router`].
///
/// Requests are traced, and bounded by `server.read_timeout_secs` (408 on
/// expiry); response bodies must finish within `server.write_timeout_secs`.
pub fn router<R, C, M>(state: AppState<R, C, M>, server: &ServerConfig) -> Router
where
  R: ContactRepository + 'static,
  C: CatalogRepository + 'static,
  M: Mailer + 'static,
{
  Router::new()
    .route("/",                     get(pages::home::<R, C, M>))
    .route("/health",               get(pages::health))
    .route("/contact",              post(contact::submit::<R, C, M>))
    .route("/api/v1/technologies",  get(catalog::technologies::<R, C, M>))
    .route("/api/v1/experiences",   get(catalog::experiences::<R, C, M>))
    .route("/api/v1/services",      get(catalog::services::<R, C, M>))
    .nest_service("/static", ServeDir::new(&server.static_dir))
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(ResponseBodyTimeoutLayer::new(server.write_timeout()))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, server.read_timeout())),
    )
    .with_state(state)
}

#[cfg(test)]
mod tests;
