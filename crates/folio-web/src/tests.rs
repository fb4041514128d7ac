//! Router tests: each request goes through the full axum stack via `oneshot`.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use folio_core::{
  Error,
  application::ContactService,
  contact::{Contact, ContactStatus},
  experience::Experience,
  id::SequentialIds,
  service::Service,
  store::{CatalogRepository, ContactRepository},
  technology::{Technology, TechnologyFilter},
  validate::ContactRules,
};
use folio_mail::{MailConfig, SmtpMailer};
use folio_store_memory::{MemoryCatalog, MemoryContactRepository};
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{
  AppState,
  config::ServerConfig,
  error::{INVALID_FORM_MESSAGE, SUBMIT_FAILED_MESSAGE},
  router,
};

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn state_with<R, C>(repo: R, catalog: C) -> AppState<R, C, SmtpMailer>
where
  R: ContactRepository,
  C: CatalogRepository,
{
  let mailer = SmtpMailer::new(MailConfig::default()).expect("development mailer");
  let service = ContactService::new(
    Arc::new(repo),
    Arc::new(mailer),
    Arc::new(ContactRules),
    Arc::new(SequentialIds::new("contact")),
  );
  AppState::new(service, Arc::new(catalog))
}

fn state() -> AppState<MemoryContactRepository, MemoryCatalog, SmtpMailer> {
  state_with(MemoryContactRepository::new(), MemoryCatalog::seeded().expect("seed catalog"))
}

fn app<R, C>(state: AppState<R, C, SmtpMailer>) -> Router
where
  R: ContactRepository + 'static,
  C: CatalogRepository + 'static,
{
  router(state, &ServerConfig::default())
}

fn get(uri: &str) -> Request<Body> {
  Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn post_json(body: &Value) -> Request<Body> {
  Request::builder()
    .method("POST")
    .uri("/contact")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
  let resp = app.oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn send_json(app: Router, req: Request<Body>) -> (StatusCode, Value) {
  let (status, body) = send(app, req).await;
  (status, serde_json::from_str(&body).unwrap())
}

fn john_doe() -> Value {
  json!({
    "name":    "John Doe",
    "company": "Test Corp",
    "email":   "john.doe@example.com",
    "project": "I need help with implementing a blockchain solution for our financial \
                services company and regulatory compliance.",
  })
}

/// A contact store whose writes always fail.
struct FailingSaves;

impl ContactRepository for FailingSaves {
  async fn save(&self, _: &Contact) -> folio_core::Result<()> {
    Err(Error::storage(std::io::Error::other("disk full")))
  }

  async fn find_by_id(&self, id: &str) -> folio_core::Result<Contact> {
    Err(Error::not_found(format!("contact {id}")))
  }

  async fn find_all(
    &self,
    _: Option<ContactStatus>,
    _: usize,
    _: usize,
  ) -> folio_core::Result<Vec<Contact>> {
    Ok(Vec::new())
  }

  async fn update(&self, _: &Contact) -> folio_core::Result<()> {
    Err(Error::storage(std::io::Error::other("disk full")))
  }

  async fn delete(&self, id: &str) -> folio_core::Result<()> {
    Err(Error::not_found(format!("contact {id}")))
  }

  async fn count(&self, _: Option<ContactStatus>) -> folio_core::Result<usize> { Ok(0) }
}

/// A catalog that cannot be read.
struct BrokenCatalog;

fn unavailable<T>() -> folio_core::Result<T> { Err(Error::internal("catalog unavailable")) }

impl CatalogRepository for BrokenCatalog {
  async fn list_technologies(&self, _: &TechnologyFilter) -> folio_core::Result<Vec<Technology>> {
    unavailable()
  }

  async fn add_technology(&self, _: Technology) -> folio_core::Result<()> { unavailable() }

  async fn list_experiences(&self) -> folio_core::Result<Vec<Experience>> { unavailable() }

  async fn current_experiences(&self) -> folio_core::Result<Vec<Experience>> { unavailable() }

  async fn add_experience(&self, _: Experience) -> folio_core::Result<()> { unavailable() }

  async fn list_services(&self, _: bool) -> folio_core::Result<Vec<Service>> { unavailable() }

  async fn add_service(&self, _: Service) -> folio_core::Result<()> { unavailable() }
}

/// A catalog whose experience listing never completes.
struct StalledCatalog(MemoryCatalog);

impl CatalogRepository for StalledCatalog {
  async fn list_technologies(&self, f: &TechnologyFilter) -> folio_core::Result<Vec<Technology>> {
    self.0.list_technologies(f).await
  }

  async fn add_technology(&self, t: Technology) -> folio_core::Result<()> {
    self.0.add_technology(t).await
  }

  async fn list_experiences(&self) -> folio_core::Result<Vec<Experience>> {
    std::future::pending().await
  }

  async fn current_experiences(&self) -> folio_core::Result<Vec<Experience>> {
    std::future::pending().await
  }

  async fn add_experience(&self, e: Experience) -> folio_core::Result<()> {
    self.0.add_experience(e).await
  }

  async fn list_services(&self, active_only: bool) -> folio_core::Result<Vec<Service>> {
    self.0.list_services(active_only).await
  }

  async fn add_service(&self, s: Service) -> folio_core::Result<()> { self.0.add_service(s).await }
}

// ─── Contact form ────────────────────────────────────────────────────────────

#[tokio::test]
async fn contact_submission_succeeds() {
  let state = state();
  let (status, body) = send_json(app(state.clone()), post_json(&john_doe())).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
  assert_eq!(body["id"], "contact-1");
  assert!(body["message"].as_str().unwrap().contains("Thank you"));

  let stored = state.contacts.get_contact("contact-1").await.unwrap();
  assert_eq!(stored.status(), ContactStatus::Processed);
  assert_eq!(stored.company(), "Test Corp");
  assert!(stored.processed_at().is_some());
}

#[tokio::test]
async fn short_project_is_rejected() {
  let state = state();
  let mut form = john_doe();
  form["project"] = json!("Short");
  let (status, body) = send_json(app(state.clone()), post_json(&form)).await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["success"], false);
  assert_eq!(body["message"], INVALID_FORM_MESSAGE);
  assert!(body["error"].as_str().unwrap().contains("project"));
  assert_eq!(state.contacts.count_contacts(None).await.unwrap(), 0);
}

#[tokio::test]
async fn invalid_email_is_rejected() {
  let mut form = john_doe();
  form["email"] = json!("invalid-email");
  let (status, body) = send_json(app(state()), post_json(&form)).await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["success"], false);
  assert!(body["error"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn form_encoded_submission_is_accepted() {
  let state = state();
  let req = Request::builder()
    .method("POST")
    .uri("/contact")
    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
    .body(Body::from(
      "name=Jane+Roe&company=&email=jane%40example.com\
       &project=Please+review+our+custody+architecture.",
    ))
    .unwrap();
  let (status, body) = send_json(app(state.clone()), req).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
  let stored = state.contacts.get_contact("contact-1").await.unwrap();
  assert_eq!(stored.email(), "jane@example.com");
  assert_eq!(stored.message(), "Please review our custody architecture.");
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
  let bad_json = Request::builder()
    .method("POST")
    .uri("/contact")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let (status, body) = send_json(app(state()), bad_json).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["success"], false);

  let missing_field = post_json(&json!({ "name": "John Doe", "project": "Long enough text" }));
  let (status, _) = send_json(app(state()), missing_field).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let no_content_type = Request::builder()
    .method("POST")
    .uri("/contact")
    .body(Body::from(john_doe().to_string()))
    .unwrap();
  let (status, _) = send_json(app(state()), no_content_type).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_failure_is_an_internal_error() {
  let state = state_with(FailingSaves, MemoryCatalog::new());
  let (status, body) = send_json(app(state), post_json(&john_doe())).await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body, json!({ "success": false, "message": SUBMIT_FAILED_MESSAGE }));
}

// ─── Catalog API ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_version() {
  let (status, body) = send_json(app(state()), get("/health")).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "status": "healthy", "version": env!("CARGO_PKG_VERSION") }));
}

#[tokio::test]
async fn technologies_filter_by_level_and_category() {
  let (status, body) = send_json(app(state()), get("/api/v1/technologies")).await;
  assert_eq!(status, StatusCode::OK);
  let all = body.as_array().unwrap().len();
  assert!(all > 0);

  let (status, body) = send_json(app(state()), get("/api/v1/technologies?level=expert")).await;
  assert_eq!(status, StatusCode::OK);
  let experts = body.as_array().unwrap();
  assert!(!experts.is_empty() && experts.len() < all);
  assert!(experts.iter().all(|t| t["level"] == "expert"));
  assert!(experts.iter().any(|t| t["name"] == "Go"));

  let (_, body) = send_json(app(state()), get("/api/v1/technologies?category=&level=")).await;
  assert_eq!(body.as_array().unwrap().len(), all);
}

#[tokio::test]
async fn unknown_level_is_a_bad_request() {
  let (status, body) = send_json(app(state()), get("/api/v1/technologies?level=guru")).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("guru"));
}

#[tokio::test]
async fn experiences_newest_first() {
  let (status, body) = send_json(app(state()), get("/api/v1/experiences")).await;
  assert_eq!(status, StatusCode::OK);
  let experiences = body.as_array().unwrap();
  assert_eq!(experiences.len(), 3);
  assert_eq!(experiences[0]["company_name"], "Independent Consultant");
}

#[tokio::test]
async fn services_include_inactive() {
  let (status, body) = send_json(app(state()), get("/api/v1/services")).await;
  assert_eq!(status, StatusCode::OK);
  let services = body.as_array().unwrap();
  assert_eq!(services.len(), 3);
  assert!(services.iter().any(|s| s["is_active"] == false));
}

#[tokio::test]
async fn catalog_failure_is_an_opaque_500() {
  let state = state_with(MemoryContactRepository::new(), BrokenCatalog);
  let (status, body) = send_json(app(state), get("/api/v1/services")).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body, json!({ "error": "Internal server error" }));
}

// ─── Pages ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn homepage_renders_catalog() {
  let resp = app(state()).oneshot(get("/")).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_owned();
  assert!(content_type.starts_with("text/html"));

  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let html = String::from_utf8(bytes.to_vec()).unwrap();
  assert!(html.contains("Independent Consultant"));
  assert!(html.contains("Architecture Review"));
  assert!(html.contains("12000 EUR (Fixed price)"));
  assert!(html.contains("1200 EUR (daily)"));
  assert!(!html.contains("Engineering Mentoring"));
  assert!(html.contains("<li>Go</li>"));
  assert!(html.contains(r#"action="/contact""#));
}

#[tokio::test]
async fn homepage_survives_catalog_failure() {
  let state = state_with(MemoryContactRepository::new(), BrokenCatalog);
  let (status, html) = send(app(state), get("/")).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(html.matches("Nothing to show right now.").count(), 3);
}

#[tokio::test]
async fn static_files_are_served() {
  let dir = std::env::temp_dir().join(format!("folio-static-{}", std::process::id()));
  std::fs::create_dir_all(dir.join("css")).unwrap();
  std::fs::write(dir.join("css/site.css"), "body { margin: 0; }").unwrap();

  let server = ServerConfig { static_dir: dir.clone(), ..ServerConfig::default() };
  let (status, body) = send(router(state(), &server), get("/static/css/site.css")).await;
  std::fs::remove_dir_all(&dir).ok();

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, "body { margin: 0; }");
}

#[tokio::test]
async fn slow_requests_time_out_with_408() {
  let state = state_with(MemoryContactRepository::new(), StalledCatalog(MemoryCatalog::new()));
  let server = ServerConfig { read_timeout_secs: 1, ..ServerConfig::default() };
  let app = router(state, &server);

  let (status, _) = send(app.clone(), get("/api/v1/experiences")).await;
  assert_eq!(status, StatusCode::REQUEST_TIMEOUT);

  let (status, _) = send(app, get("/api/v1/services")).await;
  assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_404() {
  let (status, _) = send(app(state()), get("/nope")).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}
