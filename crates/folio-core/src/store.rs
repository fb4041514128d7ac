//! Repository traits for contacts and the portfolio catalog.
//!
//! Implemented by `folio-store-memory` and `folio-store-sqlite`. The
//! application service and the web layer depend on these abstractions, not
//! on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Duration, Utc};

use crate::{
  Result,
  contact::{Contact, ContactStatus},
  experience::Experience,
  service::Service,
  technology::{Technology, TechnologyFilter},
};

// ─── Contacts ────────────────────────────────────────────────────────────────

/// Persistence for contact submissions.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContactRepository: Send + Sync {
  /// Persist a new contact. The contact is re-validated first and rejected
  /// with [`Error::InvalidContact`](crate::Error::InvalidContact) if its
  /// fields no longer hold; an existing id is a conflict.
  fn save<'a>(&'a self, contact: &'a Contact) -> impl Future<Output = Result<()>> + Send + 'a;

  /// Fails with `IdEmpty` on a blank id and `NotFound` when absent.
  fn find_by_id<'a>(&'a self, id: &'a str) -> impl Future<Output = Result<Contact>> + Send + 'a;

  /// Newest submissions first, optionally filtered by status. A `limit` of
  /// zero means no limit.
  fn find_all(
    &self,
    status: Option<ContactStatus>,
    limit: usize,
    offset: usize,
  ) -> impl Future<Output = Result<Vec<Contact>>> + Send + '_;

  /// Replace the stored fields of an existing contact.
  fn update<'a>(&'a self, contact: &'a Contact) -> impl Future<Output = Result<()>> + Send + 'a;

  /// Erase a contact permanently.
  fn delete<'a>(&'a self, id: &'a str) -> impl Future<Output = Result<()>> + Send + 'a;

  fn count(&self, status: Option<ContactStatus>) -> impl Future<Output = Result<usize>> + Send + '_;
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// Read-mostly store for the technologies, experiences and services shown on
/// the site.
pub trait CatalogRepository: Send + Sync {
  /// Matching technologies ordered by name.
  fn list_technologies<'a>(
    &'a self,
    filter: &'a TechnologyFilter,
  ) -> impl Future<Output = Result<Vec<Technology>>> + Send + 'a;

  /// Fails with `Conflict` when a technology with the same name exists.
  fn add_technology(&self, technology: Technology) -> impl Future<Output = Result<()>> + Send + '_;

  /// Most recent start date first.
  fn list_experiences(&self) -> impl Future<Output = Result<Vec<Experience>>> + Send + '_;

  /// Experiences without an end date, most recent first.
  fn current_experiences(&self) -> impl Future<Output = Result<Vec<Experience>>> + Send + '_;

  fn add_experience(&self, experience: Experience) -> impl Future<Output = Result<()>> + Send + '_;

  fn list_services(&self, active_only: bool) -> impl Future<Output = Result<Vec<Service>>> + Send + '_;

  fn add_service(&self, service: Service) -> impl Future<Output = Result<()>> + Send + '_;
}

/// Ordering shared by every backend's `list_experiences`.
pub fn sort_experiences(experiences: &mut [Experience]) {
  experiences.sort_by(|a, b| b.start_date.cmp(&a.start_date));
}

/// Sum of every experience's [`duration_at`](Experience::duration_at) `now`.
/// Overlapping engagements are counted twice.
pub fn total_duration(experiences: &[Experience], now: DateTime<Utc>) -> Duration {
  experiences.iter().map(|e| e.duration_at(now)).fold(Duration::zero(), |acc, d| acc + d)
}

/// Total professional experience across the catalog, ongoing engagements
/// counted up to now.
pub async fn total_experience<C: CatalogRepository>(catalog: &C) -> Result<Duration> {
  let experiences = catalog.list_experiences().await?;
  Ok(total_duration(&experiences, Utc::now()))
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::experience::NewExperience;

  fn experience(id: &str, start_year: i32, end_year: Option<i32>) -> Experience {
    let mut e = Experience::new(id, NewExperience {
      company_name: "Acme".into(),
      position:     "Engineer".into(),
      description:  String::new(),
      location:     String::new(),
      start_date:   Utc.with_ymd_and_hms(start_year, 1, 1, 0, 0, 0).unwrap(),
      is_remote:    false,
    })
    .unwrap();
    if let Some(end) = end_year {
      e.set_end_date(Utc.with_ymd_and_hms(end, 1, 1, 0, 0, 0).unwrap()).unwrap();
    }
    e
  }

  #[test]
  fn total_duration_sums_ended_and_current() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let experiences = [experience("e-1", 2018, Some(2020)), experience("e-2", 2022, None)];
    // 2018-2020 is 730 days; 2022-2024 is 730 days.
    assert_eq!(total_duration(&experiences, now), Duration::days(1460));
    assert_eq!(total_duration(&[], now), Duration::zero());
  }

  #[test]
  fn experiences_sort_newest_first() {
    let mut experiences = [experience("old", 2015, Some(2017)), experience("new", 2021, None)];
    sort_experiences(&mut experiences);
    assert_eq!(experiences[0].id, "new");
  }
}
