//! [`SqliteStore`], the SQLite implementation of the Folio repositories.

use std::{path::Path, time::Duration};

use chrono::Utc;
use rusqlite::{OptionalExtension as _, params};
use tracing::{debug, info};

use folio_core::{
  contact::{Contact, ContactStatus},
  experience::Experience,
  seed::Catalog,
  service::Service,
  store::{CatalogRepository, ContactRepository},
  technology::{Technology, TechnologyFilter},
};

use crate::{
  Error, Result,
  encode::{
    CONTACT_COLUMNS, EXPERIENCE_COLUMNS, RawContact, RawExperience, RawService, RawTechnology,
    SERVICE_COLUMNS, TECHNOLOGY_COLUMNS, encode_category, encode_dt, encode_json, encode_level,
    encode_status,
  },
  schema::SCHEMA,
};

/// How long a write waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(30);

// ─── Store ───────────────────────────────────────────────────────────────────

/// Folio repositories backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init(busy_timeout).await?;
    debug!(path = %path.display(), "sqlite store opened");
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init(DEFAULT_BUSY_TIMEOUT).await?;
    Ok(store)
  }

  async fn init(&self, busy_timeout: Duration) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `f` inside one transaction.
  ///
  /// Commits when `f` returns `Ok`; otherwise rolls back and returns `f`'s
  /// error. If the rollback fails too, both errors come back as
  /// [`Error::Rollback`].
  pub async fn with_transaction<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&rusqlite::Transaction<'_>) -> Result<T> + Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        match f(&tx) {
          Ok(value) => {
            tx.commit()?;
            Ok(Ok(value))
          }
          Err(err) => match tx.rollback() {
            Ok(()) => Ok(Err(err)),
            Err(rollback) => Ok(Err(Error::Rollback { source: Box::new(err), rollback })),
          },
        }
      })
      .await?
  }

  /// Insert `catalog` if the store holds no technologies, experiences or
  /// services yet. Returns whether anything was written.
  pub async fn seed_if_empty(&self, catalog: Catalog) -> Result<bool> {
    let seeded = self
      .with_transaction(move |tx| {
        let existing: i64 = tx.query_row(
          "SELECT (SELECT COUNT(*) FROM technologies)
                + (SELECT COUNT(*) FROM experiences)
                + (SELECT COUNT(*) FROM services)",
          [],
          |row| row.get(0),
        )?;
        if existing > 0 {
          return Ok(false);
        }
        for t in &catalog.technologies {
          insert_technology(tx, t)?;
        }
        for e in &catalog.experiences {
          insert_experience(tx, e)?;
        }
        for s in &catalog.services {
          insert_service(tx, s)?;
        }
        Ok(true)
      })
      .await?;
    if seeded {
      info!("catalog seeded with sample content");
    }
    Ok(seeded)
  }

  // ── Contacts ──────────────────────────────────────────────────────────────

  async fn store_contact(&self, contact: &Contact) -> Result<()> {
    let contact = contact.clone();
    self.with_transaction(move |tx| insert_contact(tx, &contact)).await
  }

  async fn select_contact(&self, id: &str) -> Result<Option<Contact>> {
    let id = id.to_owned();
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
              params![id],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawContact::into_contact).transpose()
  }

  async fn select_contacts(
    &self,
    status: Option<ContactStatus>,
    limit: usize,
    offset: usize,
  ) -> Result<Vec<Contact>> {
    let status = status.map(encode_status);
    // SQLite treats a negative LIMIT as "no limit".
    let limit = if limit == 0 { -1 } else { i64::try_from(limit).unwrap_or(i64::MAX) };
    let offset = i64::try_from(offset).unwrap_or(i64::MAX);

    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts
           WHERE (?1 IS NULL OR status = ?1)
           ORDER BY created_at DESC, rowid DESC
           LIMIT ?2 OFFSET ?3"
        ))?;
        let rows = stmt
          .query_map(params![status, limit, offset], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn replace_contact(&self, contact: &Contact) -> Result<()> {
    let contact = contact.clone();
    self
      .with_transaction(move |tx| {
        let changed = tx.execute(
          "UPDATE contacts
           SET name = ?2, email = ?3, company = ?4, message = ?5, subject = ?6,
               status = ?7, source = ?8, processed_at = ?9, updated_at = ?10
           WHERE id = ?1",
          params![
            contact.id(),
            contact.name(),
            contact.email(),
            contact.company(),
            contact.message(),
            contact.subject(),
            encode_status(contact.status()),
            contact.source(),
            contact.processed_at().map(encode_dt),
            encode_dt(Utc::now()),
          ],
        )?;
        if changed == 0 {
          return Err(folio_core::Error::not_found("contact").into());
        }
        Ok(())
      })
      .await
  }

  async fn delete_contact(&self, id: &str) -> Result<()> {
    let id = id.to_owned();
    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute("DELETE FROM contacts WHERE id = ?1", params![id])?))
      .await?;
    if changed == 0 {
      return Err(folio_core::Error::not_found("contact").into());
    }
    Ok(())
  }

  async fn count_contacts(&self, status: Option<ContactStatus>) -> Result<usize> {
    let status = status.map(encode_status);
    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM contacts WHERE (?1 IS NULL OR status = ?1)",
          params![status],
          |row| row.get(0),
        )?)
      })
      .await?;
    Ok(usize::try_from(count).unwrap_or_default())
  }

  // ── Catalog ───────────────────────────────────────────────────────────────

  async fn select_technologies(&self, filter: &TechnologyFilter) -> Result<Vec<Technology>> {
    let category = filter.category.clone();
    let level = filter.level.map(encode_level);

    let raws: Vec<RawTechnology> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TECHNOLOGY_COLUMNS} FROM technologies
           WHERE (?1 IS NULL OR category = ?1) AND (?2 IS NULL OR level = ?2)
           ORDER BY name"
        ))?;
        let rows = stmt
          .query_map(params![category, level], RawTechnology::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawTechnology::into_technology).collect()
  }

  async fn select_experiences(&self, current_only: bool) -> Result<Vec<Experience>> {
    let raws: Vec<RawExperience> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {EXPERIENCE_COLUMNS} FROM experiences
           WHERE (?1 = 0 OR end_date IS NULL)
           ORDER BY start_date DESC"
        ))?;
        let rows = stmt
          .query_map(params![current_only], RawExperience::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawExperience::into_experience).collect()
  }

  async fn select_services(&self, active_only: bool) -> Result<Vec<Service>> {
    let raws: Vec<RawService> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SERVICE_COLUMNS} FROM services
           WHERE (?1 = 0 OR is_active = 1)
           ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map(params![active_only], RawService::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawService::into_service).collect()
  }
}

// ─── Row writers ─────────────────────────────────────────────────────────────

fn insert_contact(conn: &rusqlite::Connection, c: &Contact) -> Result<()> {
  let submitted = encode_dt(c.submitted_at());
  conn.execute(
    &format!(
      "INSERT INTO contacts ({CONTACT_COLUMNS}, updated_at)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?9)"
    ),
    params![
      c.id(),
      c.name(),
      c.email(),
      c.company(),
      c.message(),
      c.subject(),
      encode_status(c.status()),
      c.source(),
      submitted,
      c.processed_at().map(encode_dt),
    ],
  )?;
  Ok(())
}

fn insert_technology(conn: &rusqlite::Connection, t: &Technology) -> Result<()> {
  conn.execute(
    &format!("INSERT INTO technologies ({TECHNOLOGY_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
    params![
      t.id,
      t.name,
      t.category,
      t.icon_url,
      encode_level(t.level),
      t.description,
      encode_dt(t.created_at),
      encode_dt(t.updated_at),
    ],
  )?;
  Ok(())
}

fn insert_experience(conn: &rusqlite::Connection, e: &Experience) -> Result<()> {
  conn.execute(
    &format!(
      "INSERT INTO experiences ({EXPERIENCE_COLUMNS})
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
    ),
    params![
      e.id,
      e.company_name,
      e.position,
      e.description,
      e.location,
      encode_dt(e.start_date),
      e.end_date.map(encode_dt),
      e.is_remote,
      encode_json(&e.technologies)?,
      encode_json(&e.achievements)?,
      encode_dt(e.created_at),
      encode_dt(e.updated_at),
    ],
  )?;
  Ok(())
}

fn insert_service(conn: &rusqlite::Connection, s: &Service) -> Result<()> {
  conn.execute(
    &format!(
      "INSERT INTO services ({SERVICE_COLUMNS})
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
    ),
    params![
      s.id,
      s.name,
      s.description,
      encode_category(s.category),
      s.duration,
      s.pricing.as_ref().map(encode_json).transpose()?,
      encode_json(&s.technologies)?,
      encode_json(&s.deliverables)?,
      s.is_active,
      encode_dt(s.created_at),
      encode_dt(s.updated_at),
    ],
  )?;
  Ok(())
}

fn ensure_absent(
  conn: &rusqlite::Connection,
  table: &str,
  name: &str,
  what: &str,
) -> Result<()> {
  let exists: bool = conn.query_row(
    &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE name = ?1)"),
    params![name],
    |row| row.get(0),
  )?;
  if exists {
    return Err(folio_core::Error::conflict(format!("{what} {name:?} already exists")).into());
  }
  Ok(())
}

fn require_id(id: &str) -> folio_core::Result<()> {
  if id.trim().is_empty() { Err(folio_core::Error::IdEmpty) } else { Ok(()) }
}

// ─── ContactRepository impl ──────────────────────────────────────────────────

impl ContactRepository for SqliteStore {
  async fn save(&self, contact: &Contact) -> folio_core::Result<()> {
    contact.is_valid().map_err(folio_core::Error::invalid_contact)?;
    require_id(contact.id())?;
    Ok(self.store_contact(contact).await?)
  }

  async fn find_by_id(&self, id: &str) -> folio_core::Result<Contact> {
    require_id(id)?;
    self.select_contact(id).await?.ok_or_else(|| folio_core::Error::not_found("contact"))
  }

  async fn find_all(
    &self,
    status: Option<ContactStatus>,
    limit: usize,
    offset: usize,
  ) -> folio_core::Result<Vec<Contact>> {
    Ok(self.select_contacts(status, limit, offset).await?)
  }

  async fn update(&self, contact: &Contact) -> folio_core::Result<()> {
    contact.is_valid().map_err(folio_core::Error::invalid_contact)?;
    require_id(contact.id())?;
    Ok(self.replace_contact(contact).await?)
  }

  async fn delete(&self, id: &str) -> folio_core::Result<()> {
    require_id(id)?;
    Ok(self.delete_contact(id).await?)
  }

  async fn count(&self, status: Option<ContactStatus>) -> folio_core::Result<usize> {
    Ok(self.count_contacts(status).await?)
  }
}

// ─── CatalogRepository impl ──────────────────────────────────────────────────

impl CatalogRepository for SqliteStore {
  async fn list_technologies(
    &self,
    filter: &TechnologyFilter,
  ) -> folio_core::Result<Vec<Technology>> {
    Ok(self.select_technologies(filter).await?)
  }

  async fn add_technology(&self, technology: Technology) -> folio_core::Result<()> {
    Ok(
      self
        .with_transaction(move |tx| {
          ensure_absent(tx, "technologies", &technology.name, "technology")?;
          insert_technology(tx, &technology)
        })
        .await?,
    )
  }

  async fn list_experiences(&self) -> folio_core::Result<Vec<Experience>> {
    Ok(self.select_experiences(false).await?)
  }

  async fn current_experiences(&self) -> folio_core::Result<Vec<Experience>> {
    Ok(self.select_experiences(true).await?)
  }

  async fn add_experience(&self, experience: Experience) -> folio_core::Result<()> {
    Ok(self.with_transaction(move |tx| insert_experience(tx, &experience)).await?)
  }

  async fn list_services(&self, active_only: bool) -> folio_core::Result<Vec<Service>> {
    Ok(self.select_services(active_only).await?)
  }

  async fn add_service(&self, service: Service) -> folio_core::Result<()> {
    Ok(
      self
        .with_transaction(move |tx| {
          ensure_absent(tx, "services", &service.name, "service")?;
          insert_service(tx, &service)
        })
        .await?,
    )
  }
}
