//! [`MemoryContactRepository`]: contacts in a `HashMap` keyed by id.

use std::{collections::HashMap, sync::RwLock};

use folio_core::{
  Error, Result,
  contact::{Contact, ContactStatus},
  store::ContactRepository,
};
use tracing::debug;

use crate::{read, write};

#[derive(Debug, Default)]
pub struct MemoryContactRepository {
  contacts: RwLock<HashMap<String, Contact>>,
}

impl MemoryContactRepository {
  pub fn new() -> Self { Self::default() }
}

fn require_id(id: &str) -> Result<()> {
  if id.trim().is_empty() { Err(Error::IdEmpty) } else { Ok(()) }
}

impl ContactRepository for MemoryContactRepository {
  async fn save(&self, contact: &Contact) -> Result<()> {
    contact.is_valid().map_err(Error::invalid_contact)?;
    require_id(contact.id())?;

    let mut contacts = write(&self.contacts)?;
    if contacts.contains_key(contact.id()) {
      return Err(Error::conflict(format!("contact {} already exists", contact.id())));
    }
    contacts.insert(contact.id().to_owned(), contact.clone());
    debug!(contact_id = contact.id(), total = contacts.len(), "contact stored in memory");
    Ok(())
  }

  async fn find_by_id(&self, id: &str) -> Result<Contact> {
    require_id(id)?;
    read(&self.contacts)?.get(id).cloned().ok_or_else(|| Error::not_found("contact"))
  }

  async fn find_all(
    &self,
    status: Option<ContactStatus>,
    limit: usize,
    offset: usize,
  ) -> Result<Vec<Contact>> {
    let mut matching: Vec<Contact> = read(&self.contacts)?
      .values()
      .filter(|c| status.is_none_or(|s| c.status() == s))
      .cloned()
      .collect();

    matching.sort_by(|a, b| {
      b.submitted_at().cmp(&a.submitted_at()).then_with(|| a.id().cmp(b.id()))
    });

    let limit = if limit == 0 { usize::MAX } else { limit };
    Ok(matching.into_iter().skip(offset).take(limit).collect())
  }

  async fn update(&self, contact: &Contact) -> Result<()> {
    contact.is_valid().map_err(Error::invalid_contact)?;
    require_id(contact.id())?;

    let mut contacts = write(&self.contacts)?;
    let slot = contacts.get_mut(contact.id()).ok_or_else(|| Error::not_found("contact"))?;
    *slot = contact.clone();
    Ok(())
  }

  async fn delete(&self, id: &str) -> Result<()> {
    require_id(id)?;
    write(&self.contacts)?
      .remove(id)
      .map(|_| ())
      .ok_or_else(|| Error::not_found("contact"))
  }

  async fn count(&self, status: Option<ContactStatus>) -> Result<usize> {
    Ok(
      read(&self.contacts)?
        .values()
        .filter(|c| status.is_none_or(|s| c.status() == s))
        .count(),
    )
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use chrono::{Duration, Utc};
  use folio_core::{
    contact::{ContactRecord, NewContact},
    id::SequentialIds,
    validate::ContactRules,
  };

  use super::*;

  fn contact(ids: &SequentialIds, name: &str) -> Contact {
    Contact::new(
      NewContact {
        name:    name.into(),
        email:   "someone@example.com".into(),
        message: "Interested in a consulting engagement.".into(),
        ..Default::default()
      },
      &ContactRules,
      ids,
    )
    .unwrap()
  }

  /// Five contacts submitted one minute apart, oldest first.
  fn spaced(ids: &SequentialIds) -> Vec<Contact> {
    let base = Utc::now() - Duration::minutes(10);
    (0..5)
      .map(|i| {
        let c = contact(ids, &format!("Person {i}"));
        Contact::restore(ContactRecord {
          submitted_at: base + Duration::minutes(i),
          ..c.to_record()
        })
      })
      .collect()
  }

  #[tokio::test]
  async fn save_then_find_round_trips() {
    let repo = MemoryContactRepository::new();
    let c = contact(&SequentialIds::new("c"), "Ada Lovelace");
    repo.save(&c).await.unwrap();
    assert_eq!(repo.find_by_id(c.id()).await.unwrap(), c);
  }

  #[tokio::test]
  async fn save_rejects_duplicates_and_invalid_contacts() {
    let repo = MemoryContactRepository::new();
    let ids = SequentialIds::new("c");
    let c = contact(&ids, "Ada Lovelace");
    repo.save(&c).await.unwrap();
    assert_eq!(repo.save(&c).await.unwrap_err().kind(), folio_core::ErrorKind::Conflict);

    let bad = Contact::restore(ContactRecord { id: "c-9".into(), email: "nope".into(), ..c.to_record() });
    assert!(matches!(repo.save(&bad).await.unwrap_err(), Error::InvalidContact(_)));
  }

  #[tokio::test]
  async fn find_by_id_errors() {
    let repo = MemoryContactRepository::new();
    assert!(matches!(repo.find_by_id("  ").await.unwrap_err(), Error::IdEmpty));
    assert!(repo.find_by_id("missing").await.unwrap_err().is_not_found());
  }

  #[tokio::test]
  async fn find_all_sorts_newest_first_and_paginates() {
    let repo = MemoryContactRepository::new();
    let contacts = spaced(&SequentialIds::new("c"));
    for c in &contacts {
      repo.save(c).await.unwrap();
    }

    let all = repo.find_all(None, 0, 0).await.unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all[0].id(), contacts[4].id());
    assert_eq!(all[4].id(), contacts[0].id());

    let page = repo.find_all(None, 2, 1).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id(), all[1].id());
    assert_eq!(page[1].id(), all[2].id());

    assert!(repo.find_all(None, 2, 10).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn find_all_and_count_filter_by_status() {
    let repo = MemoryContactRepository::new();
    let ids = SequentialIds::new("c");
    let mut processed = contact(&ids, "Ada Lovelace");
    processed.mark_as_processed();
    repo.save(&processed).await.unwrap();
    repo.save(&contact(&ids, "Grace Hopper")).await.unwrap();

    let found = repo.find_all(Some(ContactStatus::Processed), 0, 0).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), processed.id());
    assert_eq!(repo.count(Some(ContactStatus::New)).await.unwrap(), 1);
    assert_eq!(repo.count(None).await.unwrap(), 2);
  }

  #[tokio::test]
  async fn update_replaces_stored_copy() {
    let repo = MemoryContactRepository::new();
    let mut c = contact(&SequentialIds::new("c"), "Ada Lovelace");
    repo.save(&c).await.unwrap();

    c.mark_as_read();
    // The stored copy does not alias the caller's value.
    assert_eq!(repo.find_by_id(c.id()).await.unwrap().status(), ContactStatus::New);

    repo.update(&c).await.unwrap();
    assert_eq!(repo.find_by_id(c.id()).await.unwrap().status(), ContactStatus::Read);
  }

  #[tokio::test]
  async fn update_unknown_is_not_found() {
    let repo = MemoryContactRepository::new();
    let c = contact(&SequentialIds::new("c"), "Ada Lovelace");
    assert!(repo.update(&c).await.unwrap_err().is_not_found());
  }

  #[tokio::test]
  async fn delete_erases() {
    let repo = MemoryContactRepository::new();
    let c = contact(&SequentialIds::new("c"), "Ada Lovelace");
    repo.save(&c).await.unwrap();
    repo.delete(c.id()).await.unwrap();
    assert!(repo.find_by_id(c.id()).await.unwrap_err().is_not_found());
    assert!(repo.delete(c.id()).await.unwrap_err().is_not_found());
    assert!(matches!(repo.delete("").await.unwrap_err(), Error::IdEmpty));
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn concurrent_saves_lose_nothing() {
    const N: usize = 100;
    let repo = Arc::new(MemoryContactRepository::new());
    let ids = Arc::new(SequentialIds::new("c"));

    let handles: Vec<_> = (0..N)
      .map(|i| {
        let repo = Arc::clone(&repo);
        let ids = Arc::clone(&ids);
        tokio::spawn(async move {
          let c = contact(&ids, &format!("Person {i}"));
          repo.save(&c).await.unwrap();
          c.id().to_owned()
        })
      })
      .collect();

    let mut saved = Vec::with_capacity(N);
    for h in handles {
      saved.push(h.await.unwrap());
    }

    assert_eq!(repo.count(None).await.unwrap(), N);
    for id in saved {
      repo.find_by_id(&id).await.unwrap();
    }
  }
}
