//! In-memory backends for the Folio repositories.
//!
//! State lives for the lifetime of the process. Each map sits behind a single
//! [`std::sync::RwLock`]: reads share the lock, writes take it exclusively,
//! and every value handed out is a clone.

mod catalog;
mod contacts;

pub use catalog::MemoryCatalog;
pub use contacts::MemoryContactRepository;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use folio_core::{Error, Result};

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>> {
  lock.read().map_err(|_| Error::internal("repository lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>> {
  lock.write().map_err(|_| Error::internal("repository lock poisoned"))
}
