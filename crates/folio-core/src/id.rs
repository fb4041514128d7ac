//! Identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of opaque entity identifiers.
pub trait IdGenerator: Send + Sync {
  fn new_id(&self) -> String;
}

/// Random UUID v4 identifiers, hyphenated lowercase.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
  fn new_id(&self) -> String { Uuid::new_v4().hyphenated().to_string() }
}

/// Deterministic `<prefix>-1`, `<prefix>-2`, … identifiers.
#[derive(Debug)]
pub struct SequentialIds {
  prefix: String,
  next:   AtomicU64,
}

impl SequentialIds {
  pub fn new(prefix: impl Into<String>) -> Self {
    Self { prefix: prefix.into(), next: AtomicU64::new(1) }
  }
}

impl IdGenerator for SequentialIds {
  fn new_id(&self) -> String {
    let n = self.next.fetch_add(1, Ordering::Relaxed);
    format!("{}-{n}", self.prefix)
  }
}
