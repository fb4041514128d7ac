//! Core types and trait definitions for the Folio site.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends, the mailer and the web layer all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod application;
pub mod contact;
pub mod error;
pub mod experience;
pub mod id;
pub mod mail;
pub mod seed;
pub mod service;
pub mod store;
pub mod technology;
pub mod validate;

pub use error::{Error, ErrorKind, Result};
