//! Database storage.
//!
//! This module provides the storage layer for mail-labeler:
//!
//! - SQLite database for samples, the label catalog and analysis evidence
//! - Schema bootstrap and default catalog seeding on open
//! - Async-safe database operations via tokio::task::spawn_blocking
//! - [`SampleStore`](crate::services::SampleStore) and
//!   [`ResultStore`](crate::services::ResultStore) implemented for [`Database`]

mod database;
pub mod queries;
mod schema;
mod stores;

pub use database::{Database, DatabaseError, Result};
