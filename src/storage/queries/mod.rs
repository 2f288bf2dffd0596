//! Database query modules for CRUD operations.
//!
//! Each module provides functions that operate on one table.

pub mod labels;
pub mod results;
pub mod samples;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;

/// Parses a stored RFC 3339 timestamp from column `idx`.
pub(crate) fn parse_timestamp(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
