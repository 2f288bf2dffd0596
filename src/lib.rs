//! mail-labeler - keyword-driven email classification
//!
//! This crate classifies free-text email content into predefined labels,
//! records each sample with its matching evidence in SQLite, and reports
//! per-label statistics.

pub mod classifier;
pub mod config;
pub mod domain;
pub mod services;
pub mod storage;

pub use classifier::{Matcher, RuleRegistry};
pub use services::AnalysisService;
pub use storage::Database;
