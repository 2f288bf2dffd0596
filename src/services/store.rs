//! Storage traits consumed by the analysis service.
//!
//! The SQLite implementations live in [`crate::storage`]; tests substitute
//! in-memory mocks to inject faults.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    AnalysisResult, EmailSample, LabelStatistic, NewSample, ResultId, SampleId,
};
use crate::storage::DatabaseError;

/// Errors reported by a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store is unreachable or rejected the operation.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<DatabaseError> for StoreError {
    fn from(e: DatabaseError) -> Self {
        Self::Storage(e.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for email samples.
#[async_trait]
pub trait SampleStore: Send + Sync {
    /// Inserts a sample and returns its assigned identity.
    async fn insert(&self, sample: &NewSample) -> StoreResult<SampleId>;

    /// Inserts several samples atomically.
    async fn insert_batch(&self, samples: &[NewSample]) -> StoreResult<Vec<SampleId>>;

    /// Gets a sample by identity.
    async fn get(&self, id: SampleId) -> StoreResult<Option<EmailSample>>;

    /// Gets up to `limit` samples with `label`, most recent first.
    async fn find_by_label(&self, label: &str, limit: u32) -> StoreResult<Vec<EmailSample>>;

    /// Gets samples whose content contains `keyword`, most recent first.
    async fn search_by_keyword(
        &self,
        keyword: &str,
        label_filter: Option<&str>,
    ) -> StoreResult<Vec<EmailSample>>;

    /// Changes a sample's label. Returns `false` if the sample does not exist.
    async fn update_label(&self, id: SampleId, label: &str) -> StoreResult<bool>;
}

/// Persistence for analysis evidence.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Records one evidence row for a sample.
    async fn insert(
        &self,
        sample_id: SampleId,
        label: &str,
        confidence: f64,
    ) -> StoreResult<ResultId>;

    /// Gets the evidence recorded for a sample.
    async fn for_sample(&self, sample_id: SampleId) -> StoreResult<Vec<AnalysisResult>>;

    /// Per-label counts and mean confidence, count descending then label ascending.
    async fn label_statistics(&self) -> StoreResult<Vec<LabelStatistic>>;
}
