//! SQLite-backed implementations of the service store traits.

use async_trait::async_trait;

use crate::domain::{
    AnalysisResult, EmailSample, LabelDefinition, LabelStatistic, NewSample, ResultId, SampleId,
};
use crate::services::{ResultStore, SampleStore, StoreResult};

use super::database::{Database, Result};
use super::queries::{labels, results, samples};

#[async_trait]
impl SampleStore for Database {
    async fn insert(&self, sample: &NewSample) -> StoreResult<SampleId> {
        Ok(samples::insert(self, sample).await?)
    }

    async fn insert_batch(&self, batch: &[NewSample]) -> StoreResult<Vec<SampleId>> {
        Ok(samples::insert_batch(self, batch).await?)
    }

    async fn get(&self, id: SampleId) -> StoreResult<Option<EmailSample>> {
        Ok(samples::get_by_id(self, id).await?)
    }

    async fn find_by_label(&self, label: &str, limit: u32) -> StoreResult<Vec<EmailSample>> {
        Ok(samples::find_by_label(self, label, limit).await?)
    }

    async fn search_by_keyword(
        &self,
        keyword: &str,
        label_filter: Option<&str>,
    ) -> StoreResult<Vec<EmailSample>> {
        Ok(samples::search_by_keyword(self, keyword, label_filter).await?)
    }

    async fn update_label(&self, id: SampleId, label: &str) -> StoreResult<bool> {
        Ok(samples::update_label(self, id, label).await?)
    }
}

#[async_trait]
impl ResultStore for Database {
    async fn insert(
        &self,
        sample_id: SampleId,
        label: &str,
        confidence: f64,
    ) -> StoreResult<ResultId> {
        Ok(results::insert(self, sample_id, label, confidence).await?)
    }

    async fn for_sample(&self, sample_id: SampleId) -> StoreResult<Vec<AnalysisResult>> {
        Ok(results::get_by_sample(self, sample_id).await?)
    }

    async fn label_statistics(&self) -> StoreResult<Vec<LabelStatistic>> {
        Ok(results::label_statistics(self).await?)
    }
}

impl Database {
    /// Returns the active entries of the label catalog.
    pub async fn label_catalog(&self) -> Result<Vec<LabelDefinition>> {
        self.with_conn(|conn| Ok(labels::get_active(conn)?)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn database_implements_both_stores() {
        let db = Database::open_in_memory().await.unwrap();

        let id = SampleStore::insert(&db, &NewSample::new("紧急", "urgent"))
            .await
            .unwrap();
        ResultStore::insert(&db, id, "urgent", 0.8).await.unwrap();

        let evidence = db.for_sample(id).await.unwrap();
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].sample_id, id);

        let stats = db.label_statistics().await.unwrap();
        assert_eq!(stats[0].count, 1);
    }

    #[tokio::test]
    async fn store_errors_wrap_database_faults() {
        let db = Database::open_in_memory().await.unwrap();
        let err = ResultStore::insert(&db, SampleId(77), "work", 0.8)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("storage error"));
    }

    #[tokio::test]
    async fn label_catalog_lists_seeded_labels() {
        let db = Database::open_in_memory().await.unwrap();
        let catalog = db.label_catalog().await.unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog[0].name, "promotional");
    }
}
