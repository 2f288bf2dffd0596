//! Analysis result database queries.
//!
//! Evidence rows are append-only: inserted once, never updated or deleted.

use rusqlite::{params, Row};

use crate::domain::{AnalysisResult, LabelStatistic, ResultId, SampleId};
use crate::storage::database::{Database, Result};

use super::parse_timestamp;

/// Inserts one evidence row for a sample.
pub async fn insert(
    db: &Database,
    sample_id: SampleId,
    label: &str,
    confidence: f64,
) -> Result<ResultId> {
    let label = label.to_string();

    db.with_conn(move |conn| {
        conn.execute(
            "INSERT INTO email_analysis_results (email_id, detected_label, confidence_score)
             VALUES (?1, ?2, ?3)",
            params![sample_id.0, label, confidence],
        )?;
        Ok(ResultId(conn.last_insert_rowid()))
    })
    .await
}

/// Gets all evidence for a sample in insertion order.
pub async fn get_by_sample(db: &Database, sample_id: SampleId) -> Result<Vec<AnalysisResult>> {
    db.with_conn(move |conn| {
        let mut stmt = conn.prepare(
            "SELECT id, email_id, detected_label, confidence_score, analysis_timestamp
             FROM email_analysis_results
             WHERE email_id = ?1
             ORDER BY id",
        )?;
        let rows = stmt.query_map(params![sample_id.0], row_to_result)?;
        let results: std::result::Result<Vec<_>, _> = rows.collect();
        Ok(results?)
    })
    .await
}

/// Per-label evidence counts and mean confidence.
///
/// Ordered by count descending, ties broken by label name ascending.
pub async fn label_statistics(db: &Database) -> Result<Vec<LabelStatistic>> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT detected_label, COUNT(*) AS hits, AVG(confidence_score)
             FROM email_analysis_results
             GROUP BY detected_label
             ORDER BY hits DESC, detected_label ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            let count: i64 = row.get(1)?;
            Ok(LabelStatistic {
                label: row.get(0)?,
                count: count as u64,
                average_confidence: row.get(2)?,
            })
        })?;
        let stats: std::result::Result<Vec<_>, _> = rows.collect();
        Ok(stats?)
    })
    .await
}

fn row_to_result(row: &Row<'_>) -> std::result::Result<AnalysisResult, rusqlite::Error> {
    let analyzed_at: String = row.get(4)?;

    Ok(AnalysisResult {
        id: ResultId(row.get(0)?),
        sample_id: SampleId(row.get(1)?),
        detected_label: row.get(2)?,
        confidence: row.get(3)?,
        analyzed_at: parse_timestamp(4, &analyzed_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewSample;
    use crate::storage::queries::samples;

    async fn setup_with_sample() -> (Database, SampleId) {
        let db = Database::open_in_memory().await.unwrap();
        let id = samples::insert(&db, &NewSample::new("text", "work"))
            .await
            .unwrap();
        (db, id)
    }

    #[tokio::test]
    async fn insert_and_list_for_sample() {
        let (db, id) = setup_with_sample().await;

        insert(&db, id, "work", 0.8).await.unwrap();
        insert(&db, id, "urgent", 0.8).await.unwrap();

        let results = get_by_sample(&db, id).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].detected_label, "work");
        assert_eq!(results[1].detected_label, "urgent");
        assert!(results.iter().all(|r| r.sample_id == id));
    }

    #[tokio::test]
    async fn insert_for_missing_sample_fails() {
        let (db, _) = setup_with_sample().await;
        assert!(insert(&db, SampleId(12345), "work", 0.8).await.is_err());
    }

    #[tokio::test]
    async fn statistics_count_and_average() {
        let (db, id) = setup_with_sample().await;

        insert(&db, id, "work", 0.8).await.unwrap();
        insert(&db, id, "work", 0.6).await.unwrap();
        insert(&db, id, "urgent", 0.8).await.unwrap();

        let stats = label_statistics(&db).await.unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].label, "work");
        assert_eq!(stats[0].count, 2);
        assert!((stats[0].average_confidence - 0.7).abs() < 1e-9);
        assert_eq!(stats[1].label, "urgent");
        assert_eq!(stats[1].count, 1);
    }

    #[tokio::test]
    async fn statistics_ties_sorted_by_label() {
        let (db, id) = setup_with_sample().await;

        for label in ["work", "personal", "urgent", "personal", "work"] {
            insert(&db, id, label, 0.8).await.unwrap();
        }

        let stats = label_statistics(&db).await.unwrap();
        let labels: Vec<_> = stats.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["personal", "work", "urgent"]);
    }

    #[tokio::test]
    async fn statistics_empty_without_results() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(label_statistics(&db).await.unwrap().is_empty());
    }
}
