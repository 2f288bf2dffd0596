//! Email sample CRUD operations.
//!
//! Provides database operations for the `email_samples` table.

use rusqlite::{params, OptionalExtension, Row};

use crate::classifier::normalize;
use crate::domain::{EmailSample, NewSample, SampleId};
use crate::storage::database::{Database, Result};

use super::parse_timestamp;

const SAMPLE_COLUMNS: &str =
    "id, content, label, confidence_score, created_at, updated_at";

/// Inserts a sample and returns its store-assigned identity.
pub async fn insert(db: &Database, sample: &NewSample) -> Result<SampleId> {
    let sample = sample.clone();

    db.with_conn(move |conn| {
        conn.execute(
            "INSERT INTO email_samples (content, label, confidence_score) VALUES (?1, ?2, ?3)",
            params![sample.content, sample.label, sample.confidence],
        )?;
        Ok(SampleId(conn.last_insert_rowid()))
    })
    .await
}

/// Inserts several samples in one transaction. Either all rows land or none.
pub async fn insert_batch(db: &Database, samples: &[NewSample]) -> Result<Vec<SampleId>> {
    let samples = samples.to_vec();

    db.transaction(move |tx| {
        let mut stmt = tx.prepare(
            "INSERT INTO email_samples (content, label, confidence_score) VALUES (?1, ?2, ?3)",
        )?;

        let mut ids = Vec::with_capacity(samples.len());
        for sample in &samples {
            stmt.execute(params![sample.content, sample.label, sample.confidence])?;
            ids.push(SampleId(tx.last_insert_rowid()));
        }
        Ok(ids)
    })
    .await
}

/// Retrieves a sample by its ID.
pub async fn get_by_id(db: &Database, id: SampleId) -> Result<Option<EmailSample>> {
    db.with_conn(move |conn| {
        let sql = format!("SELECT {SAMPLE_COLUMNS} FROM email_samples WHERE id = ?1");
        let sample = conn
            .query_row(&sql, params![id.0], row_to_sample)
            .optional()?;
        Ok(sample)
    })
    .await
}

/// Retrieves up to `limit` samples with the given label, most recent first.
pub async fn find_by_label(db: &Database, label: &str, limit: u32) -> Result<Vec<EmailSample>> {
    let label = label.to_string();

    db.with_conn(move |conn| {
        let sql = format!(
            "SELECT {SAMPLE_COLUMNS} FROM email_samples
             WHERE label = ?1
             ORDER BY created_at DESC, id DESC
             LIMIT ?2"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![label, limit], row_to_sample)?;
        let samples: std::result::Result<Vec<_>, _> = rows.collect();
        Ok(samples?)
    })
    .await
}

/// Finds samples whose content contains `keyword`, most recent first.
///
/// Comparison uses the classifier's normalization, so case folding behaves
/// the same as keyword matching and `%`/`_` are treated literally. The label
/// filter is applied in SQL; the substring test is applied per row.
pub async fn search_by_keyword(
    db: &Database,
    keyword: &str,
    label_filter: Option<&str>,
) -> Result<Vec<EmailSample>> {
    let needle = normalize(keyword);
    let label_filter = label_filter.filter(|l| !l.is_empty()).map(String::from);

    db.with_conn(move |conn| {
        let mut samples = Vec::new();

        let mut collect = |row: &Row<'_>| -> rusqlite::Result<()> {
            let sample = row_to_sample(row)?;
            if normalize(&sample.content).contains(&needle) {
                samples.push(sample);
            }
            Ok(())
        };

        match &label_filter {
            Some(label) => {
                let sql = format!(
                    "SELECT {SAMPLE_COLUMNS} FROM email_samples
                     WHERE label = ?1
                     ORDER BY created_at DESC, id DESC"
                );
                let mut stmt = conn.prepare(&sql)?;
                let mut rows = stmt.query(params![label])?;
                while let Some(row) = rows.next()? {
                    collect(row)?;
                }
            }
            None => {
                let sql = format!(
                    "SELECT {SAMPLE_COLUMNS} FROM email_samples
                     ORDER BY created_at DESC, id DESC"
                );
                let mut stmt = conn.prepare(&sql)?;
                let mut rows = stmt.query([])?;
                while let Some(row) = rows.next()? {
                    collect(row)?;
                }
            }
        }

        Ok(samples)
    })
    .await
}

/// Sets a sample's label. Returns `false` when no row has that ID.
pub async fn update_label(db: &Database, id: SampleId, label: &str) -> Result<bool> {
    let label = label.to_string();

    db.with_conn(move |conn| {
        let changed = conn.execute(
            "UPDATE email_samples
             SET label = ?1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE id = ?2",
            params![label, id.0],
        )?;
        Ok(changed > 0)
    })
    .await
}

fn row_to_sample(row: &Row<'_>) -> std::result::Result<EmailSample, rusqlite::Error> {
    let created_at: String = row.get(4)?;
    let updated_at: String = row.get(5)?;

    Ok(EmailSample {
        id: SampleId(row.get(0)?),
        content: row.get(1)?,
        label: row.get(2)?,
        confidence: row.get(3)?,
        created_at: parse_timestamp(4, &created_at)?,
        updated_at: parse_timestamp(5, &updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    async fn count(db: &Database) -> Result<u64> {
        db.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM email_samples", [], |row| row.get(0))?;
            Ok(count as u64)
        })
        .await
    }

    /// Pins a sample's creation time so ordering tests do not depend on the clock.
    async fn set_created_at(db: &Database, id: SampleId, ts: &'static str) {
        db.with_conn(move |conn| {
            conn.execute(
                "UPDATE email_samples SET created_at = ?1 WHERE id = ?2",
                params![ts, id.0],
            )?;
            Ok(())
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn insert_and_get() {
        let db = setup().await;
        let id = insert(&db, &NewSample::new("周末家庭聚会", "personal"))
            .await
            .unwrap();

        let sample = get_by_id(&db, id).await.unwrap().unwrap();
        assert_eq!(sample.content, "周末家庭聚会");
        assert_eq!(sample.label, "personal");
        assert_eq!(sample.confidence, 1.0);
        assert_eq!(sample.created_at, sample.updated_at);
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let db = setup().await;
        let first = insert(&db, &NewSample::new("a", "work")).await.unwrap();
        let second = insert(&db, &NewSample::new("b", "work")).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let db = setup().await;
        assert!(get_by_id(&db, SampleId(404)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_label_orders_recent_first_and_limits() {
        let db = setup().await;
        let old = insert(&db, &NewSample::new("old", "work")).await.unwrap();
        let new = insert(&db, &NewSample::new("new", "work")).await.unwrap();
        let mid = insert(&db, &NewSample::new("mid", "work")).await.unwrap();
        insert(&db, &NewSample::new("other", "personal")).await.unwrap();

        set_created_at(&db, old, "2025-01-01T00:00:00.000Z").await;
        set_created_at(&db, mid, "2025-01-02T00:00:00.000Z").await;
        set_created_at(&db, new, "2025-01-03T00:00:00.000Z").await;

        let all = find_by_label(&db, "work", 10).await.unwrap();
        let contents: Vec<_> = all.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["new", "mid", "old"]);

        let limited = find_by_label(&db, "work", 2).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].id, new);

        assert!(find_by_label(&db, "work", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn same_timestamp_breaks_tie_by_id() {
        let db = setup().await;
        let a = insert(&db, &NewSample::new("a", "work")).await.unwrap();
        let b = insert(&db, &NewSample::new("b", "work")).await.unwrap();
        set_created_at(&db, a, "2025-01-01T00:00:00.000Z").await;
        set_created_at(&db, b, "2025-01-01T00:00:00.000Z").await;

        let samples = find_by_label(&db, "work", 10).await.unwrap();
        assert_eq!(samples[0].id, b);
        assert_eq!(samples[1].id, a);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_filters_label() {
        let db = setup().await;
        insert(&db, &NewSample::new("Project DEADLINE tomorrow", "work"))
            .await
            .unwrap();
        insert(&db, &NewSample::new("deadline for the party", "personal"))
            .await
            .unwrap();
        insert(&db, &NewSample::new("nothing relevant", "work"))
            .await
            .unwrap();

        let all = search_by_keyword(&db, "Deadline", None).await.unwrap();
        assert_eq!(all.len(), 2);

        let work = search_by_keyword(&db, "deadline", Some("work")).await.unwrap();
        assert_eq!(work.len(), 1);
        assert_eq!(work[0].label, "work");
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let db = setup().await;
        insert(&db, &NewSample::new("50% off", "promotional"))
            .await
            .unwrap();
        insert(&db, &NewSample::new("500 items", "promotional"))
            .await
            .unwrap();

        let hits = search_by_keyword(&db, "0%", None).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "50% off");
    }

    #[tokio::test]
    async fn empty_label_filter_means_no_filter() {
        let db = setup().await;
        insert(&db, &NewSample::new("会议纪要", "work")).await.unwrap();
        insert(&db, &NewSample::new("会议邀请", "personal"))
            .await
            .unwrap();

        let hits = search_by_keyword(&db, "会议", Some("")).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn update_label_reports_existence() {
        let db = setup().await;
        let id = insert(&db, &NewSample::new("text", "unknown")).await.unwrap();
        set_created_at(&db, id, "2025-01-01T00:00:00.000Z").await;
        let before = get_by_id(&db, id).await.unwrap().unwrap();

        assert!(update_label(&db, id, "work").await.unwrap());
        assert!(!update_label(&db, SampleId(999), "work").await.unwrap());

        let after = get_by_id(&db, id).await.unwrap().unwrap();
        assert_eq!(after.label, "work");
        assert_eq!(after.content, before.content);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn insert_batch_is_all_or_nothing() {
        let db = setup().await;
        let ids = insert_batch(
            &db,
            &[NewSample::new("a", "work"), NewSample::new("b", "personal")],
        )
        .await
        .unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(count(&db).await.unwrap(), 2);
    }
}
