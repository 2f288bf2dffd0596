//! SQL schema definitions as const strings.
//!
//! Contains the SQLite schema for samples, the label catalog and analysis
//! evidence. Timestamps are column defaults so the store clock stamps rows.

use rusqlite::{params, Connection};

use crate::domain::default_labels;

/// SQL to create the email_samples table.
pub const CREATE_EMAIL_SAMPLES: &str = r#"
CREATE TABLE IF NOT EXISTS email_samples (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT NOT NULL,
    label TEXT NOT NULL,
    confidence_score REAL NOT NULL DEFAULT 1.0,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)
"#;

/// SQL to create sample indexes.
pub const CREATE_EMAIL_SAMPLE_INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_email_samples_label ON email_samples(label);
CREATE INDEX IF NOT EXISTS idx_email_samples_created ON email_samples(created_at DESC)
"#;

/// SQL to create the label_definitions table.
pub const CREATE_LABEL_DEFINITIONS: &str = r#"
CREATE TABLE IF NOT EXISTS label_definitions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    label_name TEXT NOT NULL UNIQUE,
    description TEXT,
    category TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)
"#;

/// SQL to create the email_analysis_results table.
pub const CREATE_ANALYSIS_RESULTS: &str = r#"
CREATE TABLE IF NOT EXISTS email_analysis_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email_id INTEGER NOT NULL REFERENCES email_samples(id),
    detected_label TEXT NOT NULL,
    confidence_score REAL NOT NULL,
    analysis_timestamp TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)
"#;

/// SQL to create analysis result indexes.
pub const CREATE_ANALYSIS_RESULT_INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_analysis_results_email ON email_analysis_results(email_id);
CREATE INDEX IF NOT EXISTS idx_analysis_results_label ON email_analysis_results(detected_label);
CREATE INDEX IF NOT EXISTS idx_analysis_results_timestamp ON email_analysis_results(analysis_timestamp)
"#;

/// Returns all schema creation statements in order.
pub fn all_migrations() -> Vec<&'static str> {
    vec![
        CREATE_EMAIL_SAMPLES,
        CREATE_EMAIL_SAMPLE_INDEXES,
        CREATE_LABEL_DEFINITIONS,
        CREATE_ANALYSIS_RESULTS,
        CREATE_ANALYSIS_RESULT_INDEXES,
    ]
}

/// Seeds the default label catalog. Existing names are left untouched.
pub fn seed_default_labels(conn: &Connection) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO label_definitions (label_name, description, category)
         VALUES (?1, ?2, ?3)",
    )?;

    for (name, description, category) in default_labels::CATALOG {
        stmt.execute(params![name, description, category])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_migrations_returns_statements() {
        let migrations = all_migrations();
        assert_eq!(migrations.len(), 5);
    }

    #[test]
    fn results_reference_samples() {
        assert!(CREATE_ANALYSIS_RESULTS.contains("REFERENCES email_samples(id)"));
    }

    #[test]
    fn indexes_use_if_not_exists() {
        assert!(CREATE_EMAIL_SAMPLE_INDEXES.contains("IF NOT EXISTS"));
        assert!(CREATE_ANALYSIS_RESULT_INDEXES.contains("IF NOT EXISTS"));
    }

    #[test]
    fn seeding_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        for migration in all_migrations() {
            conn.execute_batch(migration).unwrap();
        }

        seed_default_labels(&conn).unwrap();
        seed_default_labels(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM label_definitions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count as usize, default_labels::CATALOG.len());
    }
}
