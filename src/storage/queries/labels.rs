//! Label catalog queries.
//!
//! Read access to `label_definitions`. Rows are seeded at bootstrap.

use rusqlite::{Connection, Result, Row};

use crate::domain::LabelDefinition;

use super::parse_timestamp;

/// Gets all active catalog entries in seeding order.
pub fn get_active(conn: &Connection) -> Result<Vec<LabelDefinition>> {
    let mut stmt = conn.prepare(
        "SELECT id, label_name, description, category, is_active, created_at
         FROM label_definitions WHERE is_active = 1 ORDER BY id",
    )?;

    let labels = stmt.query_map([], row_to_definition)?;
    labels.collect()
}

fn row_to_definition(row: &Row<'_>) -> Result<LabelDefinition> {
    let created_at: String = row.get(5)?;

    Ok(LabelDefinition {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        is_active: row.get(4)?,
        created_at: parse_timestamp(5, &created_at)?,
    })
}
