//! Label catalog domain types.
//!
//! The catalog is background reference data. Classification does not
//! validate detected labels against it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog entry describing a known label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDefinition {
    pub id: i64,
    /// Unique label name, e.g. "work".
    pub name: String,
    /// Human readable description.
    pub description: Option<String>,
    /// Grouping such as "commercial" or "system".
    pub category: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Default catalog seeded on bootstrap.
pub mod default_labels {
    /// `(name, description, category)` triples in seeding order.
    pub const CATALOG: &[(&str, &str, &str)] = &[
        ("promotional", "Promotional email", "commercial"),
        ("unsolicited-bulk", "Unsolicited bulk email", "security"),
        ("work", "Work email", "business"),
        ("personal", "Personal email", "personal"),
        ("notification", "Notification email", "system"),
        ("urgent", "Urgent email", "priority"),
        ("social", "Social email", "personal"),
        ("newsletter", "Newsletter", "information"),
    ];

    /// Returns the catalog label names.
    pub fn names() -> Vec<&'static str> {
        CATALOG.iter().map(|(name, _, _)| *name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names_are_unique() {
        let mut names = default_labels::names();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn catalog_contains_expected_categories() {
        let spam = default_labels::CATALOG
            .iter()
            .find(|(name, _, _)| *name == "unsolicited-bulk")
            .unwrap();
        assert_eq!(spam.2, "security");
        assert_eq!(default_labels::names().len(), 8);
    }
}
