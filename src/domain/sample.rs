//! Email sample domain types.
//!
//! A sample is the authoritative record of a processed email: its text and
//! the label it was filed under.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SampleId;

/// Confidence recorded for samples inserted outside the matching path.
pub const DEFAULT_SAMPLE_CONFIDENCE: f64 = 1.0;

/// A persisted email sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSample {
    /// Store-assigned identifier.
    pub id: SampleId,
    /// Raw email text.
    pub content: String,
    /// Winning label, or the `unknown` sentinel.
    pub label: String,
    /// Confidence attached to the label.
    pub confidence: f64,
    /// When the store first recorded the sample.
    pub created_at: DateTime<Utc>,
    /// When the row was last modified.
    pub updated_at: DateTime<Utc>,
}

/// A sample that has not been written yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSample {
    pub content: String,
    pub label: String,
    pub confidence: f64,
}

impl NewSample {
    /// Creates a sample with the default confidence.
    pub fn new(content: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            label: label.into(),
            confidence: DEFAULT_SAMPLE_CONFIDENCE,
        }
    }

    /// Overrides the confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }
}
