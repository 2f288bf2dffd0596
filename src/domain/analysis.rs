//! Classification evidence and aggregate types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ResultId, SampleId};

/// Label assigned when no keyword matches.
pub const UNKNOWN_LABEL: &str = "unknown";

/// A single label-keyword hit produced by the matcher.
///
/// Transient: it only lives for the duration of one classification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Label whose rule fired.
    pub label: String,
    /// The keyword that triggered the match, as registered.
    pub keyword: String,
    /// Policy confidence for a keyword hit.
    pub confidence: f64,
}

/// Outcome of classifying one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// The analyzed text.
    pub content: String,
    /// Evidence in rule-registry order, at most one per label.
    pub matches: Vec<MatchResult>,
    /// Label of the first match, or [`UNKNOWN_LABEL`].
    pub primary_label: String,
}

impl Analysis {
    /// Builds an analysis, deriving the primary label from the first match.
    pub fn new(content: impl Into<String>, matches: Vec<MatchResult>) -> Self {
        let primary_label = matches
            .first()
            .map(|m| m.label.clone())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());

        Self {
            content: content.into(),
            matches,
            primary_label,
        }
    }

    /// Number of labels that matched.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Returns the primary match, if any keyword fired.
    pub fn primary_match(&self) -> Option<&MatchResult> {
        self.matches.first()
    }

    /// Whether no rule matched.
    pub fn is_unknown(&self) -> bool {
        self.matches.is_empty()
    }
}

/// A persisted evidence row linking a sample to one detected label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: ResultId,
    /// Sample this evidence was derived from. Weak reference by identity.
    pub sample_id: SampleId,
    pub detected_label: String,
    pub confidence: f64,
    pub analyzed_at: DateTime<Utc>,
}

/// Aggregate evidence statistics for one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStatistic {
    pub label: String,
    /// Number of evidence rows carrying this label.
    pub count: u64,
    /// Arithmetic mean of their confidences.
    pub average_confidence: f64,
}
