//! Keyword matcher.
//!
//! Turns text plus a rule snapshot into ordered match evidence. Pure: no I/O
//! and no state beyond the configured confidence.

use crate::domain::{Analysis, MatchResult};

use super::rules::RuleSet;

/// Confidence assigned to every keyword hit unless configured otherwise.
pub const DEFAULT_KEYWORD_CONFIDENCE: f64 = 0.8;

/// Folds text into the comparable form used for matching and search.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Rule-based matcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matcher {
    confidence: f64,
}

impl Matcher {
    /// Creates a matcher that scores every hit with `confidence`.
    pub fn new(confidence: f64) -> Self {
        Self { confidence }
    }

    /// Confidence given to keyword hits.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Returns at most one match per label, in rule order.
    ///
    /// For each label the first registered keyword found in the content wins;
    /// later keywords of that label are not examined.
    pub fn find_matches(&self, content: &str, rules: &RuleSet) -> Vec<MatchResult> {
        let haystack = normalize(content);

        rules
            .iter()
            .filter_map(|rule| {
                rule.normalized_keywords()
                    .find(|(_, folded)| haystack.contains(folded))
                    .map(|(keyword, _)| MatchResult {
                        label: rule.label().to_string(),
                        keyword: keyword.to_string(),
                        confidence: self.confidence,
                    })
            })
            .collect()
    }

    /// Classifies `content` and derives its primary label.
    pub fn analyze(&self, content: &str, rules: &RuleSet) -> Analysis {
        Analysis::new(content, self.find_matches(content, rules))
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORD_CONFIDENCE)
    }
}
