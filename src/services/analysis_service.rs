//! Analysis service for classifying and persisting email samples.
//!
//! The [`AnalysisService`] runs the matcher against a rule snapshot, files the
//! sample under its primary label and records every match as evidence.
//!
//! # Write policy
//!
//! The sample insert and the evidence inserts are separate store calls with
//! no wrapping transaction:
//!
//! - if the sample insert fails, the call fails and no evidence is written
//! - if an evidence insert fails, it is logged and skipped; the sample and
//!   the remaining evidence rows are kept

use serde::Serialize;
use thiserror::Error;

use crate::classifier::{Matcher, RuleRegistry};
use crate::domain::{
    Analysis, AnalysisResult, EmailSample, LabelStatistic, NewSample, SampleId,
    DEFAULT_SAMPLE_CONFIDENCE,
};

use super::store::{ResultStore, SampleStore, StoreError};

/// Errors that can occur during analysis operations.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The sample could not be persisted; nothing was written.
    #[error("sample not saved: {0}")]
    SampleNotSaved(#[source] StoreError),

    /// A read or update against a store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for analysis operations.
pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// What a single classify-and-save call wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    /// Identity of the stored sample.
    pub sample_id: SampleId,
    /// The classification that was stored.
    pub analysis: Analysis,
    /// Evidence rows successfully written.
    pub results_saved: usize,
    /// Evidence rows that failed and were skipped.
    pub results_failed: usize,
}

impl SaveReport {
    /// Number of evidence inserts attempted.
    pub fn results_attempted(&self) -> usize {
        self.results_saved + self.results_failed
    }
}

/// Point-in-time aggregate view of stored evidence and active rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    /// Evidence statistics per detected label.
    pub label_distribution: Vec<LabelStatistic>,
    /// Number of labels with a rule.
    pub rule_count: usize,
    /// Rule labels in registry order.
    pub label_names: Vec<String>,
}

/// Service orchestrating classification and persistence.
pub struct AnalysisService<S: SampleStore, R: ResultStore> {
    samples: S,
    results: R,
    rules: RuleRegistry,
    matcher: Matcher,
}

impl<S: SampleStore, R: ResultStore> AnalysisService<S, R> {
    /// Creates a service with the built-in rules and default matcher.
    pub fn new(samples: S, results: R) -> Self {
        Self::with_rules(samples, results, RuleRegistry::new(), Matcher::default())
    }

    /// Creates a service with an explicit registry and matcher.
    pub fn with_rules(samples: S, results: R, rules: RuleRegistry, matcher: Matcher) -> Self {
        Self {
            samples,
            results,
            rules,
            matcher,
        }
    }

    /// Returns the rule registry.
    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// Classifies text without persisting anything.
    pub fn analyze(&self, content: &str) -> Analysis {
        let rules = self.rules.snapshot();
        self.matcher.analyze(content, &rules)
    }

    /// Classifies `content`, stores it and its evidence, and returns its identity.
    pub async fn classify_and_save(&self, content: &str) -> ClassifyResult<SampleId> {
        self.classify_and_report(content)
            .await
            .map(|report| report.sample_id)
    }

    /// Like [`classify_and_save`](Self::classify_and_save) but reports how
    /// many evidence rows were written.
    pub async fn classify_and_report(&self, content: &str) -> ClassifyResult<SaveReport> {
        let analysis = self.analyze(content);
        tracing::debug!(
            matches = analysis.match_count(),
            label = %analysis.primary_label,
            "email analyzed"
        );

        let confidence = analysis
            .primary_match()
            .map(|m| m.confidence)
            .unwrap_or(DEFAULT_SAMPLE_CONFIDENCE);
        let sample = NewSample::new(content, analysis.primary_label.clone())
            .with_confidence(confidence);

        let sample_id = match self.samples.insert(&sample).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(error = %e, "failed to save email sample");
                return Err(ClassifyError::SampleNotSaved(e));
            }
        };

        let mut results_saved = 0;
        let mut results_failed = 0;
        for hit in &analysis.matches {
            match self
                .results
                .insert(sample_id, &hit.label, hit.confidence)
                .await
            {
                Ok(_) => results_saved += 1,
                Err(e) => {
                    results_failed += 1;
                    tracing::warn!(
                        sample_id = %sample_id,
                        label = %hit.label,
                        error = %e,
                        "failed to save analysis result"
                    );
                }
            }
        }

        tracing::info!(sample_id = %sample_id, label = %analysis.primary_label, "processed and saved email");

        Ok(SaveReport {
            sample_id,
            analysis,
            results_saved,
            results_failed,
        })
    }

    /// Classifies and saves each text in order. A failed item does not stop the batch.
    pub async fn batch_classify_and_save<I, T>(&self, contents: I) -> Vec<ClassifyResult<SampleId>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut outcomes = Vec::new();
        for content in contents {
            outcomes.push(self.classify_and_save(content.as_ref()).await);
        }

        let failed = outcomes.iter().filter(|o| o.is_err()).count();
        tracing::info!(total = outcomes.len(), failed, "batch processed");
        outcomes
    }

    /// Stores a pre-labelled sample without running the matcher.
    pub async fn add_sample(&self, content: &str, label: &str) -> ClassifyResult<SampleId> {
        self.samples
            .insert(&NewSample::new(content, label))
            .await
            .map_err(ClassifyError::SampleNotSaved)
    }

    /// Stores pre-labelled samples in one atomic write.
    pub async fn import_samples(&self, samples: &[(&str, &str)]) -> ClassifyResult<Vec<SampleId>> {
        let samples: Vec<NewSample> = samples
            .iter()
            .map(|(content, label)| NewSample::new(*content, *label))
            .collect();

        let ids = self
            .samples
            .insert_batch(&samples)
            .await
            .map_err(ClassifyError::SampleNotSaved)?;
        tracing::info!(count = ids.len(), "imported email samples");
        Ok(ids)
    }

    /// Gets a sample by identity.
    pub async fn get_sample(&self, id: SampleId) -> ClassifyResult<Option<EmailSample>> {
        Ok(self.samples.get(id).await?)
    }

    /// Gets the evidence recorded for a sample.
    pub async fn results_for_sample(&self, id: SampleId) -> ClassifyResult<Vec<AnalysisResult>> {
        Ok(self.results.for_sample(id).await?)
    }

    /// Gets up to `limit` samples filed under `label`, most recent first.
    pub async fn query_by_label(&self, label: &str, limit: u32) -> ClassifyResult<Vec<EmailSample>> {
        Ok(self.samples.find_by_label(label, limit).await?)
    }

    /// Finds samples containing `keyword`, optionally restricted to one label.
    pub async fn search(
        &self,
        keyword: &str,
        label_filter: Option<&str>,
    ) -> ClassifyResult<Vec<EmailSample>> {
        Ok(self.samples.search_by_keyword(keyword, label_filter).await?)
    }

    /// Changes a sample's label. Returns `false` if no such sample exists.
    ///
    /// The new label is not validated against the rules or the catalog.
    pub async fn relabel(&self, id: SampleId, label: &str) -> ClassifyResult<bool> {
        let updated = self.samples.update_label(id, label).await?;
        if updated {
            tracing::info!(sample_id = %id, label, "sample relabeled");
        } else {
            tracing::debug!(sample_id = %id, "relabel target not found");
        }
        Ok(updated)
    }

    /// Replaces the keywords for `label`. Classifications already in flight
    /// keep the rules they started with.
    pub fn add_rule<I, T>(&self, label: &str, keywords: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.rules.add_rule(label, keywords);
        if let Some(rule) = self.rules.snapshot().get(label) {
            tracing::info!(label, keywords = rule.keywords().len(), "added analysis rule");
        }
    }

    /// Rule labels in registry order.
    pub fn rule_labels(&self) -> Vec<String> {
        self.rules.snapshot().labels()
    }

    /// Collects label statistics and rule information into one snapshot.
    pub async fn insights(&self) -> ClassifyResult<Insights> {
        let label_distribution = self.results.label_statistics().await?;
        let rules = self.rules.snapshot();

        Ok(Insights {
            label_distribution,
            rule_count: rules.len(),
            label_names: rules.labels(),
        })
    }
}
