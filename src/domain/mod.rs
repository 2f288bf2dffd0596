//! Domain layer types for mail-labeler.
//!
//! This module contains the plain data types shared by the classifier, the
//! storage layer and the services: samples, evidence, statistics and the
//! label catalog.

mod analysis;
mod label;
mod sample;
mod types;

pub use analysis::{Analysis, AnalysisResult, LabelStatistic, MatchResult, UNKNOWN_LABEL};
pub use label::{default_labels, LabelDefinition};
pub use sample::{EmailSample, NewSample, DEFAULT_SAMPLE_CONFIDENCE};
pub use types::{ResultId, SampleId};
