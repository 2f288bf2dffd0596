//! Business services layer.
//!
//! Services sit between callers and the storage layer:
//!
//! ```text
//! Caller (binary, batch driver)
//!          |
//!          v
//!    Services Layer  <-- You are here
//!          |
//!          v
//! Infrastructure (Classifier, Storage)
//! ```
//!
//! - [`AnalysisService`]: classifies email text and persists samples and evidence
//! - [`SampleStore`] / [`ResultStore`]: persistence seams the service depends on

mod analysis_service;
mod store;

pub use analysis_service::{
    AnalysisService, ClassifyError, ClassifyResult, Insights, SaveReport,
};
pub use store::{ResultStore, SampleStore, StoreError, StoreResult};
