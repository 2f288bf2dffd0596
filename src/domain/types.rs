//! Core identifier types for domain entities.
//!
//! Identities are assigned by the store on insert and never change afterwards.
//! The newtype wrappers keep sample and result identities from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of an email sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SampleId(pub i64);

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SampleId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Store-assigned identifier of a persisted analysis result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResultId(pub i64);

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ResultId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
