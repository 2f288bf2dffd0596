//! Rule-based classification.
//!
//! - [`RuleRegistry`]: runtime-editable label to keyword mapping with
//!   snapshot reads
//! - [`Matcher`]: pure function from text and a [`RuleSet`] to evidence

mod matcher;
mod rules;

pub use matcher::{normalize, Matcher, DEFAULT_KEYWORD_CONFIDENCE};
pub use rules::{Rule, RuleRegistry, RuleSet, DEFAULT_RULES};
