//! Heuristic question-quality metrics.
//!
//! Each sub-module is a pure function of its text inputs and returns a
//! typed score that converts into a [`MetricBundle`](crate::bundle::MetricBundle).
//! None of them fail: divisions by empty counts fall back to 0.0 or to a
//! neutral default.

pub mod clarity;
pub mod distractor;
pub mod diversity;
pub mod rationale;
pub mod readability;
pub mod relevance;

pub use clarity::{score_clarity, ClarityScore};
pub use distractor::{
    score_distractor_plausibility, score_distractor_quality, DistractorPlausibility,
    DistractorQuality,
};
pub use diversity::{score_option_similarity, OptionSimilarity};
pub use rationale::{score_rationale, RationaleScore};
pub use readability::{score_readability, ReadabilityLevel, ReadabilityScore};
pub use relevance::{score_relevance, RelevanceScore};
