//! quizforge-core — Question parsing, quality scoring, and learner modeling.
//!
//! This crate turns loosely formatted multiple-choice question text into
//! structured records, scores those records with heuristic text metrics,
//! and tracks a learner's skill rating from answered questions.

pub mod bundle;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod learner;
pub mod metrics;
pub mod model;
pub mod parser;
pub mod report;
pub mod store;
pub mod text;
