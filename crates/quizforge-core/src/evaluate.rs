//! Per-question evaluation, batch aggregation, and session feedback.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bundle::MetricBundle;
use crate::metrics::{
    score_clarity, score_distractor_plausibility, score_distractor_quality,
    score_option_similarity, score_rationale, score_readability, score_relevance,
};
use crate::model::Question;
use crate::text::mean;

/// Run every scorer that applies to `question`.
///
/// Scorers whose inputs are missing are skipped rather than fed empty
/// text: no clarity without a stem, no distractor metrics without a
/// resolvable correct answer, no rationale metrics without an explanation.
pub fn evaluate(question: &Question, knowledge_base: Option<&str>) -> MetricBundle {
    let mut bundle = MetricBundle::new();
    let stem = question.question.as_str();

    if !stem.is_empty() {
        bundle.extend(score_clarity(stem).into());
    }

    if !stem.is_empty() && !question.options.is_empty() {
        bundle.extend(score_relevance(stem, &question.options, knowledge_base).into());
    }

    let mut readable = stem.to_string();
    for option in &question.options {
        readable.push(' ');
        readable.push_str(option);
    }
    bundle.extend(score_readability(&readable).into());

    match question.correct_option() {
        Some(correct) => {
            let distractors = question.distractors();
            bundle.extend(score_distractor_plausibility(stem, correct, &distractors).into());
            bundle.extend(score_distractor_quality(stem, correct, &distractors).into());
        }
        None => tracing::debug!("skipping distractor metrics: correct answer unresolved"),
    }

    if !question.options.is_empty() {
        bundle.extend(score_option_similarity(&question.options).into());
    }

    if let Some(explanation) = &question.explanation {
        let correct = question.correct_option().unwrap_or("");
        bundle.extend(score_rationale(explanation, stem, correct).into());
    }

    tracing::debug!("evaluated question with {} metrics", bundle.len());
    bundle
}

/// Metrics for a batch of questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchEvaluation {
    pub count: usize,
    /// `avg_`, `min_` and `max_` of every scalar metric seen in the batch.
    pub aggregate_metrics: BTreeMap<String, f64>,
    /// One bundle per question, series and labels included.
    pub per_question: Vec<MetricBundle>,
}

/// Evaluate each question and aggregate the scalar metrics.
///
/// A metric missing from some questions is aggregated over the questions
/// that have it.
pub fn evaluate_batch(questions: &[Question], knowledge_base: Option<&str>) -> BatchEvaluation {
    let per_question: Vec<MetricBundle> = questions
        .iter()
        .map(|q| evaluate(q, knowledge_base))
        .collect();

    BatchEvaluation {
        count: per_question.len(),
        aggregate_metrics: aggregate(&per_question),
        per_question,
    }
}

fn aggregate(bundles: &[MetricBundle]) -> BTreeMap<String, f64> {
    let mut values: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for bundle in bundles {
        for (name, value) in bundle.scalars() {
            values.entry(name).or_default().push(value);
        }
    }

    let mut aggregate = BTreeMap::new();
    for (name, vals) in values {
        let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        aggregate.insert(format!("avg_{name}"), mean(&vals));
        aggregate.insert(format!("min_{name}"), min);
        aggregate.insert(format!("max_{name}"), max);
    }
    aggregate
}

/// Cut-offs for the per-round quality check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackThresholds {
    #[serde(default = "default_dps_threshold")]
    pub dps_threshold: f64,
    #[serde(default = "default_diversity_threshold")]
    pub diversity_threshold: f64,
}

fn default_dps_threshold() -> f64 {
    0.6
}
fn default_diversity_threshold() -> f64 {
    0.5
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        Self {
            dps_threshold: default_dps_threshold(),
            diversity_threshold: default_diversity_threshold(),
        }
    }
}

/// Quick quality check shown to the learner after a round of questions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionFeedback {
    pub questions_scored: usize,
    pub avg_dps: f64,
    pub avg_option_diversity: f64,
    pub dps_good: bool,
    pub diversity_good: bool,
}

/// Average DPS and option diversity over the scorable questions.
///
/// Returns `None` when no question has four options and a correct answer.
pub fn session_feedback(
    questions: &[Question],
    thresholds: &FeedbackThresholds,
) -> Option<SessionFeedback> {
    let mut dps = Vec::new();
    let mut diversity = Vec::new();

    for q in questions.iter().filter(|q| q.is_scorable()) {
        let Some(correct) = q.correct_option() else {
            continue;
        };
        dps.push(score_distractor_plausibility(&q.question, correct, &q.distractors()).dps);
        diversity.push(score_option_similarity(&q.options).option_diversity);
    }

    if dps.is_empty() {
        return None;
    }

    let avg_dps = mean(&dps);
    let avg_option_diversity = mean(&diversity);
    Some(SessionFeedback {
        questions_scored: dps.len(),
        avg_dps,
        avg_option_diversity,
        dps_good: avg_dps > thresholds.dps_threshold,
        diversity_good: avg_option_diversity > thresholds.diversity_threshold,
    })
}
