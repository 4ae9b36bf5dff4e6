//! quizforge-report — human-readable renderings of an evaluation report.

pub mod html;
pub mod text;

use std::collections::BTreeMap;

/// Metric families in report order, each with its base metric names.
pub const METRIC_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Clarity",
        &[
            "clarity",
            "length_score",
            "question_mark_score",
            "single_question_score",
            "ambiguity_score",
            "interrogative_score",
            "negation_clarity",
            "word_count",
        ],
    ),
    (
        "Relevance",
        &[
            "relevance",
            "option_relevance",
            "knowledge_base_relevance",
            "technical_terminology",
            "option_consistency",
        ],
    ),
    (
        "Readability",
        &[
            "flesch_kincaid_grade",
            "flesch_reading_ease",
            "avg_sentence_length",
            "avg_syllables_per_word",
        ],
    ),
    (
        "Distractor Quality",
        &[
            "DPS",
            "num_distractors",
            "distractor_quality_detailed",
            "homogeneity",
            "grammatical_parallelism",
            "no_obvious_patterns",
            "keyword_relevance",
            "substantiveness",
            "avg_length",
            "length_variance",
        ],
    ),
    ("Option Diversity", &["SOS", "option_diversity", "num_pairs"]),
    (
        "Rationale",
        &[
            "rationale_quality",
            "rationale_length_score",
            "question_reference",
            "answer_justification",
            "answer_reference",
            "educational_value",
            "addresses_alternatives",
            "rationale_word_count",
        ],
    ),
];

const STAT_PREFIXES: [&str; 3] = ["avg", "min", "max"];

/// Aggregate statistics for one base metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRow<'a> {
    pub metric: &'a str,
    pub avg: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

fn row<'a>(aggregate: &BTreeMap<String, f64>, metric: &'a str) -> MetricRow<'a> {
    let stat = |prefix: &str| aggregate.get(&format!("{prefix}_{metric}")).copied();
    MetricRow {
        metric,
        avg: stat("avg"),
        min: stat("min"),
        max: stat("max"),
    }
}

/// Group `avg_`/`min_`/`max_` aggregate keys by category.
///
/// Metrics that belong to no known category end up under "Other".
pub fn group_aggregates(
    aggregate: &BTreeMap<String, f64>,
) -> Vec<(&'static str, Vec<MetricRow<'_>>)> {
    let present = |r: &MetricRow| r.avg.is_some() || r.min.is_some() || r.max.is_some();

    let mut groups = Vec::new();
    for (category, metrics) in METRIC_CATEGORIES {
        let rows: Vec<MetricRow> = metrics
            .iter()
            .map(|m| row(aggregate, m))
            .filter(present)
            .collect();
        if !rows.is_empty() {
            groups.push((*category, rows));
        }
    }

    let known = |base: &str| METRIC_CATEGORIES.iter().any(|(_, ms)| ms.contains(&base));
    let mut other: Vec<&str> = Vec::new();
    for key in aggregate.keys() {
        let base = STAT_PREFIXES
            .iter()
            .find_map(|p| key.strip_prefix(p).and_then(|k| k.strip_prefix('_')));
        if let Some(base) = base {
            if !known(base) && !other.contains(&base) {
                other.push(base);
            }
        }
    }
    if !other.is_empty() {
        groups.push(("Other", other.into_iter().map(|m| row(aggregate, m)).collect()));
    }

    groups
}
