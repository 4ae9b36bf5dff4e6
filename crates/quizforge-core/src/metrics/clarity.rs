//! Clarity of the question stem.

use crate::bundle::MetricBundle;

const AMBIGUOUS_TERMS: &[&str] = &[
    "maybe", "perhaps", "possibly", "might", "could", "some", "somewhat", "kind of", "sort of",
    "various",
];

const INTERROGATIVES: &[&str] = &["what", "which", "how", "why", "when", "who", "where"];

const NEGATIONS: &[&str] = &["not", "n't", "never", "no ", "none", "neither"];

/// Clarity score and its six components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClarityScore {
    /// Weighted total in [0, 1].
    pub clarity: f64,
    pub length_score: f64,
    pub question_mark_score: f64,
    pub single_question_score: f64,
    pub ambiguity_score: f64,
    pub interrogative_score: f64,
    pub negation_clarity: f64,
    pub word_count: usize,
}

/// Score how clearly a question stem is phrased.
pub fn score_clarity(question_text: &str) -> ClarityScore {
    let normalized = crate::text::collapse_whitespace(question_text);
    let lower = normalized.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let word_count = words.len();

    let length_score = match word_count {
        10..=25 => 1.0,
        5..=9 | 26..=35 => 0.7,
        _ => 0.4,
    };

    let question_marks = normalized.matches('?').count();
    let question_mark_score = if question_marks > 0 { 1.0 } else { 0.3 };
    let single_question_score = match question_marks {
        1 => 1.0,
        0 => 0.5,
        _ => 0.3,
    };

    let ambiguous = AMBIGUOUS_TERMS
        .iter()
        .filter(|term| lower.contains(*term))
        .count();
    let ambiguity_score = (1.0 - ambiguous as f64 * 0.2).max(0.0);

    let has_interrogative = words
        .iter()
        .take(5)
        .any(|w| INTERROGATIVES.contains(w));
    let interrogative_score = if has_interrogative { 1.0 } else { 0.6 };

    let negation_count: usize = NEGATIONS.iter().map(|neg| lower.matches(neg).count()).sum();
    let negation_clarity = match negation_count {
        0 => 1.0,
        1 => 0.9,
        _ => 0.5,
    };

    let clarity = 0.20 * length_score
        + 0.15 * question_mark_score
        + 0.15 * single_question_score
        + 0.20 * ambiguity_score
        + 0.15 * interrogative_score
        + 0.15 * negation_clarity;

    ClarityScore {
        clarity,
        length_score,
        question_mark_score,
        single_question_score,
        ambiguity_score,
        interrogative_score,
        negation_clarity,
        word_count,
    }
}

impl From<ClarityScore> for MetricBundle {
    fn from(s: ClarityScore) -> Self {
        let mut bundle = MetricBundle::new();
        bundle
            .scalar("clarity", s.clarity)
            .scalar("length_score", s.length_score)
            .scalar("question_mark_score", s.question_mark_score)
            .scalar("single_question_score", s.single_question_score)
            .scalar("ambiguity_score", s.ambiguity_score)
            .scalar("interrogative_score", s.interrogative_score)
            .scalar("negation_clarity", s.negation_clarity)
            .scalar("word_count", s.word_count as f64);
        bundle
    }
}
