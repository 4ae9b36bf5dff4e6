//! Quality of the explanation attached to a question.

use crate::bundle::MetricBundle;
use crate::text::{keyword_set, word_set, RATIONALE_STOPWORDS};

/// Rationales shorter than this many characters score zero.
const MIN_RATIONALE_CHARS: usize = 10;

const JUSTIFICATION_TERMS: &[&str] = &[
    "because",
    "since",
    "therefore",
    "thus",
    "hence",
    "as a result",
    "due to",
    "reason",
    "explains",
    "indicates",
];

const EDUCATIONAL_TERMS: &[&str] = &[
    "process",
    "function",
    "mechanism",
    "principle",
    "concept",
    "means",
    "refers to",
    "defined as",
    "characterized by",
];

const ALTERNATIVE_TERMS: &[&str] = &[
    "however",
    "whereas",
    "while",
    "unlike",
    "incorrect",
    "wrong",
    "not",
    "other options",
    "alternatives",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RationaleScore {
    pub rationale_quality: f64,
    pub length_score: f64,
    pub question_reference: f64,
    pub answer_justification: f64,
    pub answer_reference: f64,
    pub educational_value: f64,
    pub addresses_alternatives: f64,
    pub word_count: usize,
}

impl RationaleScore {
    fn empty() -> Self {
        Self {
            rationale_quality: 0.0,
            length_score: 0.0,
            question_reference: 0.0,
            answer_justification: 0.0,
            answer_reference: 0.0,
            educational_value: 0.0,
            addresses_alternatives: 0.0,
            word_count: 0,
        }
    }
}

/// Score an explanation against the question it explains and the text of
/// the correct option.
///
/// `correct_answer` may be empty when the answer key is unknown; the
/// answer-reference component then scores 0.
pub fn score_rationale(rationale: &str, question: &str, correct_answer: &str) -> RationaleScore {
    if rationale.trim().chars().count() < MIN_RATIONALE_CHARS {
        return RationaleScore::empty();
    }

    let lower = rationale.to_lowercase();
    let word_count = rationale.split_whitespace().count();

    let length_score = match word_count {
        20..=100 => 1.0,
        10..=19 | 101..=150 => 0.7,
        _ => 0.4,
    };

    let rationale_words = word_set(rationale);

    let question_keywords = keyword_set(question, RATIONALE_STOPWORDS);
    let overlap = question_keywords.intersection(&rationale_words).count();
    let question_reference = (overlap as f64 / question_keywords.len().max(1) as f64).min(1.0);

    let answer_justification = if JUSTIFICATION_TERMS.iter().any(|t| lower.contains(t)) {
        1.0
    } else {
        0.5
    };

    let answer_keywords = keyword_set(correct_answer, RATIONALE_STOPWORDS);
    let answer_overlap = answer_keywords.intersection(&rationale_words).count();
    let answer_reference = (answer_overlap as f64 / answer_keywords.len().max(1) as f64).min(1.0);

    let educational = EDUCATIONAL_TERMS
        .iter()
        .filter(|t| lower.contains(*t))
        .count();
    let educational_value = (educational as f64 / 2.0).min(1.0);

    let addresses_alternatives = if ALTERNATIVE_TERMS.iter().any(|t| lower.contains(t)) {
        1.0
    } else {
        0.7
    };

    let rationale_quality = 0.20 * length_score
        + 0.20 * question_reference
        + 0.20 * answer_justification
        + 0.15 * answer_reference
        + 0.15 * educational_value
        + 0.10 * addresses_alternatives;

    RationaleScore {
        rationale_quality,
        length_score,
        question_reference,
        answer_justification,
        answer_reference,
        educational_value,
        addresses_alternatives,
        word_count,
    }
}

// Clarity already owns `length_score` and `word_count`; the rationale
// variants are prefixed so both survive in one bundle.
impl From<RationaleScore> for MetricBundle {
    fn from(s: RationaleScore) -> Self {
        let mut bundle = MetricBundle::new();
        bundle
            .scalar("rationale_quality", s.rationale_quality)
            .scalar("rationale_length_score", s.length_score)
            .scalar("question_reference", s.question_reference)
            .scalar("answer_justification", s.answer_justification)
            .scalar("answer_reference", s.answer_reference)
            .scalar("educational_value", s.educational_value)
            .scalar("addresses_alternatives", s.addresses_alternatives)
            .scalar("rationale_word_count", s.word_count as f64);
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_rationale_scores_zero() {
        let s = score_rationale("Too short", "What is X?", "foo");
        assert_eq!(s, RationaleScore::empty());
        let s = score_rationale("", "What is X?", "foo");
        assert_eq!(s.rationale_quality, 0.0);
    }

    #[test]
    fn justified_rationale_scores_well() {
        let rationale = "Chlorophyll is correct because this pigment absorbs light energy, \
                         which drives the process of photosynthesis in plant cells. \
                         However, carotenoids play only an accessory role.";
        let s = score_rationale(rationale, "Which pigment absorbs light?", "Chlorophyll");
        assert_eq!(s.length_score, 1.0);
        assert_eq!(s.answer_justification, 1.0);
        assert_eq!(s.addresses_alternatives, 1.0);
        assert_eq!(s.answer_reference, 1.0);
        assert!((s.educational_value - 0.5).abs() < 1e-9);
        assert!(s.rationale_quality > 0.7, "got {}", s.rationale_quality);
    }

    #[test]
    fn plain_rationale_uses_fallback_components() {
        let s = score_rationale("Paris sits on the Seine river.", "Capital?", "Paris");
        assert_eq!(s.answer_justification, 0.5);
        assert_eq!(s.addresses_alternatives, 0.7);
        assert_eq!(s.length_score, 0.4);
    }

    #[test]
    fn empty_correct_answer_does_not_divide_by_zero() {
        let s = score_rationale("A sufficiently long explanation text.", "What?", "");
        assert_eq!(s.answer_reference, 0.0);
        assert!(s.rationale_quality.is_finite());
    }

    #[test]
    fn bundle_keys_are_prefixed() {
        let bundle = MetricBundle::from(score_rationale(
            "This explanation is long enough to count.",
            "What?",
            "x",
        ));
        assert!(bundle.contains("rationale_length_score"));
        assert!(bundle.contains("rationale_word_count"));
        assert!(!bundle.contains("length_score"));
    }
}
