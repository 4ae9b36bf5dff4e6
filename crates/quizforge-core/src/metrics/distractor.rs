//! Distractor plausibility (DPS) and detailed distractor quality.

use std::collections::HashSet;

use crate::bundle::MetricBundle;
use crate::text::{jaccard, keyword_set, mean, round_to, variance, word_set, DISTRACTOR_STOPWORDS};

/// Phrases that give away a distractor as filler.
const GIVEAWAY_PHRASES: &[&str] = &[
    "all of the above",
    "none of the above",
    "both a and b",
    "neither",
    "cannot be determined",
    "not enough information",
    "a and b",
    "b and c",
    "a and c",
];

/// Distractor Plausibility Score.
#[derive(Debug, Clone, PartialEq)]
pub struct DistractorPlausibility {
    /// Mean of the per-distractor scores; 0.0 without distractors.
    pub dps: f64,
    pub per_distractor: Vec<f64>,
}

/// Score how plausible each distractor is: mostly similar to the question,
/// partly similar to the correct answer.
pub fn score_distractor_plausibility(
    question: &str,
    correct_answer: &str,
    distractors: &[&str],
) -> DistractorPlausibility {
    let question_words = word_set(question);
    let correct_words = word_set(correct_answer);

    let per_distractor: Vec<f64> = distractors
        .iter()
        .map(|d| {
            let words = word_set(d);
            0.7 * jaccard(&question_words, &words) + 0.3 * jaccard(&correct_words, &words)
        })
        .collect();

    DistractorPlausibility {
        dps: mean(&per_distractor),
        per_distractor,
    }
}

impl From<DistractorPlausibility> for MetricBundle {
    fn from(s: DistractorPlausibility) -> Self {
        let mut bundle = MetricBundle::new();
        bundle.scalar("DPS", s.dps);
        if !s.per_distractor.is_empty() {
            let count = s.per_distractor.len() as f64;
            bundle
                .series("DPS_per_distractor", s.per_distractor)
                .scalar("num_distractors", count);
        }
        bundle
    }
}

/// Detailed distractor quality and its five components.
///
/// Every component is zero when there are no distractors;
/// `has_distractors` tells that case apart from a genuinely poor score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistractorQuality {
    pub quality: f64,
    pub homogeneity: f64,
    pub grammatical_parallelism: f64,
    pub no_obvious_patterns: f64,
    pub keyword_relevance: f64,
    pub substantiveness: f64,
    pub avg_length: f64,
    pub length_variance: f64,
    pub has_distractors: bool,
}

/// Score distractors on homogeneity, parallelism, giveaway phrases,
/// relevance to the question, and substance.
pub fn score_distractor_quality(
    question: &str,
    correct_answer: &str,
    distractors: &[&str],
) -> DistractorQuality {
    if distractors.is_empty() {
        return DistractorQuality {
            quality: 0.0,
            homogeneity: 0.0,
            grammatical_parallelism: 0.0,
            no_obvious_patterns: 0.0,
            keyword_relevance: 0.0,
            substantiveness: 0.0,
            avg_length: 0.0,
            length_variance: 0.0,
            has_distractors: false,
        };
    }

    let all_options: Vec<&str> = std::iter::once(correct_answer)
        .chain(distractors.iter().copied())
        .collect();

    let lengths: Vec<f64> = all_options
        .iter()
        .map(|o| o.split_whitespace().count() as f64)
        .collect();
    let avg_length = mean(&lengths);
    let length_variance = variance(&lengths);
    let homogeneity = 1.0 / (1.0 + length_variance / 10.0);

    let first_words: Vec<String> = all_options
        .iter()
        .map(|o| o.split_whitespace().next().unwrap_or("").to_lowercase())
        .collect();
    let unique_first: HashSet<&String> = first_words.iter().collect();
    let grammatical_parallelism = 1.0 - unique_first.len() as f64 / first_words.len() as f64;

    let clean: Vec<f64> = distractors
        .iter()
        .map(|d| {
            let lower = d.to_lowercase();
            if GIVEAWAY_PHRASES.iter().any(|p| lower.contains(p)) {
                0.0
            } else {
                1.0
            }
        })
        .collect();
    let no_obvious_patterns = mean(&clean);

    let question_keywords = keyword_set(question, DISTRACTOR_STOPWORDS);
    let relevance: Vec<f64> = distractors
        .iter()
        .map(|d| {
            let overlap = question_keywords
                .intersection(&keyword_set(d, DISTRACTOR_STOPWORDS))
                .count();
            (overlap as f64 / question_keywords.len().max(1) as f64).min(1.0)
        })
        .collect();
    let keyword_relevance = mean(&relevance);

    let substance: Vec<f64> = distractors
        .iter()
        .map(|d| match d.split_whitespace().count() {
            n if n >= 10 => 1.0,
            n if n >= 5 => 0.7,
            _ => 0.3,
        })
        .collect();
    let substantiveness = mean(&substance);

    let quality = 0.25 * homogeneity
        + 0.20 * grammatical_parallelism
        + 0.25 * no_obvious_patterns
        + 0.15 * keyword_relevance
        + 0.15 * substantiveness;

    DistractorQuality {
        quality,
        homogeneity,
        grammatical_parallelism,
        no_obvious_patterns,
        keyword_relevance,
        substantiveness,
        avg_length: round_to(avg_length, 1),
        length_variance: round_to(length_variance, 2),
        has_distractors: true,
    }
}

impl From<DistractorQuality> for MetricBundle {
    fn from(s: DistractorQuality) -> Self {
        let mut bundle = MetricBundle::new();
        bundle.scalar("distractor_quality_detailed", s.quality);
        if s.has_distractors {
            bundle
                .scalar("homogeneity", s.homogeneity)
                .scalar("grammatical_parallelism", s.grammatical_parallelism)
                .scalar("no_obvious_patterns", s.no_obvious_patterns)
                .scalar("keyword_relevance", s.keyword_relevance)
                .scalar("substantiveness", s.substantiveness)
                .scalar("avg_length", s.avg_length)
                .scalar("length_variance", s.length_variance);
        }
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dps_without_distractors_is_zero() {
        let s = score_distractor_plausibility("What is X?", "foo", &[]);
        assert_eq!(s.dps, 0.0);
        let bundle = MetricBundle::from(s);
        assert_eq!(bundle.len(), 1);
    }

    #[test]
    fn dps_weights_question_over_answer() {
        // Distractor equals the question text exactly and shares nothing
        // with the answer.
        let s = score_distractor_plausibility("red apple", "banana", &["red apple"]);
        assert!((s.dps - 0.7).abs() < 1e-9);

        let s = score_distractor_plausibility("red apple", "green pear", &["green pear"]);
        assert!((s.dps - 0.3).abs() < 1e-9);
    }

    #[test]
    fn giveaway_phrases_are_penalized() {
        let s = score_distractor_quality(
            "Which organelle makes energy?",
            "Mitochondria",
            &["All of the above", "Ribosome", "None of the above"],
        );
        assert!((s.no_obvious_patterns - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn parallel_options_score_parallelism() {
        let s = score_distractor_quality(
            "Which statement is true?",
            "The sun is a star",
            &["The moon is a star", "The earth is a star", "The comet is a star"],
        );
        assert!((s.grammatical_parallelism - 0.75).abs() < 1e-9);
        assert_eq!(s.homogeneity, 1.0);
        assert_eq!(s.substantiveness, 0.7);
    }

    #[test]
    fn short_distractors_lack_substance() {
        let s = score_distractor_quality("What is it?", "x", &["y", "z"]);
        assert!((s.substantiveness - 0.3).abs() < 1e-9);
        assert!(s.quality > 0.0 && s.quality <= 1.0);
    }

    #[test]
    fn empty_distractors_only_report_total() {
        let s = score_distractor_quality("What?", "x", &[]);
        assert!(!s.has_distractors);
        let bundle = MetricBundle::from(s);
        assert_eq!(bundle.get_scalar("distractor_quality_detailed"), Some(0.0));
        assert_eq!(bundle.len(), 1);
    }
}
