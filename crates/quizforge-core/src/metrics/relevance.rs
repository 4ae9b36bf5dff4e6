//! Relevance of the options (and optionally the question) to the material.

use crate::bundle::MetricBundle;
use crate::text::{jaccard, keyword_set, mean, variance, RELEVANCE_STOPWORDS};

/// Knowledge-base relevance used when no knowledge base is available.
const NEUTRAL_KB_RELEVANCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceScore {
    pub relevance: f64,
    pub option_relevance: f64,
    pub knowledge_base_relevance: f64,
    pub technical_terminology: f64,
    pub option_consistency: f64,
}

/// Score how well the options and question relate to each other and to
/// the source material.
pub fn score_relevance(
    question_text: &str,
    options: &[String],
    knowledge_base: Option<&str>,
) -> RelevanceScore {
    let question_keywords = keyword_set(question_text, RELEVANCE_STOPWORDS);

    let per_option: Vec<f64> = options
        .iter()
        .map(|opt| jaccard(&question_keywords, &keyword_set(opt, RELEVANCE_STOPWORDS)))
        .collect();
    let option_relevance = mean(&per_option);

    let knowledge_base_relevance = match knowledge_base {
        Some(kb) if !kb.is_empty() => {
            if question_keywords.is_empty() {
                0.0
            } else {
                let kb_keywords = keyword_set(kb, RELEVANCE_STOPWORDS);
                let found = question_keywords.intersection(&kb_keywords).count();
                (found as f64 / question_keywords.len() as f64).min(1.0)
            }
        }
        _ => NEUTRAL_KB_RELEVANCE,
    };

    let technical_terminology = if question_keywords.is_empty() {
        0.0
    } else {
        let total_chars: usize = question_keywords.iter().map(|w| w.chars().count()).sum();
        let avg_len = total_chars as f64 / question_keywords.len() as f64;
        (avg_len / 8.0).min(1.0)
    };

    let option_consistency = if per_option.is_empty() {
        0.0
    } else {
        1.0 - variance(&per_option).min(1.0)
    };

    let relevance = 0.35 * option_relevance
        + 0.25 * knowledge_base_relevance
        + 0.20 * technical_terminology
        + 0.20 * option_consistency;

    RelevanceScore {
        relevance,
        option_relevance,
        knowledge_base_relevance,
        technical_terminology,
        option_consistency,
    }
}

impl From<RelevanceScore> for MetricBundle {
    fn from(s: RelevanceScore) -> Self {
        let mut bundle = MetricBundle::new();
        bundle
            .scalar("relevance", s.relevance)
            .scalar("option_relevance", s.option_relevance)
            .scalar("knowledge_base_relevance", s.knowledge_base_relevance)
            .scalar("technical_terminology", s.technical_terminology)
            .scalar("option_consistency", s.option_consistency);
        bundle
    }
}
