//! Semantic Option Similarity (SOS) and option diversity.

use crate::bundle::MetricBundle;
use crate::text::{jaccard, mean, word_set};

#[derive(Debug, Clone, PartialEq)]
pub struct OptionSimilarity {
    /// Mean pairwise Jaccard similarity.
    pub sos: f64,
    /// `1 - sos`, or 0.0 with fewer than two options.
    pub option_diversity: f64,
    pub pairwise: Vec<f64>,
}

/// Average pairwise word overlap across all option pairs.
pub fn score_option_similarity(options: &[String]) -> OptionSimilarity {
    if options.len() < 2 {
        return OptionSimilarity {
            sos: 0.0,
            option_diversity: 0.0,
            pairwise: Vec::new(),
        };
    }

    let sets: Vec<_> = options.iter().map(|o| word_set(o)).collect();
    let mut pairwise = Vec::with_capacity(sets.len() * (sets.len() - 1) / 2);
    for i in 0..sets.len() {
        for j in (i + 1)..sets.len() {
            pairwise.push(jaccard(&sets[i], &sets[j]));
        }
    }

    let sos = mean(&pairwise);
    OptionSimilarity {
        sos,
        option_diversity: 1.0 - sos,
        pairwise,
    }
}

impl From<OptionSimilarity> for MetricBundle {
    fn from(s: OptionSimilarity) -> Self {
        let mut bundle = MetricBundle::new();
        bundle
            .scalar("SOS", s.sos)
            .scalar("option_diversity", s.option_diversity);
        if !s.pairwise.is_empty() {
            let pairs = s.pairwise.len() as f64;
            bundle
                .series("pairwise_similarities", s.pairwise)
                .scalar("num_pairs", pairs);
        }
        bundle
    }
}
