//! Shared text helpers used by the quality metrics.
//!
//! Tokenization is plain: lower-cased, whitespace-separated words with
//! punctuation left attached. Every metric uses the same rules so scores
//! stay comparable across metrics.

use std::collections::{HashMap, HashSet};

/// Stopwords removed before relevance overlap.
pub const RELEVANCE_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "is",
    "are", "was", "were", "what", "which", "how",
];

/// Stopwords removed before distractor keyword overlap.
pub const DISTRACTOR_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
];

/// Stopwords removed before rationale keyword overlap.
pub const RATIONALE_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "is",
    "are", "was", "were", "this", "that", "it",
];

/// Stopwords ignored by [`extract_keywords`].
pub const KEYWORD_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "could", "should", "may", "might", "can", "this", "that",
];

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Distinct lower-cased words.
pub fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Distinct lower-cased words minus the given stopwords.
pub fn keyword_set(text: &str, stopwords: &[&str]) -> HashSet<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|w| !stopwords.contains(&w.as_str()))
        .collect()
}

/// Jaccard similarity of two word sets; 0.0 when both are empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance; 0.0 for an empty slice.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64
}

/// Round to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Approximate syllable count of a single word.
///
/// Each run of vowels (including `y`) counts once, a trailing `e` is
/// treated as silent, and every word has at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count: isize = 0;
    let mut previous_was_vowel = false;

    for c in word.chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !previous_was_vowel {
            count += 1;
        }
        previous_was_vowel = is_vowel;
    }

    if word.ends_with('e') {
        count -= 1;
    }

    count.max(1) as usize
}

/// Collapse every whitespace run (newlines included) into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Most frequent keywords of a text.
///
/// Words are lower-cased and stripped of surrounding punctuation; stopwords
/// and words of three characters or fewer are ignored. Ties keep the order
/// in which the words first appeared.
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<String> {
    let mut freq: HashMap<String, (usize, usize)> = HashMap::new();

    for (position, raw) in text.split_whitespace().enumerate() {
        let word = raw
            .to_lowercase()
            .trim_matches(|c: char| ".,!?;:()[]{}\"'".contains(c))
            .to_string();
        if word.chars().count() <= 3 || KEYWORD_STOPWORDS.contains(&word.as_str()) {
            continue;
        }
        freq.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = freq.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked.into_iter().take(top_n).map(|(w, _)| w).collect()
}

/// Split text into overlapping windows of `chunk_size` words.
///
/// Consecutive windows share `overlap` words. An overlap that is not
/// smaller than the chunk size is reduced so the window always advances.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let step = chunk_size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < words.len() {
        let end = (start + chunk_size).min(words.len());
        chunks.push(words[start..end].join(" "));
        start += step;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syllable_counts() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("capital"), 3);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("rhythm"), 1);
        assert_eq!(count_syllables("queue"), 1);
    }

    #[test]
    fn jaccard_bounds() {
        let a = word_set("red green blue");
        let b = word_set("Red Green Blue");
        let c = word_set("cat dog");
        assert!((jaccard(&a, &b) - 1.0).abs() < f64::EPSILON);
        assert_eq!(jaccard(&a, &c), 0.0);
        assert_eq!(jaccard(&HashSet::new(), &HashSet::new()), 0.0);
    }

    #[test]
    fn keyword_set_drops_stopwords() {
        let set = keyword_set("What is the boiling point of water", RELEVANCE_STOPWORDS);
        assert!(set.contains("boiling"));
        assert!(!set.contains("what"));
        assert!(!set.contains("the"));
    }

    #[test]
    fn variance_of_constant_is_zero() {
        assert_eq!(variance(&[0.4, 0.4, 0.4]), 0.0);
        assert!((variance(&[0.0, 1.0]) - 0.25).abs() < 1e-12);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn keywords_ranked_by_frequency() {
        let text = "Photosynthesis converts light. Light drives photosynthesis, and light matters.";
        let keywords = extract_keywords(text, 2);
        assert_eq!(keywords, vec!["light", "photosynthesis"]);
    }

    #[test]
    fn chunks_overlap() {
        let chunks = chunk_text("a b c d e f g", 4, 2);
        assert_eq!(chunks, vec!["a b c d", "c d e f", "e f g", "g"]);
        assert!(chunk_text("", 4, 1).is_empty());
        assert_eq!(chunk_text("a b c", 2, 5), vec!["a b", "b c", "c"]);
    }
}
