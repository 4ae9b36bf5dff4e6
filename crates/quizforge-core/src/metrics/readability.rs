//! Flesch readability metrics.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::bundle::MetricBundle;
use crate::text::{count_syllables, round_to};

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s.]").unwrap());

/// Reading level band derived from the Flesch-Kincaid grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadabilityLevel {
    Unknown,
    Elementary,
    MiddleSchool,
    HighSchool,
    College,
    Graduate,
}

impl ReadabilityLevel {
    pub fn from_grade(grade: f64) -> Self {
        if grade < 6.0 {
            ReadabilityLevel::Elementary
        } else if grade < 9.0 {
            ReadabilityLevel::MiddleSchool
        } else if grade < 13.0 {
            ReadabilityLevel::HighSchool
        } else if grade < 16.0 {
            ReadabilityLevel::College
        } else {
            ReadabilityLevel::Graduate
        }
    }
}

impl fmt::Display for ReadabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReadabilityLevel::Unknown => "Unknown",
            ReadabilityLevel::Elementary => "Elementary (Grades 1-5)",
            ReadabilityLevel::MiddleSchool => "Middle School (Grades 6-8)",
            ReadabilityLevel::HighSchool => "High School (Grades 9-12)",
            ReadabilityLevel::College => "College (Undergraduate)",
            ReadabilityLevel::Graduate => "Graduate/Professional",
        };
        f.write_str(label)
    }
}

/// Flesch metrics, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadabilityScore {
    pub flesch_kincaid_grade: f64,
    pub flesch_reading_ease: f64,
    pub level: ReadabilityLevel,
    pub avg_sentence_length: f64,
    pub avg_syllables_per_word: f64,
}

impl ReadabilityScore {
    fn unknown() -> Self {
        Self {
            flesch_kincaid_grade: 0.0,
            flesch_reading_ease: 0.0,
            level: ReadabilityLevel::Unknown,
            avg_sentence_length: 0.0,
            avg_syllables_per_word: 0.0,
        }
    }
}

/// Compute Flesch-Kincaid grade and Flesch reading ease for `text`.
///
/// Punctuation other than `.` is dropped; sentences are split on `.`.
pub fn score_readability(text: &str) -> ReadabilityScore {
    let cleaned = NON_WORD.replace_all(text, " ");
    let sentences = cleaned.split('.').filter(|s| !s.trim().is_empty()).count();
    let words: Vec<&str> = cleaned.split_whitespace().collect();

    if sentences == 0 || words.is_empty() {
        return ReadabilityScore::unknown();
    }

    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;

    let grade = (0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59).max(0.0);
    let ease = (206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word).clamp(0.0, 100.0);

    ReadabilityScore {
        flesch_kincaid_grade: round_to(grade, 2),
        flesch_reading_ease: round_to(ease, 2),
        level: ReadabilityLevel::from_grade(grade),
        avg_sentence_length: round_to(words_per_sentence, 2),
        avg_syllables_per_word: round_to(syllables_per_word, 2),
    }
}

impl From<ReadabilityScore> for MetricBundle {
    fn from(s: ReadabilityScore) -> Self {
        let mut bundle = MetricBundle::new();
        bundle
            .scalar("flesch_kincaid_grade", s.flesch_kincaid_grade)
            .scalar("flesch_reading_ease", s.flesch_reading_ease)
            .label("readability_level", s.level.to_string())
            .scalar("avg_sentence_length", s.avg_sentence_length)
            .scalar("avg_syllables_per_word", s.avg_syllables_per_word);
        bundle
    }
}
