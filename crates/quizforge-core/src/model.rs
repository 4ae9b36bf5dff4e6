//! Core data model types for quizforge.
//!
//! These are the question and difficulty types shared by the parser, the
//! scorer, and the learner model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four option letters of a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    /// All option letters in display order.
    pub const ALL: [AnswerKey; 4] = [AnswerKey::A, AnswerKey::B, AnswerKey::C, AnswerKey::D];

    /// Zero-based position of this letter in the option list.
    pub fn index(self) -> usize {
        match self {
            AnswerKey::A => 0,
            AnswerKey::B => 1,
            AnswerKey::C => 2,
            AnswerKey::D => 3,
        }
    }

    /// Map an option letter (either case) to its key.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(AnswerKey::A),
            'B' => Some(AnswerKey::B),
            'C' => Some(AnswerKey::C),
            'D' => Some(AnswerKey::D),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            AnswerKey::A => "A",
            AnswerKey::B => "B",
            AnswerKey::C => "C",
            AnswerKey::D => "D",
        };
        f.write_str(letter)
    }
}

impl FromStr for AnswerKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                AnswerKey::from_char(c).ok_or_else(|| format!("unknown answer key: {s}"))
            }
            _ => Err(format!("unknown answer key: {s}")),
        }
    }
}

/// Question difficulty as chosen by the difficulty-selection collaborator.
///
/// Labels outside easy/medium/hard deserialize to `Unrecognized` instead of
/// failing; the skill update treats them as medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    #[serde(other)]
    Unrecognized,
}

impl Difficulty {
    /// Multiplier applied to the base skill change.
    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.2,
            Difficulty::Unrecognized => 1.0,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

impl From<&str> for Difficulty {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Unrecognized,
        }
    }
}

/// A parsed multiple-choice question.
///
/// Produced by [`crate::parser::parse_question_block`]; every field may be
/// empty or unset when the source text was malformed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// The question stem.
    pub question: String,
    /// Option texts in A–D order; at most four.
    #[serde(default)]
    pub options: Vec<String>,
    /// The correct option, or `None` when no answer key was found.
    ///
    /// Never guessed: an unmatched key stays unset so callers can skip
    /// the question instead of scoring against a wrong answer.
    #[serde(default)]
    pub correct_answer: Option<AnswerKey>,
    /// The rationale text, if present.
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Question {
    /// Text of the correct option, if the key is set and in range.
    pub fn correct_option(&self) -> Option<&str> {
        self.correct_answer
            .and_then(|key| self.options.get(key.index()))
            .map(String::as_str)
    }

    /// The incorrect options, in their original order.
    ///
    /// Empty when the correct option cannot be resolved.
    pub fn distractors(&self) -> Vec<&str> {
        match self.correct_answer {
            Some(key) if key.index() < self.options.len() => self
                .options
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != key.index())
                .map(|(_, opt)| opt.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether this question has everything needed for answer-based scoring.
    pub fn is_scorable(&self) -> bool {
        self.options.len() >= 4 && self.correct_option().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question {
            question: "What is X?".into(),
            options: vec!["foo".into(), "bar".into(), "baz".into(), "qux".into()],
            correct_answer: Some(AnswerKey::B),
            explanation: Some("because reasons.".into()),
        }
    }

    #[test]
    fn answer_key_display_and_parse() {
        assert_eq!(AnswerKey::C.to_string(), "C");
        assert_eq!("b".parse::<AnswerKey>().unwrap(), AnswerKey::B);
        assert_eq!(" D ".parse::<AnswerKey>().unwrap(), AnswerKey::D);
        assert!("E".parse::<AnswerKey>().is_err());
        assert!("AB".parse::<AnswerKey>().is_err());
    }

    #[test]
    fn difficulty_from_label() {
        assert_eq!(Difficulty::from("Hard"), Difficulty::Hard);
        assert_eq!(Difficulty::from("easy"), Difficulty::Easy);
        assert_eq!(Difficulty::from("extreme"), Difficulty::Unrecognized);
        assert_eq!(Difficulty::Unrecognized.multiplier(), 1.0);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn difficulty_serde_tolerates_unknown_labels() {
        let d: Difficulty = serde_json::from_str("\"legendary\"").unwrap();
        assert_eq!(d, Difficulty::Unrecognized);
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
    }

    #[test]
    fn distractors_preserve_order() {
        let q = sample();
        assert_eq!(q.correct_option(), Some("bar"));
        assert_eq!(q.distractors(), vec!["foo", "baz", "qux"]);
        assert!(q.is_scorable());
    }

    #[test]
    fn unset_answer_is_not_scorable() {
        let q = Question {
            correct_answer: None,
            ..sample()
        };
        assert!(q.distractors().is_empty());
        assert!(!q.is_scorable());
    }

    #[test]
    fn out_of_range_answer_is_not_scorable() {
        let q = Question {
            options: vec!["only".into(), "two".into()],
            correct_answer: Some(AnswerKey::D),
            ..sample()
        };
        assert_eq!(q.correct_option(), None);
        assert!(!q.is_scorable());
    }
}
