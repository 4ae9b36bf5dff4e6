//! Learner profile and bounded skill rating.
//!
//! A profile accumulates response events and keeps a single Elo-like
//! rating in `[MIN_SKILL, MAX_SKILL]`. The rating moves by a base step of
//! 30 points, scaled by question difficulty, answer speed relative to the
//! learner's own average, and self-reported confidence.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Difficulty;
use crate::text::mean;

/// Rating of a new learner.
pub const DEFAULT_SKILL: f64 = 1500.0;
/// Lowest reachable rating.
pub const MIN_SKILL: f64 = 800.0;
/// Highest reachable rating.
pub const MAX_SKILL: f64 = 2200.0;

const BASE_CHANGE: f64 = 30.0;
const MIN_TIME_FACTOR: f64 = 0.5;
const MAX_TIME_FACTOR: f64 = 1.5;
const MAX_CONFIDENCE: u8 = 5;

/// One answered question. Events are only ever appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEvent {
    pub timestamp: DateTime<Utc>,
    pub question_id: String,
    pub correct: bool,
    /// Seconds spent answering; never negative.
    pub time_taken: f64,
    pub difficulty: Difficulty,
    pub topic: String,
    /// Self-reported confidence, 1 to 5.
    #[serde(default)]
    pub confidence: Option<u8>,
}

/// Per-topic answer counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMastery {
    pub correct: u32,
    pub total: u32,
}

impl TopicMastery {
    /// Fraction answered correctly, 0.0 for an untouched topic.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// A response to record against a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseInput {
    pub question_id: String,
    pub correct: bool,
    pub time_taken: f64,
    pub difficulty: Difficulty,
    pub topic: String,
    pub confidence: Option<u8>,
}

impl ResponseInput {
    /// A medium-difficulty response in the "general" topic without a
    /// confidence rating.
    pub fn new(question_id: impl Into<String>, correct: bool, time_taken: f64) -> Self {
        Self {
            question_id: question_id.into(),
            correct,
            time_taken,
            difficulty: Difficulty::Medium,
            topic: "general".to_string(),
            confidence: None,
        }
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn confidence(mut self, confidence: u8) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// How one response moved the rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkillUpdate {
    pub multiplier: f64,
    pub time_factor: f64,
    pub confidence_factor: f64,
    /// Requested change before clamping.
    pub delta: f64,
    pub previous_skill: f64,
    pub skill_level: f64,
}

/// Snapshot of a profile for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStats {
    pub user_id: String,
    pub skill_level: f64,
    pub accuracy_rate: f64,
    pub avg_response_time: f64,
    pub topics_mastery: BTreeMap<String, TopicMastery>,
    pub current_difficulty: Difficulty,
    pub total_questions: usize,
}

/// Persistent learner state.
///
/// `performance_history` and `response_times` always have the same length,
/// and that length equals the sum of all topic totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub user_id: String,
    pub skill_level: f64,
    pub performance_history: Vec<ResponseEvent>,
    pub topics_mastery: BTreeMap<String, TopicMastery>,
    pub response_times: Vec<f64>,
    pub accuracy_rate: f64,
    pub current_difficulty: Difficulty,
    pub confidence_scores: Vec<u8>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::new("")
    }
}

impl UserProfile {
    /// A fresh profile at the default rating.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            skill_level: DEFAULT_SKILL,
            performance_history: Vec::new(),
            topics_mastery: BTreeMap::new(),
            response_times: Vec::new(),
            accuracy_rate: 0.0,
            current_difficulty: Difficulty::Medium,
            confidence_scores: Vec::new(),
        }
    }

    /// Record a response timestamped now.
    pub fn add_response(&mut self, input: ResponseInput) -> SkillUpdate {
        self.add_response_at(input, Utc::now())
    }

    /// Record a response with an explicit timestamp.
    ///
    /// Negative or non-finite times are stored as 0.0. A confidence of 0 is
    /// treated as not given and values above 5 count as 5.
    pub fn add_response_at(
        &mut self,
        input: ResponseInput,
        timestamp: DateTime<Utc>,
    ) -> SkillUpdate {
        let time_taken = if input.time_taken.is_finite() && input.time_taken > 0.0 {
            input.time_taken
        } else {
            0.0
        };
        let confidence = input
            .confidence
            .filter(|&c| c > 0)
            .map(|c| c.min(MAX_CONFIDENCE));

        let entry = self.topics_mastery.entry(input.topic.clone()).or_default();
        entry.total += 1;
        if input.correct {
            entry.correct += 1;
        }

        self.performance_history.push(ResponseEvent {
            timestamp,
            question_id: input.question_id,
            correct: input.correct,
            time_taken,
            difficulty: input.difficulty,
            topic: input.topic,
            confidence,
        });
        self.response_times.push(time_taken);

        let correct_count = self.performance_history.iter().filter(|e| e.correct).count();
        self.accuracy_rate = correct_count as f64 / self.performance_history.len() as f64;

        if let Some(c) = confidence {
            self.confidence_scores.push(c);
        }

        self.update_skill(input.correct, time_taken, input.difficulty, confidence)
    }

    fn update_skill(
        &mut self,
        correct: bool,
        time_taken: f64,
        difficulty: Difficulty,
        confidence: Option<u8>,
    ) -> SkillUpdate {
        let multiplier = difficulty.multiplier();
        let base_change = BASE_CHANGE * multiplier;

        // the average already includes the response being recorded
        let time_factor = if time_taken > 0.0 {
            (mean(&self.response_times) / time_taken).clamp(MIN_TIME_FACTOR, MAX_TIME_FACTOR)
        } else {
            1.0
        };
        let confidence_factor = confidence.map_or(1.0, |c| c as f64 / MAX_CONFIDENCE as f64);

        let delta = if correct {
            base_change * time_factor * confidence_factor
        } else {
            -base_change * confidence_factor
        };

        let previous_skill = if self.skill_level.is_finite() {
            self.skill_level
        } else {
            DEFAULT_SKILL
        };
        self.skill_level = (previous_skill + delta).clamp(MIN_SKILL, MAX_SKILL);

        tracing::debug!(
            "skill update for {}: {:.1} -> {:.1} (delta {:+.2})",
            self.user_id,
            previous_skill,
            self.skill_level,
            delta
        );

        SkillUpdate {
            multiplier,
            time_factor,
            confidence_factor,
            delta,
            previous_skill,
            skill_level: self.skill_level,
        }
    }

    /// Set the difficulty chosen by the adaptive-difficulty collaborator.
    pub fn set_current_difficulty(&mut self, difficulty: Difficulty) {
        self.current_difficulty = difficulty;
    }

    pub fn total_questions(&self) -> usize {
        self.performance_history.len()
    }

    pub fn stats(&self) -> ProfileStats {
        ProfileStats {
            user_id: self.user_id.clone(),
            skill_level: self.skill_level,
            accuracy_rate: self.accuracy_rate,
            avg_response_time: mean(&self.response_times),
            topics_mastery: self.topics_mastery.clone(),
            current_difficulty: self.current_difficulty,
            total_questions: self.total_questions(),
        }
    }
}
