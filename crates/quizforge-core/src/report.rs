//! Evaluation report types with JSON persistence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evaluate::BatchEvaluation;

/// The result of evaluating one question file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Question file that was evaluated.
    pub source: PathBuf,
    /// Knowledge base used for relevance scoring, if any.
    #[serde(default)]
    pub knowledge_base: Option<PathBuf>,
    pub batch: BatchEvaluation,
}

/// Count and aggregate metrics only, without per-question detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub count: usize,
    pub aggregate_metrics: BTreeMap<String, f64>,
}

impl EvaluationReport {
    pub fn new(
        source: impl Into<PathBuf>,
        knowledge_base: Option<PathBuf>,
        batch: BatchEvaluation,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source: source.into(),
            knowledge_base,
            batch,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: EvaluationReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            count: self.batch.count,
            aggregate_metrics: self.batch.aggregate_metrics.clone(),
        }
    }

    /// Pretty-printed JSON of [`Self::summary`].
    pub fn summary_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.summary()).context("failed to serialize report summary")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::evaluate_batch;
    use crate::parser::parse_question_text;

    const QUESTIONS: &str = "\
Question 1: Which planet is known as the red planet?
A) Mars
B) Venus
C) Jupiter
D) Saturn
Correct answer: A
Explanation: Mars looks red because iron oxide covers its surface.

Question 2: What is the boiling point of water at sea level?
A) 90 degrees Celsius
B) 100 degrees Celsius
C) 110 degrees Celsius
D) 120 degrees Celsius
Correct answer: B
";

    fn sample_report() -> EvaluationReport {
        let questions = parse_question_text(QUESTIONS);
        EvaluationReport::new("questions.txt", None, evaluate_batch(&questions, None))
    }

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");
        let report = sample_report();
        report.save_json(&path).unwrap();
        let loaded = EvaluationReport::load_json(&path).unwrap();
        assert_eq!(loaded, report);
        assert_eq!(loaded.batch.count, 2);
    }

    #[test]
    fn summary_omits_per_question() {
        let report = sample_report();
        let json = report.summary_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["count"], 2);
        assert!(value["aggregate_metrics"]["avg_clarity"].is_number());
        assert!(value.get("per_question").is_none());
    }

    #[test]
    fn load_missing_file_fails_with_context() {
        let err = EvaluationReport::load_json(Path::new("/nonexistent/report.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read report"));
    }
}
