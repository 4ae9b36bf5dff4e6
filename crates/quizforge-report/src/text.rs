//! Plain-text evaluation report.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use quizforge_core::report::EvaluationReport;

use crate::group_aggregates;

/// Render the aggregate metrics grouped by category, four decimals each.
pub fn generate_text(report: &EvaluationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== QUESTION QUALITY EVALUATION REPORT ===");
    let _ = writeln!(out, "Source: {}", report.source.display());
    if let Some(kb) = &report.knowledge_base {
        let _ = writeln!(out, "Knowledge base: {}", kb.display());
    }
    let _ = writeln!(
        out,
        "Generated: {}",
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "Total questions evaluated: {}", report.batch.count);

    let groups = group_aggregates(&report.batch.aggregate_metrics);
    if groups.is_empty() {
        let _ = writeln!(out, "\nNo metrics available.");
        return out;
    }

    for (category, rows) in groups {
        let _ = writeln!(out, "\n--- {category} ---");
        for row in rows {
            for (prefix, value) in [("avg", row.avg), ("min", row.min), ("max", row.max)] {
                if let Some(value) = value {
                    let key = format!("{prefix}_{}", row.metric);
                    let _ = writeln!(out, "{key:40}: {value:.4}");
                }
            }
        }
    }
    out
}

/// Write a text report to a file.
pub fn write_text_report(report: &EvaluationReport, path: &Path) -> Result<()> {
    let text = generate_text(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)
        .with_context(|| format!("failed to write text report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::evaluate::BatchEvaluation;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn make_test_report() -> EvaluationReport {
        let mut aggregate_metrics = BTreeMap::new();
        aggregate_metrics.insert("avg_clarity".to_string(), 0.85);
        aggregate_metrics.insert("min_clarity".to_string(), 0.7);
        aggregate_metrics.insert("max_clarity".to_string(), 1.0);
        aggregate_metrics.insert("avg_DPS".to_string(), 0.123456);
        EvaluationReport {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            source: PathBuf::from("questions/bio.txt"),
            knowledge_base: Some(PathBuf::from("notes/bio.md")),
            batch: BatchEvaluation {
                count: 3,
                aggregate_metrics,
                per_question: Vec::new(),
            },
        }
    }

    #[test]
    fn text_report_groups_and_formats() {
        let text = generate_text(&make_test_report());
        assert!(text.contains("Total questions evaluated: 3"));
        assert!(text.contains("Knowledge base: notes/bio.md"));
        assert!(text.contains("--- Clarity ---"));
        assert!(text.contains("--- Distractor Quality ---"));
        assert!(text.contains(&format!("{:40}: 0.8500", "avg_clarity")));
        assert!(text.contains(&format!("{:40}: 0.1235", "avg_DPS")));

        let clarity = text.find("--- Clarity ---").unwrap();
        let dps = text.find("--- Distractor Quality ---").unwrap();
        assert!(clarity < dps);
    }

    #[test]
    fn empty_report_says_so() {
        let mut report = make_test_report();
        report.batch = BatchEvaluation::default();
        let text = generate_text(&report);
        assert!(text.contains("Total questions evaluated: 0"));
        assert!(text.contains("No metrics available."));
    }

    #[test]
    fn text_report_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("report.txt");
        write_text_report(&make_test_report(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("=== QUESTION QUALITY EVALUATION REPORT ==="));
    }
}
