//! The `quizforge evaluate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::config::load_config_from;
use quizforge_core::evaluate::{evaluate_batch, session_feedback, SessionFeedback};
use quizforge_core::model::Question;
use quizforge_core::parser::{load_knowledge_base, parse_question_file};
use quizforge_core::report::EvaluationReport;
use quizforge_report::html::write_html_report;
use quizforge_report::text::write_text_report;

/// Aggregates shown in the console summary.
const SUMMARY_METRICS: &[(&str, &str)] = &[
    ("clarity", "Clarity"),
    ("relevance", "Relevance"),
    ("flesch_kincaid_grade", "FK grade"),
    ("DPS", "DPS"),
    ("distractor_quality_detailed", "Distractor quality"),
    ("SOS", "SOS"),
    ("option_diversity", "Option diversity"),
    ("rationale_quality", "Rationale quality"),
];

pub fn execute(
    questions_path: PathBuf,
    knowledge_base: Option<PathBuf>,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let questions = parse_question_file(&questions_path)?;
    anyhow::ensure!(
        !questions.is_empty(),
        "no questions found in {}",
        questions_path.display()
    );

    let (scorable, skipped): (Vec<Question>, Vec<Question>) =
        questions.into_iter().partition(Question::is_scorable);
    if !skipped.is_empty() {
        eprintln!(
            "Skipping {} question(s) without four options and a correct answer",
            skipped.len()
        );
    }

    let kb_path = knowledge_base.or(config.knowledge_base.clone());
    let kb = load_knowledge_base(kb_path.as_deref());
    let kb_used = kb.as_ref().and(kb_path);
    match &kb_used {
        Some(path) => tracing::info!("using knowledge base {}", path.display()),
        None => tracing::debug!("no knowledge base, relevance uses the neutral score"),
    }

    eprintln!(
        "quizforge v{}: evaluating {} question(s) from {}",
        env!("CARGO_PKG_VERSION"),
        scorable.len(),
        questions_path.display()
    );

    let batch = evaluate_batch(&scorable, kb.as_deref());
    let report = EvaluationReport::new(&questions_path, kb_used, batch);

    print_summary(&report);
    if let Some(feedback) = session_feedback(&scorable, &config.feedback) {
        print_feedback(&feedback);
    }

    let output = output.unwrap_or(config.output_dir);
    std::fs::create_dir_all(&output)?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["text", "json", "html"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    for fmt in &formats {
        match *fmt {
            "text" => {
                let path = output.join(format!("report-{timestamp}.txt"));
                write_text_report(&report, &path)?;
                eprintln!("Text report: {}", path.display());
            }
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {
                tracing::warn!("unknown report format {fmt:?}");
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn print_summary(report: &EvaluationReport) {
    use comfy_table::{Cell, Table};

    let aggregate = &report.batch.aggregate_metrics;
    let stat = |prefix: &str, key: &str| {
        aggregate
            .get(&format!("{prefix}_{key}"))
            .map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
    };

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Avg", "Min", "Max"]);

    for &(key, label) in SUMMARY_METRICS {
        if !aggregate.contains_key(&format!("avg_{key}")) {
            continue;
        }
        table.add_row(vec![
            Cell::new(label),
            Cell::new(stat("avg", key)),
            Cell::new(stat("min", key)),
            Cell::new(stat("max", key)),
        ]);
    }

    println!("Questions evaluated: {}", report.batch.count);
    println!("{table}");
}

fn print_feedback(feedback: &SessionFeedback) {
    let verdict = |good: bool| if good { "good" } else { "needs work" };
    println!(
        "Distractor plausibility: {:.3} ({})",
        feedback.avg_dps,
        verdict(feedback.dps_good)
    );
    println!(
        "Option diversity: {:.3} ({})",
        feedback.avg_option_diversity,
        verdict(feedback.diversity_good)
    );
}
