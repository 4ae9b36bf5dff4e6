//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use quizforge_core::bundle::{MetricBundle, MetricValue};
use quizforge_core::report::EvaluationReport;

use crate::group_aggregates;

/// Headline scores charted in the summary, all in [0, 1].
const HEADLINE_METRICS: &[(&str, &str)] = &[
    ("clarity", "Clarity"),
    ("relevance", "Relevance"),
    ("DPS", "Distractor plausibility"),
    ("distractor_quality_detailed", "Distractor quality"),
    ("option_diversity", "Option diversity"),
    ("rationale_quality", "Rationale quality"),
];

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

fn cell(bundle: &MetricBundle, name: &str) -> String {
    match bundle.get(name) {
        Some(MetricValue::Scalar(v)) => format!("{v:.3}"),
        Some(MetricValue::Label(l)) => html_escape(l),
        Some(MetricValue::Series(_)) | None => "-".to_string(),
    }
}

/// Generate an HTML report from an evaluation report.
pub fn generate_html(report: &EvaluationReport) -> String {
    let source = report.source.display().to_string();
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizforge report: {}</title>\n",
        html_escape(&source)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>quizforge question quality report</h1>\n");
    let kb = report
        .knowledge_base
        .as_ref()
        .map(|p| format!(" | knowledge base: {}", html_escape(&p.display().to_string())))
        .unwrap_or_default();
    html.push_str(&format!(
        "<p class=\"meta\">Source: <strong>{}</strong> | {} questions{} | {}</p>\n",
        html_escape(&source),
        report.batch.count,
        kb,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    let aggregate = &report.batch.aggregate_metrics;
    let headline: Vec<(&str, f64)> = HEADLINE_METRICS
        .iter()
        .filter_map(|(key, label)| aggregate.get(&format!("avg_{key}")).map(|v| (*label, *v)))
        .collect();
    if !headline.is_empty() {
        html.push_str(&generate_bar_chart(&headline));
    }

    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Category</th><th>Metric</th><th>Avg</th><th>Min</th><th>Max</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for (category, rows) in group_aggregates(aggregate) {
        for row in rows {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                category,
                html_escape(row.metric),
                fmt_opt(row.avg),
                fmt_opt(row.min),
                fmt_opt(row.max),
            ));
        }
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Per-question results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Questions</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">#</th><th onclick=\"sortTable(1)\">Clarity</th><th onclick=\"sortTable(2)\">Relevance</th><th onclick=\"sortTable(3)\">Reading level</th><th onclick=\"sortTable(4)\">DPS</th><th onclick=\"sortTable(5)\">Distractor quality</th><th onclick=\"sortTable(6)\">Diversity</th><th onclick=\"sortTable(7)\">Rationale</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for (i, bundle) in report.batch.per_question.iter().enumerate() {
        let row_class = match bundle.get_scalar("DPS") {
            Some(_) => "scored",
            None => "unscored",
        };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row_class,
            i + 1,
            cell(bundle, "clarity"),
            cell(bundle, "relevance"),
            cell(bundle, "readability_level"),
            cell(bundle, "DPS"),
            cell(bundle, "distractor_quality_detailed"),
            cell(bundle, "option_diversity"),
            cell(bundle, "rationale_quality"),
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &EvaluationReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

fn generate_bar_chart(scores: &[(&str, f64)]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = scores.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (label, score)) in scores.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (score.clamp(0.0, 1.0) * max_width as f64) as usize;

        let color = if *score >= 0.7 {
            "#22c55e"
        } else if *score >= 0.4 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(label)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.3}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --scored: #dcfce7; --unscored: #fef3c7; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --scored: #064e3b; --unscored: #78350f; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.4rem 0.8rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.scored { background: var(--scored); }
.unscored { background: var(--unscored); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  const key = (r) => {
    const t = r.cells[col].textContent;
    const n = parseFloat(t);
    return isNaN(n) ? t : n;
  };
  rows.sort((a, b) => {
    const va = key(a);
    const vb = key(b);
    const cmp = typeof va === 'number' && typeof vb === 'number' ? va - vb : String(va).localeCompare(String(vb));
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
