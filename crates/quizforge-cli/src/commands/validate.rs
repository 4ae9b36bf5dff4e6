//! The `quizforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::parser::{parse_question_file, validate_questions};

pub fn execute(questions_path: PathBuf) -> Result<()> {
    let questions = parse_question_file(&questions_path)?;
    let scorable = questions.iter().filter(|q| q.is_scorable()).count();

    println!(
        "Question file: {} ({} questions, {} scorable)",
        questions_path.display(),
        questions.len(),
        scorable
    );

    let warnings = validate_questions(&questions);
    for w in &warnings {
        println!("  [question {}] WARNING: {}", w.index + 1, w.message);
    }

    if warnings.is_empty() {
        println!("All questions valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
