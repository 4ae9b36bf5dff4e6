//! The `quizforge profile` commands.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizforge_core::config::load_config_from;
use quizforge_core::learner::{ProfileStats, ResponseInput};
use quizforge_core::model::Difficulty;
use quizforge_core::store::{JsonProfileStore, ProfileStore};

use crate::ProfileAction;

pub fn execute(action: ProfileAction, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = JsonProfileStore::new(config.profile_dir);

    match action {
        ProfileAction::Show { user, json } => {
            let stats = store.load(&user).stats();
            if json {
                let out = serde_json::to_string_pretty(&stats)
                    .context("failed to serialize profile stats")?;
                println!("{out}");
            } else {
                print_stats(&stats);
            }
        }
        ProfileAction::Record {
            user,
            question_id,
            correct,
            time,
            difficulty,
            topic,
            confidence,
        } => {
            let mut profile = store.load(&user);
            let mut input = ResponseInput::new(question_id, correct, time)
                .difficulty(Difficulty::from(difficulty.as_str()))
                .topic(topic);
            input.confidence = confidence;

            let update = profile.add_response(input);
            store.save(&profile)?;

            println!(
                "Skill: {:.1} -> {:.1} ({:+.2})",
                update.previous_skill,
                update.skill_level,
                update.skill_level - update.previous_skill
            );
            println!(
                "Accuracy: {:.1}% over {} question(s)",
                profile.accuracy_rate * 100.0,
                profile.total_questions()
            );
        }
        ProfileAction::SetDifficulty { user, difficulty } => {
            let level = Difficulty::from(difficulty.as_str());
            anyhow::ensure!(
                level != Difficulty::Unrecognized,
                "unknown difficulty '{difficulty}', expected easy, medium or hard"
            );
            let mut profile = store.load(&user);
            profile.set_current_difficulty(level);
            store.save(&profile)?;
            println!("Difficulty for {user} set to {level}");
        }
    }

    Ok(())
}

fn print_stats(stats: &ProfileStats) {
    use comfy_table::{Cell, Table};

    println!("User: {}", stats.user_id);
    println!("Skill level: {:.1}", stats.skill_level);
    println!("Accuracy: {:.1}%", stats.accuracy_rate * 100.0);
    println!("Avg response time: {:.1}s", stats.avg_response_time);
    println!("Current difficulty: {}", stats.current_difficulty);
    println!("Questions answered: {}", stats.total_questions);

    if stats.topics_mastery.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Topic", "Correct", "Total", "Accuracy"]);
    for (topic, mastery) in &stats.topics_mastery {
        table.add_row(vec![
            Cell::new(topic),
            Cell::new(mastery.correct),
            Cell::new(mastery.total),
            Cell::new(format!("{:.1}%", mastery.accuracy() * 100.0)),
        ]);
    }
    println!("{table}");
}
