//! quizforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quizforge",
    version,
    about = "Multiple-choice question quality scoring and learner skill tracking"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a question file and write reports
    Evaluate {
        /// Generated question file
        #[arg(long)]
        questions: PathBuf,

        /// Knowledge-base text for relevance scoring
        #[arg(long)]
        knowledge_base: Option<PathBuf>,

        /// Output directory (defaults to the configured one)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json, html, all (comma-separated)
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Check a question file for parse problems
    Validate {
        /// Generated question file
        #[arg(long)]
        questions: PathBuf,
    },

    /// Inspect or update a learner profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Create starter config and example question file
    Init,
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show a learner's rating, accuracy and topic mastery
    Show {
        #[arg(long)]
        user: String,

        /// Print the stats as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record one answered question
    Record {
        #[arg(long)]
        user: String,

        #[arg(long)]
        question_id: String,

        /// The answer was correct
        #[arg(long)]
        correct: bool,

        /// Seconds spent answering
        #[arg(long, default_value = "0")]
        time: f64,

        /// easy, medium or hard
        #[arg(long, default_value = "medium")]
        difficulty: String,

        #[arg(long, default_value = "general")]
        topic: String,

        /// Self-reported confidence, 1-5
        #[arg(long)]
        confidence: Option<u8>,
    },

    /// Set the difficulty for the learner's next questions
    SetDifficulty {
        #[arg(long)]
        user: String,

        /// easy, medium or hard
        #[arg(long)]
        difficulty: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Evaluate {
            questions,
            knowledge_base,
            output,
            format,
        } => commands::evaluate::execute(questions, knowledge_base, output, format, config),
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::Profile { action } => commands::profile::execute(action, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
