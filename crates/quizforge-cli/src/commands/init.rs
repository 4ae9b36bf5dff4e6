//! The `quizforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizforge.toml").exists() {
        println!("quizforge.toml already exists, skipping.");
    } else {
        std::fs::write("quizforge.toml", SAMPLE_CONFIG)?;
        println!("Created quizforge.toml");
    }

    std::fs::create_dir_all("questions")?;
    let example_path = std::path::Path::new("questions/example.txt");
    if example_path.exists() {
        println!("questions/example.txt already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUESTIONS)?;
        println!("Created questions/example.txt");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizforge validate --questions questions/example.txt");
    println!("  2. Run: quizforge evaluate --questions questions/example.txt --format all");
    println!("  3. Run: quizforge profile record --user demo --question-id q1 --correct --time 12");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

# Directory for user_profile_<id>.json files (QUIZFORGE_PROFILE_DIR overrides)
profile_dir = "."

# Default knowledge base for relevance scoring
# knowledge_base = "${HOME}/notes/biology.txt"

output_dir = "./quizforge-results"

[feedback]
dps_threshold = 0.6
diversity_threshold = 0.5
"#;

const EXAMPLE_QUESTIONS: &str = "\
Question 1: Which organelle is the main site of cellular respiration?
A) Mitochondrion
B) Ribosome
C) Golgi apparatus
D) Nucleus
Correct answer: A
Explanation: The mitochondrion hosts the Krebs cycle and oxidative phosphorylation, \
which is why it produces most of the cell's ATP. Ribosomes build proteins instead.

Question 2: What pigment allows plants to absorb light energy for photosynthesis?
A) Melanin
B) Chlorophyll
C) Hemoglobin
D) Keratin
Correct answer: B
Explanation: Chlorophyll absorbs red and blue light because of its porphyrin ring structure; \
the other pigments serve different functions in animals.
";

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::parser::parse_question_text;

    #[test]
    fn example_questions_are_scorable() {
        let questions = parse_question_text(EXAMPLE_QUESTIONS);
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.is_scorable()));
        assert!(questions.iter().all(|q| q.explanation.is_some()));
    }

    #[test]
    fn sample_config_parses() {
        let config: quizforge_core::config::QuizforgeConfig =
            toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.feedback.dps_threshold, 0.6);
    }
}
