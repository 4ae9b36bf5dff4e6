//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const QUESTIONS: &str = "\
Question 1: Which planet is known as the red planet?
A) Mars
B) Venus
C) Jupiter
D) Saturn
Correct answer: A
Explanation: Mars looks red because iron oxide dust covers its surface.

Question 2: What is the chemical symbol for gold?
A) Ag
B) Au
C) Gd
D) Go
Correct answer: B
Explanation: The symbol Au comes from the Latin word aurum.

Question 3: Which gas do plants release?
A) Oxygen
B) Argon
";

fn quizforge() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizforge").unwrap()
}

fn write_questions(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("questions.txt");
    std::fs::write(&path, QUESTIONS).unwrap();
    path
}

fn files_with_extension(dir: &Path, ext: &str) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == ext))
        .collect()
}

#[test]
fn evaluate_writes_all_formats() {
    let dir = TempDir::new().unwrap();
    let questions = write_questions(dir.path());
    let out = dir.path().join("results");

    quizforge()
        .current_dir(dir.path())
        .arg("evaluate")
        .arg("--questions")
        .arg(&questions)
        .arg("--output")
        .arg(&out)
        .arg("--format")
        .arg("all")
        .assert()
        .success()
        .stdout(predicate::str::contains("Questions evaluated: 2"))
        .stdout(predicate::str::contains("Clarity"))
        .stderr(predicate::str::contains("Skipping 1 question(s)"));

    assert_eq!(files_with_extension(&out, "json").len(), 1);
    assert_eq!(files_with_extension(&out, "html").len(), 1);
    assert_eq!(files_with_extension(&out, "txt").len(), 1);

    let json_path = &files_with_extension(&out, "json")[0];
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
    assert_eq!(report["batch"]["count"], 2);
    assert!(report["batch"]["aggregate_metrics"]["avg_DPS"].is_number());
    assert!(report["knowledge_base"].is_null());
}

#[test]
fn evaluate_with_knowledge_base() {
    let dir = TempDir::new().unwrap();
    let questions = write_questions(dir.path());
    let kb = dir.path().join("kb.txt");
    std::fs::write(&kb, "Mars is the red planet. Gold has the symbol Au.").unwrap();
    let out = dir.path().join("results");

    quizforge()
        .current_dir(dir.path())
        .arg("evaluate")
        .arg("--questions")
        .arg(&questions)
        .arg("--knowledge-base")
        .arg(&kb)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let json_path = &files_with_extension(&out, "json")[0];
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
    assert!(report["knowledge_base"].is_string());
}

#[test]
fn evaluate_missing_knowledge_base_is_ignored() {
    let dir = TempDir::new().unwrap();
    let questions = write_questions(dir.path());

    quizforge()
        .current_dir(dir.path())
        .arg("evaluate")
        .arg("--questions")
        .arg(&questions)
        .arg("--knowledge-base")
        .arg(dir.path().join("missing.txt"))
        .arg("--output")
        .arg(dir.path().join("results"))
        .assert()
        .success();
}

#[test]
fn evaluate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    quizforge()
        .current_dir(dir.path())
        .arg("evaluate")
        .arg("--questions")
        .arg("nonexistent.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn evaluate_file_without_questions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "no questions here").unwrap();

    quizforge()
        .current_dir(dir.path())
        .arg("evaluate")
        .arg("--questions")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no questions found"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let questions = write_questions(dir.path());

    quizforge()
        .arg("validate")
        .arg("--questions")
        .arg(&questions)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 questions, 2 scorable"))
        .stdout(predicate::str::contains("[question 3] WARNING: only 2 of 4 options found"))
        .stdout(predicate::str::contains("no correct answer found"));
}

#[test]
fn validate_clean_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clean.txt");
    let clean = QUESTIONS.split("Question 3").next().unwrap();
    std::fs::write(&path, clean).unwrap();

    quizforge()
        .arg("validate")
        .arg("--questions")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("All questions valid"));
}

#[test]
fn profile_record_and_show() {
    let dir = TempDir::new().unwrap();

    quizforge()
        .current_dir(dir.path())
        .env("QUIZFORGE_PROFILE_DIR", dir.path())
        .args(["profile", "record", "--user", "alice", "--question-id", "q1"])
        .args(["--correct", "--time", "10", "--topic", "astronomy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skill: 1500.0 -> 1530.0"));

    assert!(dir.path().join("user_profile_alice.json").exists());

    quizforge()
        .current_dir(dir.path())
        .env("QUIZFORGE_PROFILE_DIR", dir.path())
        .args(["profile", "record", "--user", "alice", "--question-id", "q2"])
        .args(["--time", "10", "--difficulty", "hard", "--topic", "astronomy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skill: 1530.0 -> 1494.0"));

    quizforge()
        .current_dir(dir.path())
        .env("QUIZFORGE_PROFILE_DIR", dir.path())
        .args(["profile", "show", "--user", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skill level: 1494.0"))
        .stdout(predicate::str::contains("Accuracy: 50.0%"))
        .stdout(predicate::str::contains("astronomy"));
}

#[test]
fn profile_show_json_for_new_user() {
    let dir = TempDir::new().unwrap();

    let output = quizforge()
        .current_dir(dir.path())
        .env("QUIZFORGE_PROFILE_DIR", dir.path())
        .args(["profile", "show", "--user", "newbie", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["user_id"], "newbie");
    assert_eq!(stats["skill_level"], 1500.0);
    assert_eq!(stats["total_questions"], 0);
}

#[test]
fn profile_set_difficulty() {
    let dir = TempDir::new().unwrap();

    quizforge()
        .current_dir(dir.path())
        .env("QUIZFORGE_PROFILE_DIR", dir.path())
        .args(["profile", "set-difficulty", "--user", "bob", "--difficulty", "hard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("set to hard"));

    quizforge()
        .current_dir(dir.path())
        .env("QUIZFORGE_PROFILE_DIR", dir.path())
        .args(["profile", "show", "--user", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current difficulty: hard"));

    quizforge()
        .current_dir(dir.path())
        .env("QUIZFORGE_PROFILE_DIR", dir.path())
        .args(["profile", "set-difficulty", "--user", "bob", "--difficulty", "brutal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown difficulty"));
}

#[test]
fn profile_rejects_unsafe_user_id() {
    let dir = TempDir::new().unwrap();

    quizforge()
        .current_dir(dir.path())
        .env("QUIZFORGE_PROFILE_DIR", dir.path())
        .args(["profile", "record", "--user", "../evil", "--question-id", "q1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid user id"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizforge.toml"))
        .stdout(predicate::str::contains("Created questions/example.txt"));

    assert!(dir.path().join("quizforge.toml").exists());
    assert!(dir.path().join("questions/example.txt").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_then_evaluate_example() {
    let dir = TempDir::new().unwrap();

    quizforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizforge()
        .current_dir(dir.path())
        .args(["evaluate", "--questions", "questions/example.txt", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Questions evaluated: 2"));

    let out = dir.path().join("quizforge-results");
    assert_eq!(files_with_extension(&out, "txt").len(), 1);
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let questions = write_questions(dir.path());

    quizforge()
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .arg("evaluate")
        .arg("--questions")
        .arg(&questions)
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn help_output() {
    quizforge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("question quality"));
}

#[test]
fn version_output() {
    quizforge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizforge"));
}
