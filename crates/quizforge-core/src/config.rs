//! quizforge configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::evaluate::FeedbackThresholds;

/// Top-level quizforge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// Directory holding `user_profile_*.json` files.
    #[serde(default = "default_profile_dir")]
    pub profile_dir: PathBuf,
    /// Default knowledge-base text for relevance scoring.
    #[serde(default)]
    pub knowledge_base: Option<PathBuf>,
    /// Output directory for evaluation reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Session feedback thresholds.
    #[serde(default)]
    pub feedback: FeedbackThresholds,
}

fn default_profile_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizforge-results")
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            profile_dir: default_profile_dir(),
            knowledge_base: None,
            output_dir: default_output_dir(),
            feedback: FeedbackThresholds::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Unset variables expand to the empty string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let value = std::env::var(&result[start + 2..start + end]).unwrap_or_default();
        result.replace_range(start..start + end + 1, &value);
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// `QUIZFORGE_PROFILE_DIR` overrides `profile_dir`.
pub fn load_config() -> Result<QuizforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("quizforge.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizforgeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizforgeConfig::default(),
    };

    if let Ok(dir) = std::env::var("QUIZFORGE_PROFILE_DIR") {
        if !dir.is_empty() {
            config.profile_dir = PathBuf::from(dir);
        }
    }

    config.profile_dir = resolve_path(&config.profile_dir);
    config.output_dir = resolve_path(&config.output_dir);
    config.knowledge_base = config.knowledge_base.as_deref().map(resolve_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}
