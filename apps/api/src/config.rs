use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON vocabulary replacing the built-in skill list.
    pub skill_vocabulary_path: Option<PathBuf>,
    /// Destination for persisted ranking results and reports.
    pub results_dir: PathBuf,
    /// Worker threads for candidate-parallel ranking. `None` keeps rayon's default.
    pub ranking_threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            skill_vocabulary_path: None,
            results_dir: PathBuf::from("results"),
            ranking_threads: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: match optional_env("PORT") {
                Some(port) => port
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            skill_vocabulary_path: optional_env("SKILL_VOCABULARY_PATH").map(PathBuf::from),
            results_dir: optional_env("RESULTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.results_dir),
            ranking_threads: optional_env("RANKING_THREADS")
                .map(|n| {
                    n.parse::<usize>()
                        .context("RANKING_THREADS must be a positive integer")
                })
                .transpose()?
                .filter(|&n| n > 0),
        })
    }
}

/// Reads a variable, treating unset and blank the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert!(config.skill_vocabulary_path.is_none());
        assert!(config.ranking_threads.is_none());
    }

    #[test]
    fn test_optional_env_treats_blank_as_unset() {
        std::env::set_var("SIFT_TEST_BLANK_VAR", "   ");
        assert_eq!(optional_env("SIFT_TEST_BLANK_VAR"), None);
        std::env::set_var("SIFT_TEST_BLANK_VAR", " value ");
        assert_eq!(optional_env("SIFT_TEST_BLANK_VAR").as_deref(), Some("value"));
        std::env::remove_var("SIFT_TEST_BLANK_VAR");
    }
}
