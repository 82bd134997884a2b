// src/core/config.rs
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use log::LevelFilter;

use crate::history::HISTORY_SLOT;
use crate::models::{CharacterClasses, DEFAULT_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

// Configuration for the generator
#[derive(Debug, Clone)]
pub struct Config {
    // History
    pub history_file: PathBuf,

    // Pronounceable generation service
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub ai_timeout: Option<Duration>,

    // Password Generation
    pub default_password_length: usize,
    pub default_classes: CharacterClasses,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // History
            history_file: PathBuf::from(format!("./{}.json", HISTORY_SLOT)),

            // Pronounceable generation service
            gemini_api_key: None,
            gemini_model: "gemini-2.0-flash".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            ai_timeout: Some(Duration::from_secs(60)),

            // Password Generation
            default_password_length: DEFAULT_PASSWORD_LENGTH,
            default_classes: CharacterClasses::default(),

            // Logging
            log_level: LevelFilter::Info,
            log_file: PathBuf::from("./passquartz.log"),
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        let mut config = Config::default();

        // History lives next to the rest of the app config when there is one
        if let Some(dir) = crate::utils::get_app_config_dir() {
            config.history_file = dir.join(format!("{}.json", HISTORY_SLOT));
        }

        if let Ok(file) = env::var("HISTORY_FILE") {
            config.history_file = PathBuf::from(file);
        }

        // Pronounceable generation service
        config.gemini_api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        if let Ok(model) = env::var("GEMINI_MODEL") {
            config.gemini_model = model;
        }

        if let Ok(url) = env::var("GEMINI_BASE_URL") {
            config.gemini_base_url = url;
        }

        if let Ok(val) = env::var("AI_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse::<u64>() {
                config.ai_timeout = if secs == 0 {
                    None
                } else {
                    Some(Duration::from_secs(secs))
                };
            }
        }

        // Password Generation
        if let Ok(val) = env::var("DEFAULT_PASSWORD_LENGTH") {
            if let Ok(length) = val.parse::<usize>() {
                config.default_password_length = length.clamp(MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH);
            }
        }

        if let Ok(val) = env::var("DEFAULT_USE_SYMBOLS") {
            if let Ok(symbols) = val.parse() {
                config.default_classes.symbols = symbols;
            }
        }

        // Logging
        if let Ok(level) = env::var("LOG_LEVEL") {
            config.log_level = parse_level(&level).unwrap_or(config.log_level);
        }

        if let Ok(file) = env::var("LOG_FILE") {
            config.log_file = PathBuf::from(file);
        }

        config
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_form() {
        let config = Config::default();
        assert_eq!(config.default_password_length, 16);
        assert_eq!(config.default_classes, CharacterClasses::default());
        assert!(config.gemini_api_key.is_none());
        assert!(config.history_file.ends_with("passquartz_history.json"));
    }

    #[test]
    fn parses_log_levels_case_insensitively() {
        assert_eq!(parse_level("DEBUG"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("warn"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("verbose"), None);
    }
}
