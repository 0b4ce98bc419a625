use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Dataset file to load instead of the bundled glossary
    #[serde(default)]
    pub dataset_path: Option<String>,
    /// Default tracing filter when `GLOSSARY_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log file location; defaults to a file in the config directory
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default = "default_show_splash")]
    pub show_splash: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_show_splash() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: None,
            log_level: default_log_level(),
            log_file: None,
            show_splash: default_show_splash(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".glossary-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config file, if there is a readable one
    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Option<Config> {
        serde_json::from_str(contents).ok()
    }

    /// Where logs go: the configured file, else `~/.glossary-tui/glossary-tui.log`
    pub fn log_path(&self) -> Option<PathBuf> {
        match &self.log_file {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::config_dir().map(|dir| dir.join("glossary-tui.log")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.dataset_path.is_none());
        assert_eq!(config.log_level, "info");
        assert!(config.show_splash);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = Config::from_json(r#"{"dataset_path": "/tmp/terms.csv"}"#).unwrap();
        assert_eq!(config.dataset_path.as_deref(), Some("/tmp/terms.csv"));
        assert_eq!(config.log_level, "info");
        assert!(config.show_splash);
    }

    #[test]
    fn test_invalid_json_is_ignored() {
        assert!(Config::from_json("{not json").is_none());
    }

    #[test]
    fn test_explicit_log_file() {
        let config = Config {
            log_file: Some("/tmp/g.log".to_string()),
            ..Config::default()
        };
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/g.log")));
    }
}
