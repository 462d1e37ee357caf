//! Application configuration
//!
//! Configuration loaded from a `.gh-pr-commenter.toml` file, searched in the
//! current working directory first and the home directory second. Everything
//! has a default, so the file is optional.

use gh_client::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use std::env;

const CONFIG_FILE: &str = ".gh-pr-commenter.toml";

/// Application configuration loaded from .gh-pr-commenter.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// How many retries a failed GitHub API call gets
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Delay before the first retry, in milliseconds (grows per attempt)
    #[serde(default = "default_retry_start_delay_ms")]
    pub retry_start_delay_ms: u64,
}

fn default_retries() -> u32 {
    3
}

fn default_retry_start_delay_ms() -> u64 {
    500
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            retry_start_delay_ms: default_retry_start_delay_ms(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// The retry policy the GitHub client should use.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retries, Duration::from_millis(self.retry_start_delay_ms))
    }
}

/// Load config file content from CWD first, then home directory
fn load_config_file() -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(CONFIG_FILE) {
        log::debug!("Loaded config from {}", CONFIG_FILE);
        return Some(content);
    }

    if let Some(home_config) = home_config_path() {
        if let Ok(content) = std::fs::read_to_string(&home_config) {
            log::debug!("Loaded config from {}", home_config.display());
            return Some(content);
        }
    }

    None
}

fn home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.retries, 3);
        assert_eq!(config.retry_start_delay_ms, 500);
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            retries = 5
            retry_start_delay_ms = 100
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.retries, 5);
        assert_eq!(config.retry_start_delay_ms, 100);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            retries = 1
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.retries, 1);
        // Other fields should use defaults
        assert_eq!(config.retry_start_delay_ms, 500);
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = AppConfig {
            retries: 2,
            retry_start_delay_ms: 250,
        };
        let policy = config.retry_policy();
        assert_eq!(policy.retries, 2);
        assert_eq!(policy.start_delay, Duration::from_millis(250));
    }
}
