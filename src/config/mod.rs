mod schema;
pub mod validation;

pub use schema::{Config, SourceConfig, SourcePolicy};
pub use validation::validate_config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Fallback HTTP request timeout when the config does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Get the config directory path (~/.config/demonboard/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("demonboard")
}

/// Get the default config file path (~/.config/demonboard/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/demonboard/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Create ~/.config/demonboard/config.yaml",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

impl Config {
    /// Effective HTTP request timeout. Validation has already checked the
    /// string parses, so a malformed value here falls back to the default.
    pub fn request_timeout(&self) -> Duration {
        self.timeout
            .as_deref()
            .and_then(|raw| humantime::parse_duration(raw).ok())
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_timeout_parses_configured_value() {
        let config = Config {
            sources: vec![],
            policy: SourcePolicy::MergeAllSources,
            timeout: Some("2min".to_string()),
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_request_timeout_defaults_when_unset() {
        let config = Config {
            sources: vec![],
            policy: SourcePolicy::MergeAllSources,
            timeout: None,
        };
        assert_eq!(config.request_timeout(), DEFAULT_TIMEOUT);
    }
}
