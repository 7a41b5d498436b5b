use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::usage::pricing::PriceTable;

const APP_NAME: &str = "ccmon";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHomeDir,
    #[error("config store error: {0}")]
    Store(#[from] confy::ConfyError),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Override for the Claude data directory (default: ~/.claude).
    /// `~` is expanded.
    pub claude_dir: Option<String>,
    pub watch: WatchConfig,
    pub pricing: PriceTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Poll interval in seconds
    pub interval_secs: u64,
    /// Context window size used for the gauge percentage
    pub context_window: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            context_window: 200_000,
        }
    }
}

pub fn load_config() -> Result<Config, ConfigError> {
    Ok(confy::load(APP_NAME, None)?)
}

pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    Ok(confy::store(APP_NAME, None, config)?)
}

pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(confy::get_configuration_file_path(APP_NAME, None)?)
}

/// Resolve the projects root: `<claude dir>/projects`.
///
/// Precedence: CLI `--claude-dir` flag, then the config file override,
/// then `~/.claude`.
pub fn projects_dir(cli_override: Option<&str>, config: &Config) -> Result<PathBuf, ConfigError> {
    let claude_dir = match cli_override.or(config.claude_dir.as_deref()) {
        Some(dir) => PathBuf::from(shellexpand::tilde(dir).into_owned()),
        None => dirs::home_dir().ok_or(ConfigError::NoHomeDir)?.join(".claude"),
    };
    Ok(claude_dir.join("projects"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override_beats_config() {
        let config = Config {
            claude_dir: Some("/from/config".to_string()),
            ..Default::default()
        };
        let dir = projects_dir(Some("/from/cli"), &config).unwrap();
        assert_eq!(dir, PathBuf::from("/from/cli/projects"));
    }

    #[test]
    fn test_config_override_used_without_cli_flag() {
        let config = Config {
            claude_dir: Some("/from/config".to_string()),
            ..Default::default()
        };
        let dir = projects_dir(None, &config).unwrap();
        assert_eq!(dir, PathBuf::from("/from/config/projects"));
    }

    #[test]
    fn test_tilde_expansion() {
        let config = Config::default();
        let dir = projects_dir(Some("~/custom"), &config).unwrap();
        assert!(!dir.to_string_lossy().starts_with('~'));
        assert!(dir.ends_with("custom/projects"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.watch.interval_secs, 5);
        assert_eq!(config.watch.context_window, 200_000);
        assert!((config.pricing.input_per_mtok - 3.0).abs() < 1e-9);
    }
}
