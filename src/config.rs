use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::ComplianceVerdict;
use crate::roles::Role;

/// Root configuration structure, deserialized from `.fleetdoc/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub compliance: ComplianceConfig,
    #[serde(default)]
    pub access: AccessConfig,
}

/// Backend REST API settings, used with `--online`.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `/drivers` endpoints hang off, e.g. `https://api.example.com/v1`.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Environment variable holding the bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_token_env() -> String {
    "FLEETDOC_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: None,
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ComplianceConfig {
    /// Document types every driver is expected to hold. Used to size a
    /// driver's expected total when the roster does not supply one.
    #[serde(default)]
    pub required_document_types: Vec<String>,
    #[serde(default)]
    pub fail_on: FailOn,
}

/// Lowest driver verdict that makes the CLI exit with code 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    #[default]
    Critical,
    Warning,
    Never,
}

impl FailOn {
    pub fn is_failing(self, verdict: ComplianceVerdict) -> bool {
        match self {
            FailOn::Critical => verdict == ComplianceVerdict::Critical,
            FailOn::Warning => matches!(
                verdict,
                ComplianceVerdict::Critical | ComplianceVerdict::Warning
            ),
            FailOn::Never => false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AccessConfig {
    #[serde(default)]
    pub role: Role,
}

/// Load configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base_dir>/.fleetdoc/config.toml`
/// 3. `~/.config/fleetdoc/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = base_dir.join(".fleetdoc").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("fleetdoc").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    tracing::debug!("no config file found, using defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    tracing::debug!(path = %path.display(), "loading config");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}
