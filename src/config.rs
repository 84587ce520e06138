use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Application configuration, read from a TOML file.
///
/// Every field has a default, so a missing file yields a working config;
/// the only hard requirement for startup is the `GEMINI_API_KEY`
/// environment variable, which is checked when the completion client is
/// constructed (never stored in the file).
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}

/// Load and validate the configuration.
///
/// A missing file is not an error; defaults apply.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.model.trim().is_empty() {
        anyhow::bail!("model must not be empty");
    }
    if config.api_base.trim().is_empty() {
        anyhow::bail!("api_base must not be empty");
    }
    if config.timeout_secs == 0 {
        anyhow::bail!("timeout_secs must be > 0");
    }

    Ok(config)
}
