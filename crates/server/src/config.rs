//! # Application Configuration
//!
//! This module defines the configuration structure for the `studygen-server`
//! and provides the logic for loading it from an optional `config.yml` file
//! and environment variables. The defaults are complete, so a missing config
//! file is not an error; only the generation feature degrades when no API
//! credential can be found anywhere.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// The AI provider to use for generation.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Generation tuning: model preference order and the truncation bound.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Per-mode instruction overrides, keyed by the mode's snake_case name.
    #[serde(default)]
    pub prompts: HashMap<String, String>,
}

fn default_port() -> u16 {
    8080
}

/// 200 MB, the documented hosting bound for uploads.
fn default_max_upload_bytes() -> usize {
    200 * 1024 * 1024
}

/// Configuration for the text-generation provider.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// The type of provider ("gemini" or "local").
    #[serde(default = "default_provider")]
    pub provider: String,
    /// The API base URL. Optional for Gemini, where it can be derived.
    #[serde(default)]
    pub api_url: Option<String>,
    /// The API key. Absence disables the generation feature only.
    #[serde(default)]
    pub api_key: Option<String>,
    /// A fixed model identifier. When unset, discovery via the model-listing
    /// endpoint picks one at startup.
    #[serde(default)]
    pub model_name: Option<String>,
}

fn default_provider() -> String {
    "gemini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: None,
            api_key: None,
            model_name: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Known-good model names, tried in order during discovery.
    #[serde(default = "default_preferred_models")]
    pub preferred_models: Vec<String>,
    /// Maximum character count of extracted text forwarded into a prompt.
    #[serde(default = "default_truncation_limit")]
    pub truncation_limit: usize,
}

fn default_preferred_models() -> Vec<String> {
    vec![
        "gemini-2.5-flash".to_string(),
        "gemini-2.0-flash".to_string(),
        "gemini-flash-latest".to_string(),
    ]
}

fn default_truncation_limit() -> usize {
    30_000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            preferred_models: default_preferred_models(),
            truncation_limit: default_truncation_limit(),
        }
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| "".to_string())
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from an optional file and environment
/// variables.
///
/// Layering, lowest to highest precedence:
/// 1. Built-in defaults (every key has one).
/// 2. `config.yml` (or the override path), with `${ENV_VAR}` substitution.
/// 3. Environment variables for top-level keys like `PORT`.
/// 4. `STUDYGEN_...` variables for nested keys (e.g. `STUDYGEN_PROVIDER__API_KEY`).
///
/// After all layers, `GEMINI_API_KEY` is honored directly from the
/// environment when the file leaves `provider.api_key` unset.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    let config_path = config_path_override.unwrap_or("config.yml");
    if let Some(content) = read_and_substitute(config_path)? {
        info!("Loading configuration from '{config_path}'.");
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    } else {
        info!("No config file at '{config_path}'; using defaults and environment.");
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("STUDYGEN")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // Explicitly fall back to GEMINI_API_KEY from the environment so the
    // common deployment (secret injected as an env var, no config file)
    // works without any YAML.
    let key_is_blank = config
        .provider
        .api_key
        .as_deref()
        .map(|k| k.trim().is_empty())
        .unwrap_or(true);
    if key_is_blank && config.provider.provider == "gemini" {
        if let Ok(key) = env::var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                config.provider.api_key = Some(key);
            }
        }
    }

    Ok(config)
}
