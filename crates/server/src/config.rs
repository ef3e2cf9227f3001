//! # Application Configuration
//!
//! This module defines the configuration structure for the `askdoc-server` and
//! provides the logic for loading it from a `config.yml` file and environment
//! variables. Top-level keys like `port` can be overridden by environment
//! variables (`PORT`), and `${VAR}` references inside the YAML file are
//! substituted from the environment before parsing.

use askdoc::ScopePolicy;
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
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
    /// The path to the reference PDF. Loaded from `DOCUMENT_PATH` env var.
    #[serde(default = "default_document_path")]
    pub document_path: String,
    /// The path to the feedback CSV. Loaded from `FEEDBACK_PATH` env var.
    #[serde(default = "default_feedback_path")]
    pub feedback_path: String,
    /// How many prior turns are embedded in each prompt; 0 disables history.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// The scope-restriction policy: subject, refusal and greeting wording,
    /// and the answer-language to speech-code map.
    #[serde(default)]
    pub policy: ScopePolicy,
    /// The generation provider to answer questions with.
    pub provider: ProviderConfig,
    /// The speech-synthesis endpoint configuration.
    #[serde(default)]
    pub speech: SpeechConfig,
}

/// Provides a default value for the `port` field if not set in the environment.
fn default_port() -> u16 {
    9090
}

fn default_document_path() -> String {
    "reference.pdf".to_string()
}

fn default_feedback_path() -> String {
    "feedback.csv".to_string()
}

fn default_history_window() -> usize {
    20
}

/// The configuration for a specific AI provider instance.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// The type of provider (e.g., "gemini", "local").
    pub provider: String,
    /// The API URL. Optional for providers like Gemini where it can be derived.
    pub api_url: Option<String>,
    /// The API key, which can be null for local providers.
    pub api_key: Option<String>,
    pub model_name: String,
}

/// Configuration for the speech-synthesis endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct SpeechConfig {
    #[serde(default = "default_speech_enabled")]
    pub enabled: bool,
    #[serde(default = "default_speech_api_url")]
    pub api_url: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_speech_enabled(),
            api_url: default_speech_api_url(),
        }
    }
}

fn default_speech_enabled() -> bool {
    true
}

fn default_speech_api_url() -> String {
    askdoc::providers::speech::translate::TranslateTtsProvider::DEFAULT_API_URL.to_string()
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").unwrap();
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| "".to_string())
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// The file defaults to `config.yml` next to the crate manifest; tests pass an
/// explicit path. Environment variables override top-level keys (`PORT`,
/// `DOCUMENT_PATH`, ...) and are substituted into `${VAR}` references inside
/// the file.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let config_path = match config_path_override {
        Some(path) => path.to_string(),
        None => {
            let base_path = env!("CARGO_MANIFEST_DIR");
            format!("{base_path}/config.yml")
        }
    };

    let content = read_and_substitute(&config_path)?.ok_or_else(|| {
        ConfigError::NotFound(format!(
            "Config file not found at '{config_path}'. Please create a 'config.yml' with at least a 'provider' section."
        ))
    })?;
    info!("Loading configuration from '{config_path}'.");

    let settings = ConfigBuilder::builder()
        .add_source(File::from_str(&content, FileFormat::Yaml))
        // Environment variables override top-level keys like PORT.
        .add_source(Environment::default())
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    Ok(config)
}
