use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODELS;

/// Application configuration loaded from environment variables.
/// Everything has a default; only `GEMINI_API_KEY` is optional and its
/// absence is reported per request by the regenerate endpoint.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub data_dir: PathBuf,
    /// Base URL of the regenerate endpoint the step editors call.
    pub api_base_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_models: Vec<String>,
    pub generation_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let generation_timeout_secs = std::env::var("GENERATION_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse::<u64>()
            .context("GENERATION_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            port,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| format!("http://127.0.0.1:{port}")),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_models: optional_env("GEMINI_MODELS")
                .map(|raw| parse_models(&raw))
                .filter(|models| !models.is_empty())
                .unwrap_or_else(default_models),
            generation_timeout: Duration::from_secs(generation_timeout_secs),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_models(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_models() -> Vec<String> {
    DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
}

#[cfg(test)]
impl Config {
    /// Defaults without reading the environment.
    pub fn for_tests(data_dir: PathBuf) -> Self {
        Config {
            port: 5000,
            rust_log: "info".to_string(),
            data_dir,
            api_base_url: "http://127.0.0.1:5000".to_string(),
            gemini_api_key: None,
            gemini_models: default_models(),
            generation_timeout: Duration::from_secs(5),
        }
    }
}
