use dotenvy::dotenv;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use tracing::info;

use crate::{Error, Result};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EXCHANGE_BASE_URL: &str = "https://api.apilayer.com";
pub const DEFAULT_EXCHANGE_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_WORD_BATCH_SIZE: usize = 20;

/// Text-generation service settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
}

/// Exchange-rate service settings
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub exchange: ExchangeConfig,
    pub word_batch_size: usize,
}

/// Loads `.env` (if present) and reads the configuration from the process environment.
pub fn load_config() -> Result<Config> {
    info!("Loading configuration");

    // Load environment variables
    dotenv().ok();

    Config::from_lookup(|key| env::var(key).ok())
}

impl Config {
    /// Reads the configuration from a `.env`-style file without touching the process environment.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        let vars = dotenvy::from_path_iter(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?
            .collect::<std::result::Result<HashMap<String, String>, _>>()
            .map_err(|e| Error::Config(format!("Malformed {}: {}", path.display(), e)))?;

        Self::from_lookup(|key| vars.get(key).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset, the same as a missing line in `.env`
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key =
            get("OPENAI_API_KEY").ok_or_else(|| Error::Config("Missing OPENAI_API_KEY".to_string()))?;

        let model = get("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = match get("EXCHANGE_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| Error::Config("Invalid EXCHANGE_TIMEOUT_SECS".to_string()))?,
            None => DEFAULT_EXCHANGE_TIMEOUT_SECS,
        };

        let word_batch_size = match get("WORD_BATCH_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| Error::Config("Invalid WORD_BATCH_SIZE".to_string()))?,
            None => DEFAULT_WORD_BATCH_SIZE,
        };

        Ok(Config {
            llm: LlmConfig {
                api_key,
                base_url: get("OPENAI_BASE_URL"),
                model,
            },
            exchange: ExchangeConfig {
                api_key: get("APILAYER_API_KEY"),
                base_url: get("APILAYER_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_EXCHANGE_BASE_URL.to_string()),
                timeout_secs,
            },
            word_batch_size,
        })
    }
}
