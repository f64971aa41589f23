//! Configuration loading and representation.
//!
//! Everything comes from environment variables. Unparsable values are logged
//! and replaced by their defaults rather than aborting startup.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use greenloop_ai::{CompletionOptions, GeneratorSettings};

pub const ENV_BIND: &str = "GREENLOOP_BIND";
pub const ENV_DATA_DIR: &str = "GREENLOOP_DATA_DIR";
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_AI_BASE_URL: &str = "GREENLOOP_AI_BASE_URL";
pub const ENV_AI_MODEL: &str = "GREENLOOP_AI_MODEL";
pub const ENV_AI_TEMPERATURE: &str = "GREENLOOP_AI_TEMPERATURE";
pub const ENV_AI_MAX_TOKENS: &str = "GREENLOOP_AI_MAX_TOKENS";
pub const ENV_AI_TIMEOUT_SECS: &str = "GREENLOOP_AI_TIMEOUT_SECS";

const DEFAULT_BIND: &str = "0.0.0.0:3000";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

const ASSETS_FILE: &str = "items.json";
const HISTORY_FILE: &str = "analysis.json";

/// Completion provider settings. Present only when an API key is configured.
#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl AiConfig {
    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            options: CompletionOptions {
                model: self.model.clone(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            },
            timeout: self.timeout,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    /// `None` disables the provider; analyses use the heuristic only.
    pub ai: Option<AiConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let ai = get(ENV_API_KEY).map(|api_key| {
            let defaults = CompletionOptions::default();
            AiConfig {
                api_key,
                base_url: get(ENV_AI_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                model: get(ENV_AI_MODEL).unwrap_or(defaults.model),
                temperature: parse_or(ENV_AI_TEMPERATURE, get(ENV_AI_TEMPERATURE), defaults.temperature),
                max_tokens: parse_or(ENV_AI_MAX_TOKENS, get(ENV_AI_MAX_TOKENS), defaults.max_tokens),
                timeout: Duration::from_secs(parse_or(
                    ENV_AI_TIMEOUT_SECS,
                    get(ENV_AI_TIMEOUT_SECS),
                    DEFAULT_TIMEOUT_SECS,
                )),
            }
        });

        Self {
            bind_addr: get(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string()),
            data_dir: get(ENV_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            ai,
        }
    }

    pub fn assets_path(&self) -> PathBuf {
        self.data_dir.join(ASSETS_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "unparsable configuration value; using default");
            default
        }),
    }
}
