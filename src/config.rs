use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::sessions::{default_sessions, SessionTime};

pub type SharedConfig = Arc<Config>;

/// Which candidate source serves a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Synthetic,
    Llm,
}

impl SourceKind {
    pub fn from_str_loose(s: &str) -> Option<SourceKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "synthetic" | "random" => Some(SourceKind::Synthetic),
            "llm" | "openai" => Some(SourceKind::Llm),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server
    pub bind_addr: String,
    pub api_key: String,
    pub default_source: SourceKind,

    // Market data (Twelve Data)
    pub twelvedata_api_key: String,
    pub twelvedata_base_url: String,

    // LLM
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub llm_temperature: f32,

    pub http_timeout_secs: u64,
    pub synthetic_seed: Option<u64>,

    // Sessions (US Eastern wall-clock)
    pub sessions: Vec<SessionTime>,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            bind_addr: env("BIND_ADDR", "0.0.0.0:8000"),
            api_key: env("SIGNALS_API_KEY", ""),
            default_source: SourceKind::from_str_loose(&env("SIGNAL_SOURCE", "synthetic"))
                .unwrap_or(SourceKind::Synthetic),
            twelvedata_api_key: env("TWELVEDATA_API_KEY", ""),
            twelvedata_base_url: env("TWELVEDATA_BASE_URL", "https://api.twelvedata.com"),
            openai_api_key: env("OPENAI_API_KEY", ""),
            openai_base_url: env("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            openai_model: env("OPENAI_MODEL", "gpt-4o-mini"),
            llm_temperature: env("LLM_TEMPERATURE", "0.2").parse().unwrap_or(0.2),
            http_timeout_secs: env("HTTP_TIMEOUT_SECS", "30").parse().unwrap_or(30),
            synthetic_seed: std::env::var("SYNTHETIC_SEED")
                .ok()
                .and_then(|s| s.parse().ok()),
            sessions: default_sessions(),
            log_level: env("LOG_LEVEL", "info"),
        }
    }

    pub fn shared(self) -> SharedConfig {
        Arc::new(self)
    }

    pub fn llm_enabled(&self) -> bool {
        !self.openai_api_key.is_empty() && !self.twelvedata_api_key.is_empty()
    }
}
