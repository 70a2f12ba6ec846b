//! Configuration schema for toolsmith.toml (TOML-based).
//!
//! Adapters receive their endpoints and credentials from here at
//! construction time rather than reading the process environment at
//! call time. Credentials resolve from an inline value first, then a
//! named environment variable.

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsmithConfig {
    /// Log level (debug, info, warn, error).
    pub log_level: String,

    /// Bounded default timeout applied to every adapter HTTP call.
    pub http_timeout_secs: u64,

    /// Text-generation backend for legacy specification synthesis.
    pub backend: BackendConfig,

    /// Weather-conditions lookup service.
    pub weather: WeatherConfig,

    /// Exchange-rate lookup service.
    pub currency: CurrencyConfig,

    /// Web / news search service.
    pub search: SearchConfig,
}

impl Default for ToolsmithConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            http_timeout_secs: 30,
            backend: BackendConfig::default(),
            weather: WeatherConfig::default(),
            currency: CurrencyConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

/// OpenAI-compatible completion backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.groq.com/openai/v1".into(),
            api_key: None,
            api_key_env: "GROQ_API_KEY".into(),
            model: "llama-3.3-70b-versatile".into(),
            max_tokens: 128,
            temperature: 0.0,
        }
    }
}

impl BackendConfig {
    /// Inline key if set, else the named environment variable.
    pub fn resolved_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub api_key_env: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: "http://api.weatherapi.com/v1/current.json".into(),
            api_key: None,
            api_key_env: "WEATHER_API_KEY".into(),
        }
    }
}

impl WeatherConfig {
    pub fn resolved_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub api_url: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.exchangerate-api.com/v4/latest".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub api_key_env: String,

    /// Default result cap when a call does not specify one.
    pub max_results: u32,

    /// Default per-call timeout for web search, in seconds.
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.search.brave.com/res/v1".into(),
            api_key: None,
            api_key_env: "SEARCH_API_KEY".into(),
            max_results: 4,
            timeout_secs: 10,
        }
    }
}

impl SearchConfig {
    pub fn resolved_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
    }
}
