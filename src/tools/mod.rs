pub mod currency;
pub mod math;
pub mod search;
pub mod traits;
pub mod weather;

pub use traits::ToolHandler;

use crate::config::ToolsmithConfig;
use crate::registry::ToolRegistry;
use anyhow::{Context, Result};
use std::time::Duration;

/// HTTP client shared by the adapters, with the bounded default
/// timeout from config so no upstream call can block indefinitely.
pub fn default_http_client(config: &ToolsmithConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .context("Failed to build HTTP client")
}

/// Build and seal the registry of built-in tools.
pub fn builtin_registry(config: &ToolsmithConfig) -> Result<ToolRegistry> {
    let http = default_http_client(config)?;

    let mut registry = ToolRegistry::new();
    registry.register(math::Calculate::descriptor())?;
    registry.register(currency::CurrencyConvert::descriptor(config, &http))?;
    registry.register(search::WebSearch::descriptor(config, &http))?;
    registry.register(search::NewsSearch::descriptor(config, &http))?;
    registry.register(weather::GetWeather::descriptor(config, &http))?;
    registry.seal();

    Ok(registry)
}
