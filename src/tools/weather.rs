//! Current-conditions weather lookup.

use crate::config::ToolsmithConfig;
use crate::error::AdapterError;
use crate::registry::{ToolDescriptor, ToolParameter};
use crate::tools::ToolHandler;
use crate::types::{ParamType, ToolValue};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub struct GetWeather {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GetWeather {
    pub fn descriptor(config: &ToolsmithConfig, http: &reqwest::Client) -> ToolDescriptor {
        ToolDescriptor {
            name: "get_weather".into(),
            description: "Get the current weather for a specified location. This includes \
                          temperature, humidity, AQI, rain, snow, current time and date etc."
                .into(),
            parameters: vec![ToolParameter::required(
                "location",
                ParamType::String,
                "The location name for weather information.",
            )],
            handler: Arc::new(Self {
                http: http.clone(),
                api_url: config.weather.api_url.clone(),
                api_key: config.weather.resolved_key(),
                api_key_env: config.weather.api_key_env.clone(),
            }),
        }
    }
}

#[async_trait]
impl ToolHandler for GetWeather {
    async fn call(
        &self,
        args: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ToolValue, AdapterError> {
        let location = args
            .get("location")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AdapterError::InvalidInput("missing 'location' argument".into()))?;

        // Validate before any network I/O.
        if location.trim().is_empty() {
            return Err(AdapterError::InvalidInput(
                "location cannot be empty; provide a valid location".into(),
            ));
        }

        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AdapterError::Configuration(format!(
                "weather API key not set; export {} or set [weather] api_key",
                self.api_key_env
            ))
        })?;

        debug!("get_weather: {}", location);

        let resp = self
            .http
            .get(&self.api_url)
            .query(&[
                ("key", api_key),
                ("q", location.trim()),
                ("aqi", "yes"),
                ("alerts", "no"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AdapterError::Status { status, body });
        }

        // Re-encode so the orchestrator always sees compact JSON.
        let payload: serde_json::Value = serde_json::from_str(&resp.text().await?)?;
        Ok(ToolValue::Text(payload.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn adapter(api_key: Option<&str>) -> GetWeather {
        GetWeather {
            http: reqwest::Client::new(),
            api_url: "http://127.0.0.1:9/current.json".into(),
            api_key: api_key.map(String::from),
            api_key_env: "WEATHER_API_KEY".into(),
        }
    }

    fn location_args(location: &str) -> serde_json::Map<String, serde_json::Value> {
        let mut args = serde_json::Map::new();
        args.insert("location".into(), json!(location));
        args
    }

    #[tokio::test]
    async fn empty_location_fails_before_network() {
        // Key present, but the blank location must short-circuit first;
        // the unroutable URL would otherwise error differently.
        let err = adapter(Some("k")).call(&location_args("  ")).await.unwrap_err();
        assert!(matches!(err, AdapterError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn missing_key_is_a_configuration_error() {
        let err = adapter(None).call(&location_args("Abuja")).await.unwrap_err();
        match err {
            AdapterError::Configuration(message) => {
                assert!(message.contains("WEATHER_API_KEY"));
            }
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }
}
