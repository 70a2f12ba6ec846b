//! Currency conversion against an exchange-rate lookup API.

use crate::config::ToolsmithConfig;
use crate::error::AdapterError;
use crate::registry::{ToolDescriptor, ToolParameter};
use crate::tools::ToolHandler;
use crate::types::{ParamType, ToolValue};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub struct CurrencyConvert {
    http: reqwest::Client,
    api_url: String,
}

/// Rate table keyed by target currency code, as returned by the
/// exchange-rate API for one source currency.
#[derive(Debug, Deserialize)]
struct RateTable {
    rates: HashMap<String, f64>,
}

impl CurrencyConvert {
    pub fn descriptor(config: &ToolsmithConfig, http: &reqwest::Client) -> ToolDescriptor {
        ToolDescriptor {
            name: "currency_convert".into(),
            description: "Converts an amount from a source currency to a target currency.".into(),
            parameters: vec![
                ToolParameter::required(
                    "amount",
                    ParamType::Number,
                    "The amount in the source currency.",
                ),
                ToolParameter::optional(
                    "source",
                    ParamType::String,
                    "The source currency code (e.g., 'USD').",
                    json!("USD"),
                ),
                ToolParameter::optional(
                    "target",
                    ParamType::String,
                    "The target currency code (e.g., 'EUR').",
                    json!("GBP"),
                ),
            ],
            handler: Arc::new(Self {
                http: http.clone(),
                api_url: config.currency.api_url.trim_end_matches('/').to_string(),
            }),
        }
    }
}

fn convert(table: &RateTable, amount: f64, target: &str) -> Result<f64, AdapterError> {
    table
        .rates
        .get(target)
        .map(|rate| rate * amount)
        .ok_or_else(|| AdapterError::UnknownCurrency(target.to_string()))
}

#[async_trait]
impl ToolHandler for CurrencyConvert {
    async fn call(
        &self,
        args: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ToolValue, AdapterError> {
        let amount = args
            .get("amount")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| AdapterError::InvalidInput("missing 'amount' argument".into()))?;
        let source = args
            .get("source")
            .and_then(|v| v.as_str())
            .unwrap_or("USD");
        let target = args
            .get("target")
            .and_then(|v| v.as_str())
            .unwrap_or("GBP");

        debug!("currency_convert: {} {} -> {}", amount, source, target);

        let url = format!("{}/{}", self.api_url, source);
        let resp = self.http.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AdapterError::Status { status, body });
        }

        let table: RateTable = serde_json::from_str(&resp.text().await?)?;
        let converted = convert(&table, amount, target)?;

        Ok(ToolValue::Text(format!(
            "{:.2} {} is equivalent to: {:.2} {}",
            amount, source, converted, target
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RateTable {
        RateTable {
            rates: HashMap::from([("GBP".to_string(), 0.79), ("EUR".to_string(), 0.92)]),
        }
    }

    #[test]
    fn converts_against_rate_table() {
        let converted = convert(&table(), 100.0, "EUR").unwrap();
        assert!((converted - 92.0).abs() < 1e-9);
    }

    #[test]
    fn missing_target_currency_is_an_error() {
        let err = convert(&table(), 100.0, "XYZ").unwrap_err();
        assert!(matches!(err, AdapterError::UnknownCurrency(code) if code == "XYZ"));
    }
}
