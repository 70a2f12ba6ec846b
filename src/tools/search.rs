//! Web and news search against a keyed search API.
//!
//! Both tools return their results as a JSON-encoded ordered array of
//! records so the orchestrator can quote or re-rank them.

use crate::config::ToolsmithConfig;
use crate::error::AdapterError;
use crate::registry::{ToolDescriptor, ToolParameter};
use crate::tools::ToolHandler;
use crate::types::{ParamType, ToolValue};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// One search hit, in rank order.
#[derive(Debug, Serialize)]
struct SearchRecord {
    title: String,
    url: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<String>,
}

fn record_from(item: &serde_json::Value) -> SearchRecord {
    SearchRecord {
        title: item["title"].as_str().unwrap_or_default().to_string(),
        url: item["url"].as_str().unwrap_or_default().to_string(),
        description: item["description"].as_str().unwrap_or_default().to_string(),
        age: item["age"].as_str().map(String::from),
    }
}

fn missing_key(env: &str) -> AdapterError {
    AdapterError::Configuration(format!(
        "search API key not set; export {env} or set [search] api_key"
    ))
}

// ---------------------------------------------------------------------------
// Web search
// ---------------------------------------------------------------------------

pub struct WebSearch {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl WebSearch {
    pub fn descriptor(config: &ToolsmithConfig, http: &reqwest::Client) -> ToolDescriptor {
        ToolDescriptor {
            name: "web_search".into(),
            description: "Search the web for a query and return the results.".into(),
            parameters: vec![
                ToolParameter::required(
                    "query",
                    ParamType::String,
                    "The query to search for.",
                ),
                ToolParameter::optional(
                    "max_results",
                    ParamType::Integer,
                    "The maximum number of results to return.",
                    json!(config.search.max_results),
                ),
                ToolParameter::optional(
                    "timeout",
                    ParamType::Integer,
                    "Timeout for the request, in seconds.",
                    json!(config.search.timeout_secs),
                ),
            ],
            handler: Arc::new(Self {
                http: http.clone(),
                api_url: config.search.api_url.trim_end_matches('/').to_string(),
                api_key: config.search.resolved_key(),
                api_key_env: config.search.api_key_env.clone(),
            }),
        }
    }
}

#[async_trait]
impl ToolHandler for WebSearch {
    async fn call(
        &self,
        args: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ToolValue, AdapterError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| missing_key(&self.api_key_env))?;
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AdapterError::InvalidInput("missing 'query' argument".into()))?;
        let max_results = args.get("max_results").and_then(|v| v.as_u64()).unwrap_or(4);
        let timeout = args.get("timeout").and_then(|v| v.as_u64()).unwrap_or(10);

        debug!("web_search: '{}' (max {})", query, max_results);

        let resp = self
            .http
            .get(format!("{}/web/search", self.api_url))
            .header("X-Subscription-Token", api_key)
            .query(&[("q", query), ("count", &max_results.to_string())])
            .timeout(Duration::from_secs(timeout))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AdapterError::Status { status, body });
        }

        let payload: serde_json::Value = serde_json::from_str(&resp.text().await?)?;
        let records: Vec<SearchRecord> = payload["web"]["results"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .take(max_results as usize)
                    .map(record_from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(ToolValue::Text(serde_json::to_string_pretty(&records)?))
    }
}

// ---------------------------------------------------------------------------
// News search
// ---------------------------------------------------------------------------

pub struct NewsSearch {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl NewsSearch {
    pub fn descriptor(config: &ToolsmithConfig, http: &reqwest::Client) -> ToolDescriptor {
        ToolDescriptor {
            name: "news_search".into(),
            description: "Search the web for the latest news based on a query and return the \
                          results."
                .into(),
            parameters: vec![
                ToolParameter::required(
                    "topic",
                    ParamType::String,
                    "The query to search for news.",
                ),
                ToolParameter::optional(
                    "max_results",
                    ParamType::Integer,
                    "The maximum number of news results to return.",
                    json!(config.search.max_results),
                ),
            ],
            handler: Arc::new(Self {
                http: http.clone(),
                api_url: config.search.api_url.trim_end_matches('/').to_string(),
                api_key: config.search.resolved_key(),
                api_key_env: config.search.api_key_env.clone(),
            }),
        }
    }
}

#[async_trait]
impl ToolHandler for NewsSearch {
    async fn call(
        &self,
        args: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ToolValue, AdapterError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| missing_key(&self.api_key_env))?;
        let topic = args
            .get("topic")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AdapterError::InvalidInput("missing 'topic' argument".into()))?;
        let max_results = args.get("max_results").and_then(|v| v.as_u64()).unwrap_or(4);

        debug!("news_search: '{}' (max {})", topic, max_results);

        let resp = self
            .http
            .get(format!("{}/news/search", self.api_url))
            .header("X-Subscription-Token", api_key)
            .query(&[("q", topic), ("count", &max_results.to_string())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AdapterError::Status { status, body });
        }

        let payload: serde_json::Value = serde_json::from_str(&resp.text().await?)?;
        let records: Vec<SearchRecord> = payload["results"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .take(max_results as usize)
                    .map(record_from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(ToolValue::Text(serde_json::to_string_pretty(&records)?))
    }
}
