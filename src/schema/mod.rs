//! Tool specification synthesis.
//!
//! The primary mode derives an OpenAI-compatible specification
//! deterministically from a descriptor's declared metadata. The legacy
//! mode round-trips a rendered prompt through a text-generation
//! backend and parses whatever comes back; its nondeterminism is
//! isolated here and a parse failure never aborts a batch.

use crate::backend::CompletionBackend;
use crate::error::SchemaError;
use crate::registry::{ToolDescriptor, ToolRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

// ---------------------------------------------------------------------------
// Specification shape
// ---------------------------------------------------------------------------

/// Externally-facing specification for one tool:
/// `{"type": "function", "function": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpecification {
    pub r#type: String,
    pub function: FunctionSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    pub r#type: String,
    pub properties: BTreeMap<String, PropertySpec>,
    pub required: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub r#type: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Deterministic synthesis
// ---------------------------------------------------------------------------

/// Derive the specification for one descriptor. Pure: the same
/// descriptor always yields byte-identical serialized output.
pub fn synthesize(descriptor: &ToolDescriptor) -> ToolSpecification {
    let mut properties = BTreeMap::new();
    let mut required = Vec::new();

    for param in &descriptor.parameters {
        properties.insert(
            param.name.clone(),
            PropertySpec {
                r#type: param.param_type.as_str().to_string(),
                description: param.description.clone(),
            },
        );
        if param.required {
            required.push(param.name.clone());
        }
    }

    ToolSpecification {
        r#type: "function".into(),
        function: FunctionSpec {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            parameters: ParameterSchema {
                r#type: "object".into(),
                properties,
                required,
            },
        },
    }
}

/// Specifications for every registered tool, in registration order.
pub fn synthesize_all(registry: &ToolRegistry) -> Vec<ToolSpecification> {
    registry.list().map(|d| synthesize(d)).collect()
}

// ---------------------------------------------------------------------------
// Legacy backend-driven synthesis
// ---------------------------------------------------------------------------

const PROMPT_HEADER: &str = r#"You are a helpful assistant familiar with OpenAI tool specifications, which have the following JSON format:

{
    "type": "function",
    "function": {
        "name": "<function_name>",
        "description": "<function_description>",
        "parameters": {
            "type": "object",
            "properties": {
                "<parameter_name>": {
                    "type": "<parameter_type>",
                    "description": "<parameter_description>"
                }
            },
            "required": ["<parameter_name>"]
        }
    }
}
"#;

/// Render the prompt asking the backend to specify one tool.
fn render_prompt(descriptor: &ToolDescriptor) -> String {
    let mut prompt = String::with_capacity(1024);
    prompt.push_str(PROMPT_HEADER);
    prompt.push_str(
        "\nGenerate an OpenAI Tools Specification compatible JSON string for the following tool:\n",
    );
    prompt.push_str(&format!("Tool Name: {}\n", descriptor.name));
    prompt.push_str(&format!("Tool Description: {}\n", descriptor.description));
    if !descriptor.parameters.is_empty() {
        prompt.push_str("Parameters:\n");
        for param in &descriptor.parameters {
            let requirement = if param.required {
                "required".to_string()
            } else {
                format!("optional, default {}", param.default.as_ref().unwrap_or(&serde_json::Value::Null))
            };
            prompt.push_str(&format!(
                "  {} ({}, {}): {}\n",
                param.name, param.param_type, requirement, param.description
            ));
        }
    }
    prompt.push_str("\nPlease respond only with the JSON string, without any additional text.\n");
    prompt
}

/// Models wrap JSON replies in markdown fences often enough that the
/// parser tolerates them.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Legacy mode: ask the backend to specify the tool, then parse its
/// textual reply. Parse failures name the offending tool.
pub async fn synthesize_via_backend(
    descriptor: &ToolDescriptor,
    backend: &dyn CompletionBackend,
) -> Result<ToolSpecification, SchemaError> {
    let prompt = render_prompt(descriptor);
    let reply = backend
        .complete(&prompt)
        .await
        .map_err(|e| SchemaError::Backend {
            tool: descriptor.name.clone(),
            source: e,
        })?;

    let body = strip_code_fences(&reply);
    serde_json::from_str(body).map_err(|e| SchemaError::SpecificationParse {
        tool: descriptor.name.clone(),
        reason: e.to_string(),
    })
}

/// Batch legacy synthesis. A tool whose reply fails to parse is
/// logged and skipped; the remaining tools are still synthesized.
pub async fn synthesize_all_via_backend(
    registry: &ToolRegistry,
    backend: &dyn CompletionBackend,
) -> Vec<ToolSpecification> {
    let mut specs = Vec::with_capacity(registry.len());
    for descriptor in registry.list() {
        match synthesize_via_backend(descriptor, backend).await {
            Ok(spec) => specs.push(spec),
            Err(e) => warn!("Skipping tool '{}': {}", descriptor.name, e),
        }
    }
    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdapterError;
    use crate::registry::ToolParameter;
    use crate::tools::ToolHandler;
    use crate::types::{ParamType, ToolValue};
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    struct NoopTool;

    #[async_trait]
    impl ToolHandler for NoopTool {
        async fn call(
            &self,
            _args: &serde_json::Map<String, serde_json::Value>,
        ) -> Result<ToolValue, AdapterError> {
            Ok(ToolValue::Text("ok".into()))
        }
    }

    fn sample_descriptor() -> ToolDescriptor {
        ToolDescriptor {
            name: "lookup".into(),
            description: "Look a thing up.".into(),
            parameters: vec![
                ToolParameter::required("term", ParamType::String, "What to look up."),
                ToolParameter::optional("limit", ParamType::Integer, "Result cap.", json!(4)),
            ],
            handler: Arc::new(NoopTool),
        }
    }

    /// Backend returning a fixed reply per prompt, keyed by tool name.
    struct CannedBackend {
        replies: Vec<(&'static str, &'static str)>,
    }

    #[async_trait]
    impl CompletionBackend for CannedBackend {
        async fn complete(&self, prompt: &str) -> Result<String> {
            for (needle, reply) in &self.replies {
                if prompt.contains(needle) {
                    return Ok(reply.to_string());
                }
            }
            Ok("no reply configured".into())
        }
    }

    #[test]
    fn synthesis_is_deterministic() {
        let descriptor = sample_descriptor();
        let a = serde_json::to_string(&synthesize(&descriptor)).unwrap();
        let b = serde_json::to_string(&synthesize(&descriptor)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn synthesis_matches_the_function_shape() {
        let spec = synthesize(&sample_descriptor());
        assert_eq!(spec.r#type, "function");
        assert_eq!(spec.function.name, "lookup");
        assert_eq!(spec.function.parameters.r#type, "object");
        assert_eq!(spec.function.parameters.properties["term"].r#type, "string");
        assert_eq!(spec.function.parameters.required, vec!["term"]);
    }

    #[test]
    fn required_list_round_trips() {
        let descriptor = sample_descriptor();
        let spec = synthesize(&descriptor);
        let from_spec: std::collections::HashSet<_> =
            spec.function.parameters.required.iter().cloned().collect();
        let from_descriptor: std::collections::HashSet<_> = descriptor
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(from_spec, from_descriptor);
    }

    #[tokio::test]
    async fn backend_reply_is_parsed_with_fences_stripped() {
        let spec = synthesize(&sample_descriptor());
        let reply = format!("```json\n{}\n```", serde_json::to_string(&spec).unwrap());
        let backend = CannedBackend {
            replies: vec![("lookup", Box::leak(reply.into_boxed_str()))],
        };
        let parsed = synthesize_via_backend(&sample_descriptor(), &backend)
            .await
            .unwrap();
        assert_eq!(parsed, spec);
    }

    #[tokio::test]
    async fn unparseable_reply_names_the_tool() {
        let backend = CannedBackend {
            replies: vec![("lookup", "Sure! Here is the JSON you asked for.")],
        };
        let err = synthesize_via_backend(&sample_descriptor(), &backend)
            .await
            .unwrap_err();
        match err {
            SchemaError::SpecificationParse { tool, .. } => assert_eq!(tool, "lookup"),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn batch_synthesis_skips_unparseable_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(sample_descriptor()).unwrap();
        let mut second = sample_descriptor();
        second.name = "other".into();
        let good = serde_json::to_string(&synthesize(&second)).unwrap();
        registry.register(second).unwrap();
        registry.seal();

        let backend = CannedBackend {
            replies: vec![
                ("lookup", "not json at all"),
                ("other", Box::leak(good.into_boxed_str())),
            ],
        };
        let specs = synthesize_all_via_backend(&registry, &backend).await;
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].function.name, "other");
    }
}
