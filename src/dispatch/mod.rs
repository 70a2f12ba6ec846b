//! Argument validation and tool invocation.
//!
//! Validation errors surface as typed [`DispatchError`] values so
//! callers can branch on kind. Faults inside a tool never propagate:
//! they become `InvocationResult` failures the orchestrator can read.

use crate::error::DispatchError;
use crate::registry::ToolRegistry;
use crate::types::{json_type_name, InvocationResult};
use std::sync::Arc;
use tracing::debug;

pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Invoke a tool by name with a JSON object of arguments.
    ///
    /// Validation order: unknown tool, missing required arguments,
    /// type mismatches, unexpected argument names. Only then does the
    /// handler run, with defaults bound for absent optional
    /// parameters.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: &serde_json::Value,
    ) -> Result<InvocationResult, DispatchError> {
        let descriptor = self
            .registry
            .get(name)
            .map_err(|_| DispatchError::UnknownTool(name.to_string()))?;

        let empty = serde_json::Map::new();
        let supplied = arguments.as_object().unwrap_or(&empty);

        for param in &descriptor.parameters {
            if param.required && !supplied.contains_key(&param.name) {
                return Err(DispatchError::MissingArgument {
                    tool: descriptor.name.clone(),
                    argument: param.name.clone(),
                });
            }
        }

        for param in &descriptor.parameters {
            if let Some(value) = supplied.get(&param.name) {
                if !param.param_type.accepts(value) {
                    return Err(DispatchError::TypeMismatch {
                        tool: descriptor.name.clone(),
                        argument: param.name.clone(),
                        expected: param.param_type,
                        actual: json_type_name(value),
                    });
                }
            }
        }

        for key in supplied.keys() {
            if !descriptor.parameters.iter().any(|p| &p.name == key) {
                return Err(DispatchError::UnexpectedArgument {
                    tool: descriptor.name.clone(),
                    argument: key.clone(),
                });
            }
        }

        // Bind supplied values, then defaults for absent optionals.
        let mut bound = serde_json::Map::new();
        for param in &descriptor.parameters {
            if let Some(value) = supplied.get(&param.name) {
                bound.insert(param.name.clone(), value.clone());
            } else if let Some(default) = &param.default {
                bound.insert(param.name.clone(), default.clone());
            }
        }

        debug!("dispatching '{}' with {} argument(s)", name, bound.len());

        match descriptor.handler.call(&bound).await {
            Ok(value) => Ok(InvocationResult::success(value)),
            Err(e) => Ok(InvocationResult::failure(e.to_string())),
        }
    }
}
