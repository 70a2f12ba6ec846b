//! Error taxonomy for the registry, dispatcher, synthesizer, and
//! tool adapters.
//!
//! Registry and validation errors surface as typed `Err` values so
//! automated callers can branch on kind. Adapter errors never reach
//! the orchestrator directly: the dispatcher converts them into
//! `InvocationResult` failures.

use crate::types::ParamType;
use thiserror::Error;

/// Errors raised by [`crate::registry::ToolRegistry`].
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("duplicate tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("registry is sealed; no further registrations are accepted")]
    Sealed,

    #[error("invalid descriptor for tool '{tool}': {reason}")]
    InvalidDescriptor { tool: String, reason: String },
}

/// Argument validation errors raised by [`crate::dispatch::Dispatcher`]
/// before any tool code runs.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("tool '{tool}' is missing required argument '{argument}'")]
    MissingArgument { tool: String, argument: String },

    #[error("tool '{tool}' argument '{argument}' expects {expected}, got {actual}")]
    TypeMismatch {
        tool: String,
        argument: String,
        expected: ParamType,
        actual: &'static str,
    },

    #[error("tool '{tool}' does not accept argument '{argument}'")]
    UnexpectedArgument { tool: String, argument: String },
}

/// Errors from the legacy backend-driven specification synthesis.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to parse specification for tool '{tool}': {reason}")]
    SpecificationParse { tool: String, reason: String },

    #[error("backend completion failed for tool '{tool}': {source}")]
    Backend {
        tool: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Failures inside a tool adapter. The dispatcher converts these into
/// `InvocationResult` failure messages.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("missing credential: {0}")]
    Configuration(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("upstream service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("target currency '{0}' not available in the exchange rates")]
    UnknownCurrency(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unparseable upstream payload: {0}")]
    Json(#[from] serde_json::Error),
}
