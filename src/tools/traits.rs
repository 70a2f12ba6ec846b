//! Tool handler trait — the callable side of a descriptor.

use crate::error::AdapterError;
use crate::types::ToolValue;
use async_trait::async_trait;

/// Trait implemented by every tool adapter.
///
/// The dispatcher validates and binds arguments (including defaults)
/// before calling, so `args` always contains every declared parameter
/// with a value of its declared type.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with fully-bound arguments.
    async fn call(
        &self,
        args: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ToolValue, AdapterError>;
}
