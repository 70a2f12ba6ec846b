//! Tool registry: an ordered, sealable mapping from tool name to
//! descriptor, used both for specification generation and dispatch.

use crate::error::RegistryError;
use crate::tools::ToolHandler;
use crate::types::ParamType;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// A single declared parameter of a tool.
///
/// Invariant, enforced at registration: a required parameter carries
/// no default, and an optional parameter always carries one.
#[derive(Debug, Clone)]
pub struct ToolParameter {
    pub name: String,
    pub param_type: ParamType,
    pub description: String,
    pub required: bool,
    pub default: Option<serde_json::Value>,
}

impl ToolParameter {
    pub fn required(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
            required: true,
            default: None,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
        default: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
            required: false,
            default: Some(default),
        }
    }
}

/// Authoritative metadata and implementation reference for one tool.
///
/// Constructed once at startup, immutable thereafter.
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
    pub handler: Arc<dyn ToolHandler>,
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Insertion-ordered registry of tool descriptors. Read-only once
/// sealed; a sealed registry is safe to share across threads.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    order: Vec<Arc<ToolDescriptor>>,
    index: HashMap<String, usize>,
    sealed: bool,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor. Fails if the registry is sealed, the
    /// name is already taken, or the descriptor is malformed.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), RegistryError> {
        if self.sealed {
            return Err(RegistryError::Sealed);
        }
        validate_descriptor(&descriptor)?;
        if self.index.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateTool(descriptor.name));
        }

        self.index.insert(descriptor.name.clone(), self.order.len());
        self.order.push(Arc::new(descriptor));
        Ok(())
    }

    /// Freeze the registry. Idempotent.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Look a descriptor up by name.
    pub fn get(&self, name: &str) -> Result<Arc<ToolDescriptor>, RegistryError> {
        self.index
            .get(name)
            .map(|&i| self.order[i].clone())
            .ok_or_else(|| RegistryError::UnknownTool(name.to_string()))
    }

    /// Descriptors in registration order.
    pub fn list(&self) -> impl Iterator<Item = &Arc<ToolDescriptor>> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn validate_descriptor(descriptor: &ToolDescriptor) -> Result<(), RegistryError> {
    let invalid = |reason: String| RegistryError::InvalidDescriptor {
        tool: descriptor.name.clone(),
        reason,
    };

    if descriptor.name.trim().is_empty() {
        return Err(invalid("tool name must not be empty".into()));
    }

    let mut seen = std::collections::HashSet::new();
    for param in &descriptor.parameters {
        if !seen.insert(param.name.as_str()) {
            return Err(invalid(format!("duplicate parameter '{}'", param.name)));
        }
        if param.required && param.default.is_some() {
            return Err(invalid(format!(
                "required parameter '{}' must not carry a default",
                param.name
            )));
        }
        if !param.required && param.default.is_none() {
            return Err(invalid(format!(
                "optional parameter '{}' must declare a default",
                param.name
            )));
        }
        if let Some(default) = &param.default {
            if !param.param_type.accepts(default) {
                return Err(invalid(format!(
                    "default for parameter '{}' is not a {}",
                    param.name, param.param_type
                )));
            }
        }
    }

    Ok(())
}
