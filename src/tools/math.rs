//! Mathematical expression evaluation.
//!
//! An expression that does not evaluate to a real number is not an
//! error: the tool reports the sentinel `"NaN"` as a successful
//! result, and callers must distinguish that from invocation failure.

use crate::error::AdapterError;
use crate::registry::{ToolDescriptor, ToolParameter};
use crate::tools::ToolHandler;
use crate::types::{ParamType, ToolValue};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Sentinel marking "evaluated, but no numeric result".
pub const NAN_SENTINEL: &str = "NaN";

pub struct Calculate;

impl Calculate {
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor {
            name: "calculate".into(),
            description: "Evaluates a mathematical expression and returns the result as a number."
                .into(),
            parameters: vec![ToolParameter::required(
                "expression",
                ParamType::String,
                "A string representing a mathematical expression.",
            )],
            handler: Arc::new(Self),
        }
    }
}

#[async_trait]
impl ToolHandler for Calculate {
    async fn call(
        &self,
        args: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ToolValue, AdapterError> {
        let expression = args
            .get("expression")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AdapterError::InvalidInput("missing 'expression' argument".into()))?;

        match meval::eval_str(expression) {
            Ok(value) if value.is_finite() => Ok(ToolValue::Number(value)),
            Ok(_) => Ok(ToolValue::Text(NAN_SENTINEL.into())),
            Err(e) => {
                debug!("expression '{}' did not evaluate: {}", expression, e);
                Ok(ToolValue::Text(NAN_SENTINEL.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn eval(expression: &str) -> ToolValue {
        let mut args = serde_json::Map::new();
        args.insert("expression".into(), json!(expression));
        Calculate.call(&args).await.unwrap()
    }

    #[tokio::test]
    async fn evaluates_real_expressions() {
        let expected = 3f64.sqrt() * 4f64.exp() + 5.0;
        match eval("sqrt(3)*exp(4)+5").await {
            ToolValue::Number(n) => assert!((n - expected).abs() < 1e-9),
            other => panic!("expected a number, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unparseable_expression_yields_sentinel() {
        assert_eq!(
            eval("not_a_valid_expr(((").await,
            ToolValue::Text(NAN_SENTINEL.into())
        );
    }

    #[tokio::test]
    async fn division_by_zero_yields_sentinel() {
        assert_eq!(eval("1/0").await, ToolValue::Text(NAN_SENTINEL.into()));
    }
}
