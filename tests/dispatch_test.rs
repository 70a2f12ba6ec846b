//! End-to-end dispatch and synthesis over the built-in registry.
//!
//! Network-backed tools are only exercised up to their pre-flight
//! validation; nothing here performs I/O.

use serde_json::json;
use std::sync::Arc;
use toolsmith::config::ToolsmithConfig;
use toolsmith::dispatch::Dispatcher;
use toolsmith::error::DispatchError;
use toolsmith::schema;
use toolsmith::tools;
use toolsmith::types::{InvocationResult, ParamType, ToolValue};

/// Config with inline credentials so no test depends on the process
/// environment, and an unroutable endpoint so accidental network I/O
/// fails loudly.
fn test_config() -> ToolsmithConfig {
    let mut config = ToolsmithConfig::default();
    config.weather.api_key = Some("test-key".into());
    config.weather.api_url = "http://127.0.0.1:9/current.json".into();
    config.search.api_key = Some("test-key".into());
    config.search.api_url = "http://127.0.0.1:9".into();
    config.currency.api_url = "http://127.0.0.1:9".into();
    config
}

fn dispatcher() -> Dispatcher {
    let registry = tools::builtin_registry(&test_config()).unwrap();
    Dispatcher::new(Arc::new(registry))
}

fn dummy_value(param_type: ParamType) -> serde_json::Value {
    match param_type {
        ParamType::String => json!("placeholder"),
        ParamType::Integer => json!(1),
        ParamType::Number => json!(1.0),
        ParamType::Boolean => json!(true),
    }
}

#[tokio::test]
async fn calculate_evaluates_real_expressions() {
    let result = dispatcher()
        .invoke("calculate", &json!({"expression": "sqrt(3)*exp(4)+5"}))
        .await
        .unwrap();

    let expected = 3f64.sqrt() * 4f64.exp() + 5.0;
    match result {
        InvocationResult::Success {
            value: ToolValue::Number(n),
        } => assert!((n - expected).abs() < 1e-9),
        other => panic!("expected a numeric success, got {:?}", other),
    }
}

#[tokio::test]
async fn calculate_reports_nan_sentinel_as_success() {
    let result = dispatcher()
        .invoke("calculate", &json!({"expression": "not_a_valid_expr((("}))
        .await
        .unwrap();

    match result {
        InvocationResult::Success {
            value: ToolValue::Text(text),
        } => assert_eq!(text, "NaN"),
        other => panic!("expected the NaN sentinel as a success, got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_tool_fails_without_invoking_anything() {
    let err = dispatcher()
        .invoke("no_such_tool", &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::UnknownTool(name) if name == "no_such_tool"));
}

#[tokio::test]
async fn empty_weather_location_fails_before_any_network_call() {
    // The endpoint is unroutable; a failure message about the
    // location (not the connection) proves validation ran first.
    let result = dispatcher()
        .invoke("get_weather", &json!({"location": ""}))
        .await
        .unwrap();

    match result {
        InvocationResult::Failure { message } => {
            assert!(message.contains("location"), "unexpected message: {message}");
        }
        other => panic!("expected a failure result, got {:?}", other),
    }
}

#[tokio::test]
async fn every_required_parameter_is_enforced_independently() {
    let config = test_config();
    let registry = Arc::new(tools::builtin_registry(&config).unwrap());
    let dispatcher = Dispatcher::new(registry.clone());

    for descriptor in registry.list() {
        let required: Vec<_> = descriptor.parameters.iter().filter(|p| p.required).collect();
        for omitted in &required {
            let mut args = serde_json::Map::new();
            for other in &required {
                if other.name != omitted.name {
                    args.insert(other.name.clone(), dummy_value(other.param_type));
                }
            }

            let err = dispatcher
                .invoke(&descriptor.name, &serde_json::Value::Object(args))
                .await
                .unwrap_err();
            match err {
                DispatchError::MissingArgument { tool, argument } => {
                    assert_eq!(tool, descriptor.name);
                    assert_eq!(argument, omitted.name);
                }
                other => panic!(
                    "expected MissingArgument for '{}.{}', got {:?}",
                    descriptor.name, omitted.name, other
                ),
            }
        }
    }
}

#[tokio::test]
async fn extra_arguments_are_rejected_strictly() {
    let err = dispatcher()
        .invoke(
            "calculate",
            &json!({"expression": "1+1", "verbosity": "high"}),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::UnexpectedArgument { argument, .. } if argument == "verbosity"
    ));
}

#[test]
fn synthesized_specifications_cover_every_tool_deterministically() {
    let registry = tools::builtin_registry(&test_config()).unwrap();

    let first = schema::synthesize_all(&registry);
    let second = schema::synthesize_all(&registry);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    assert_eq!(first.len(), registry.len());
    for (spec, descriptor) in first.iter().zip(registry.list()) {
        assert_eq!(spec.r#type, "function");
        assert_eq!(spec.function.name, descriptor.name);

        let from_spec: std::collections::HashSet<_> =
            spec.function.parameters.required.iter().cloned().collect();
        let from_descriptor: std::collections::HashSet<_> = descriptor
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(from_spec, from_descriptor, "tool {}", descriptor.name);

        for param in &descriptor.parameters {
            let property = &spec.function.parameters.properties[&param.name];
            assert_eq!(property.r#type, param.param_type.as_str());
        }
    }
}
