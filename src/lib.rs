//! Toolsmith — typed tool registry, specification synthesis, and
//! dispatch for LLM function calling.
//!
//! A fixed set of tools (math evaluation, currency conversion, web
//! search, news search, weather lookup) is declared with typed
//! parameters, advertised to an orchestrator as OpenAI-style function
//! specifications, and invoked with validated arguments.

pub mod backend;
pub mod config;
pub mod console;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod schema;
pub mod tools;
pub mod types;
