//! toolsmith — typed tool registry and dispatcher for LLM function calling.
//!
//! Usage:
//!   toolsmith list                         List registered tools
//!   toolsmith spec [--legacy]              Print tool specifications as JSON
//!   toolsmith invoke <tool> --args <json>  Invoke a tool with JSON arguments
//!   toolsmith transcript                   Color an agent transcript from stdin

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use toolsmith::backend::CompletionClient;
use toolsmith::config;
use toolsmith::console;
use toolsmith::dispatch::Dispatcher;
use toolsmith::schema;
use toolsmith::tools;
use toolsmith::types::InvocationResult;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "toolsmith")]
#[command(version = "0.1.0")]
#[command(about = "Typed tool registry and dispatcher for LLM function calling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the toolsmith config file.
    #[arg(long, default_value = "~/.toolsmith/toolsmith.toml")]
    config: String,

    /// Log level (debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered tools and their parameters.
    List,

    /// Print tool specifications as JSON.
    Spec {
        /// Derive specifications by round-tripping through the
        /// text-generation backend instead of deterministically.
        #[arg(long)]
        legacy: bool,
    },

    /// Invoke a tool with JSON arguments.
    Invoke {
        /// Tool name.
        tool: String,

        /// Arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Read a transcript from stdin and print it with label colors.
    Transcript,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config_path = PathBuf::from(shellexpand::tilde(&cli.config).into_owned());
    let config = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    match cli.command {
        Commands::List => cmd_list(&config),
        Commands::Spec { legacy } => cmd_spec(&config, legacy).await,
        Commands::Invoke { tool, args } => cmd_invoke(&config, &tool, &args).await,
        Commands::Transcript => cmd_transcript(),
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

fn cmd_list(config: &config::ToolsmithConfig) -> Result<()> {
    let registry = tools::builtin_registry(config)?;

    for descriptor in registry.list() {
        println!(
            "{}  {}",
            descriptor.name.green().bold(),
            descriptor.description
        );
        for param in &descriptor.parameters {
            let requirement = if param.required {
                "required".yellow().to_string()
            } else {
                format!("default: {}", param.default.as_ref().unwrap_or(&serde_json::Value::Null))
                    .dimmed()
                    .to_string()
            };
            println!(
                "    {} ({}, {})  {}",
                param.name.bold(),
                param.param_type,
                requirement,
                param.description.dimmed()
            );
        }
    }

    Ok(())
}

async fn cmd_spec(config: &config::ToolsmithConfig, legacy: bool) -> Result<()> {
    let registry = tools::builtin_registry(config)?;

    let specs = if legacy {
        let api_key = config.backend.resolved_key().with_context(|| {
            format!(
                "backend API key not set; export {} or set [backend] api_key",
                config.backend.api_key_env
            )
        })?;
        let http = tools::default_http_client(config)?;
        let backend = CompletionClient::new(&config.backend, &api_key, http);
        schema::synthesize_all_via_backend(&registry, &backend).await
    } else {
        schema::synthesize_all(&registry)
    };

    println!("{}", serde_json::to_string_pretty(&specs)?);
    Ok(())
}

async fn cmd_invoke(config: &config::ToolsmithConfig, tool: &str, args: &str) -> Result<()> {
    let arguments: serde_json::Value =
        serde_json::from_str(args).context("Failed to parse --args as JSON")?;
    if !arguments.is_object() {
        bail!("--args must be a JSON object");
    }

    let registry = Arc::new(tools::builtin_registry(config)?);
    let dispatcher = Dispatcher::new(registry);

    match dispatcher.invoke(tool, &arguments).await? {
        InvocationResult::Success { value } => {
            println!("{} {}", "ok:".green().bold(), value);
        }
        InvocationResult::Failure { message } => {
            println!("{} {}", "error:".red().bold(), message);
        }
    }

    Ok(())
}

fn cmd_transcript() -> Result<()> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read transcript from stdin")?;
    console::print_transcript(&input);
    Ok(())
}
