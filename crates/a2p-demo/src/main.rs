//! Cross-agent memory exchange demo entry point.
//!
//! Binary name: `a2p-demo`
//!
//! Parses flags and environment, initializes tracing, then runs the
//! six-step orchestration against either the live profile service or
//! the in-memory simulation.

mod agents;
mod orchestrator;
mod render;
mod responder;

use std::sync::Arc;

use clap::Parser;

use a2p_client::{HttpProfileStore, InMemoryProfileStore};
use a2p_types::config::ExchangeConfig;

use orchestrator::Checkpoint;

/// Three agents, one profile: a consent-based memory exchange demo.
#[derive(Parser)]
#[command(name = "a2p-demo", version, about)]
struct Args {
    /// Profile service connection token.
    #[arg(long, env = "A2P_CONNECTION_TOKEN", hide_env_values = true)]
    connection_token: Option<String>,

    /// Profile service base URL.
    #[arg(long, env = "A2P_API_URL")]
    api_url: Option<String>,

    /// Anthropic API key for real model responses.
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    anthropic_api_key: Option<String>,

    /// Run against the in-memory store with auto-approved checkpoints.
    #[arg(long, env = "A2P_DEMO_MODE")]
    demo: bool,

    /// Emit JSON log lines instead of the human format.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    a2p_observe::tracing_setup::init_tracing(args.json_logs)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let config = match ExchangeConfig::new(
        args.connection_token,
        args.api_url,
        args.anthropic_api_key,
    ) {
        Ok(config) => config,
        Err(e) => {
            render::error(&e.to_string());
            render::info("Then: export A2P_CONNECTION_TOKEN=a2p_conn_xxx");
            std::process::exit(1);
        }
    };

    if args.demo {
        let store = Arc::new(InMemoryProfileStore::new());
        orchestrator::run(
            store.clone(),
            &config,
            Checkpoint::AutoApprove(store),
        )
        .await
    } else {
        let store = Arc::new(HttpProfileStore::new(
            config.connection_token.clone(),
            config.api_url.clone(),
        ));
        orchestrator::run(store, &config, Checkpoint::Dashboard).await
    }
}
