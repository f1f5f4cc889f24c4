//! AI proxy gateway
//!
//! A forwarding gateway built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ layers (X-Accel-Buffering, trace, CORS)
//!                │
//!                ├─ GET /                    → "A proxy for AI!"
//!                ├─ POST /custom-model-proxy → forwarder (verbatim, no deadline)
//!                └─ everything else          → dispatcher
//!                                                │
//!                        match ◀─────────────────┴──────────────▶ no match
//!                          │                                        │
//!                   sanitizer (Host rewrite)                  404 Not Found
//!                          │
//!                   forwarder (deadline) ──▶ Upstream
//!                          │
//!   Client ◀──── streamed response, or 504 "Request timeout"
//! ```

use std::path::PathBuf;

use clap::Parser;

use ai_proxy::lifecycle::{self, signals, Shutdown, StartupOptions};
use ai_proxy::observability::{self, LogFormat};

#[derive(Debug, Parser)]
#[command(name = "ai-proxy", version, about = "HTTP forwarding gateway for AI model APIs")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "AI_PROXY_BIND", default_value = "0.0.0.0:3000")]
    bind: String,

    /// Directory searched for config.yaml, config.yml or config.json.
    #[arg(long, env = "AI_PROXY_CONFIG_DIR", default_value = ".")]
    config_dir: PathBuf,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    observability::init(args.log_format);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ai-proxy starting");

    let options = StartupOptions {
        bind_address: args.bind,
        config_dir: args.config_dir,
    };
    let (server, listener) = lifecycle::start(&options).await?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
