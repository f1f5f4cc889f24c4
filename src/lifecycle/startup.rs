//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration (missing or broken config means no routes)
//! - Compile the route table before anything listens
//! - Bind the listener last, so traffic arrives only when ready

use std::path::PathBuf;

use tokio::net::TcpListener;

use crate::config::loader::load_or_default;
use crate::http::HttpServer;

/// Inputs that come from the command line rather than the config file.
#[derive(Debug, Clone)]
pub struct StartupOptions {
    pub bind_address: String,
    pub config_dir: PathBuf,
}

/// Load config, build the server and bind its listener.
///
/// Only binding can fail; configuration problems are logged and degrade to
/// an empty route table.
pub async fn start(options: &StartupOptions) -> Result<(HttpServer, TcpListener), std::io::Error> {
    let config = load_or_default(&options.config_dir);

    tracing::info!(
        routes = config.proxies.len(),
        upstream_timeout_ms = config.upstream_timeout_ms,
        "Configuration ready"
    );

    let server = HttpServer::new(config);

    let listener = TcpListener::bind(options.bind_address.as_str()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    Ok((server, listener))
}
