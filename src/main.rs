//! Text utilities MCP server.
//!
//! Usage:
//!   cargo run
//!   PORT=9000 cargo run
//!   MESSAGE_ENDPOINT=/mcp/message cargo run
//!
//! Ctrl-C to stop.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use text_utilities_mcp::{server, ServerConfig, ToolRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let registry = Arc::new(ToolRegistry::text_tools());
    info!(
        tools = ?registry.tool_names(),
        port = config.port,
        "starting text utilities MCP server"
    );

    let ct = server::serve(&config, registry).await?;
    info!("health check: http://localhost:{}/health", config.port);
    info!("SSE endpoint: http://localhost:{}{}", config.port, server::SSE_PATH);

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    ct.cancel();
    Ok(())
}
