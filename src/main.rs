//! Bridge entry point.
//!
//! Sets up stderr logging, loads configuration and serves MCP on stdio until
//! the host closes the pipe.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use music_perception_bridge::core::{Config, McpServer, StdioTransport};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging comes first so configuration warnings are not lost.
    dotenvy::dotenv().ok();
    init_logging(&std::env::var("MCP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

    let config = Config::from_env();
    info!(
        "Starting {} v{} (profile: {}, analysis: {})",
        config.server.name, config.server.version, config.profile, config.analysis.space_url
    );

    serve(config).await?;

    info!("Server shutting down");
    Ok(())
}

async fn serve(config: Config) -> music_perception_bridge::Result<()> {
    config.validate()?;

    let server = McpServer::new(config)?;
    info!("Tools: {}", server.registry().tool_names().join(", "));

    StdioTransport::run(server).await?;
    Ok(())
}

/// Log to stderr; stdout belongs to the protocol.
///
/// `RUST_LOG` overrides `MCP_LOG_LEVEL` when set.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}
