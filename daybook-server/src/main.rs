use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use daybook_server::config::ServerConfig;
use daybook_server::state::AppState;

#[derive(Parser)]
#[command(name = "daybook-server")]
#[command(about = "Serve an in-memory calendar of events over HTTP")]
struct Cli {
    /// Config file (defaults to ~/.config/daybook/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, overrides the config file
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides the config file
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ServerConfig::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let _log_guard = daybook_server::logging::init(&config)?;
    tracing::debug!(config = ?config, "Configuration loaded");

    let app = daybook_server::app(AppState::new());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Could not bind {}", addr))?;
    tracing::info!("daybook-server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
