//! Perplexity relay server.
//!
//! Serves `GET /status` and `POST /search`, forwarding questions to the
//! Perplexity chat-completions API with the key from `PERPLEXITY_API_KEY`.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use perplexity_async::{Client, Config, PerplexityConfig};
use perplexity_relay::{AppState, app};

#[derive(Parser)]
#[command(name = "perplexity-relay")]
#[command(about = "HTTP relay that answers questions through the Perplexity API")]
#[command(version)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "PERPLEXITY_RELAY_BIND", default_value = "127.0.0.1:3001")]
    bind: SocketAddr,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    let config = PerplexityConfig::new();
    if config.is_configured() {
        tracing::info!(api_base = config.api_base(), "Perplexity API key configured");
    } else {
        tracing::warn!("PERPLEXITY_API_KEY is not set; /search will answer 400 until it is");
    }

    let service = app(AppState::new(Client::with_config(config)));

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    tracing::info!(addr = %cli.bind, "Perplexity relay listening");

    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
