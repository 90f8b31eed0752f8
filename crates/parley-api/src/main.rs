//! Parley REST API entry point.
//!
//! Binary name: `parley`
//!
//! Parses CLI arguments, wires the relay, and serves the HTTP API until
//! Ctrl+C or SIGTERM.

mod http;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use parley_core::relay::catalog;
use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "parley", about = "Minimal web chat relay for OpenAI-compatible APIs")]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1", env = "PARLEY_HOST")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000, env = "PARLEY_PORT")]
    port: u16,

    /// Model used when a chat request names none.
    #[arg(long, default_value = catalog::DEFAULT_MODEL, env = "PARLEY_MODEL")]
    model: String,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,parley=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let state = AppState::init(&cli.model);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %format!("http://{addr}"), model = %cli.model, "parley listening");

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
