//! Binary entry point: parse flags, load configuration, serve.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use examgen::app_state::AppState;
use examgen::config::ServerConfig;
use examgen::routes::create_router;
use examgen_core::Config;

#[derive(Parser)]
#[command(name = "examgen", about = "Rule-driven exam question generation service")]
struct Cli {
    /// Socket address to bind, overriding EXAMGEN_BIND.
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("examgen=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut server_config = ServerConfig::from_env().context("loading server configuration")?;
    if let Some(bind) = cli.bind {
        server_config.bind = bind;
    }

    let core_config = Config::from_env().context("loading provider configuration")?;

    let state = Arc::new(AppState::new(core_config));
    let router = create_router(state, &server_config);

    let listener = tokio::net::TcpListener::bind(server_config.bind)
        .await
        .with_context(|| format!("binding {}", server_config.bind))?;
    tracing::info!(bind = %server_config.bind, "examgen listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
