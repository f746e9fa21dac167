//! symdash-di (Debug Images) - Crash-event debug-image dashboard
//!
//! Serves a web UI over the debug images of a crash event: candidate
//! resolution status, reconciliation against the upstream symbol store,
//! search and faceted filtering.
//!
//! [REQ-DI-NF-010]: Zero-config startup
//! [REQ-DI-NF-040]: Health endpoint
//! [REQ-DI-NF-050]: Default port 5731

use anyhow::Result;
use clap::Parser;
use tracing::info;

use symdash_common::config::ServiceConfig;
use symdash_di::client::SymbolStoreClient;
use symdash_di::{build_router, AppState};

/// Command-line arguments (highest-priority configuration tier)
#[derive(Debug, Parser)]
#[command(name = "symdash-di", about = "SYMDASH Debug Images dashboard")]
struct Args {
    /// Listen port (overrides SYMDASH_PORT and the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Upstream symbol-store API base URL
    #[arg(long)]
    upstream_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification IMMEDIATELY after tracing init
    info!(
        "Starting SYMDASH Debug Images (symdash-di) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // [REQ-DI-NF-010]: Zero-config startup with 4-tier resolution
    let config = ServiceConfig::resolve(args.port, args.upstream_url.as_deref())?;
    info!("Upstream symbol store: {}", config.upstream_url);

    let store = SymbolStoreClient::new(&config.upstream_url)?;
    let state = AppState::new(store);
    let app = build_router(state);

    // [REQ-DI-NF-050]: Start server
    let listener =
        tokio::net::TcpListener::bind(("127.0.0.1", config.listen_port)).await?;
    info!("symdash-di listening on http://127.0.0.1:{}", config.listen_port);
    info!(
        "Health check: http://127.0.0.1:{}/health",
        config.listen_port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
