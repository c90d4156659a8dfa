//! aex-dash (Screening Dashboard) - Reconciled screening view service
//!
//! Serves the screening reconciliation pipeline as a JSON HTTP API over the
//! externally managed record store. Each request to /api/screenings runs
//! the pipeline against fresh store snapshots.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use aex_dash::rest::RestStore;
use aex_dash::{build_router, AppState};
use aex_screen::CollectionNames;

/// Command-line arguments for aex-dash
#[derive(Parser, Debug)]
#[command(name = "aex-dash")]
#[command(about = "Screening dashboard service for the AEX record store")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5830", env = "AEX_DASH_PORT")]
    port: u16,

    /// Record store base URL
    #[arg(long, env = "AEX_STORE_URL")]
    store_url: String,

    /// Record store API key
    #[arg(long, env = "AEX_STORE_KEY", hide_env_values = true)]
    store_key: String,

    /// Override the Tracker table name
    #[arg(long, env = "AEX_TRACKER_TABLE")]
    tracker_table: Option<String>,

    /// Override the Queue table name
    #[arg(long, env = "AEX_QUEUE_TABLE")]
    queue_table: Option<String>,

    /// Override the CandidateMaster table name
    #[arg(long, env = "AEX_MASTER_TABLE")]
    master_table: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting AEX Screening Dashboard (aex-dash) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let mut names = CollectionNames::default();
    if let Some(table) = args.tracker_table {
        names.tracker = table;
    }
    if let Some(table) = args.queue_table {
        names.queue = table;
    }
    if let Some(table) = args.master_table {
        names.candidate_master = table;
    }
    info!(
        "Record store: {} (tracker={}, queue={}, master={})",
        args.store_url, names.tracker, names.queue, names.candidate_master
    );

    let store = RestStore::new(&args.store_url, &args.store_key)?;
    let state = AppState::new(Arc::new(store), names);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("aex-dash listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
