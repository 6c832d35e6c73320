//! Marquee web server - Main entry point
//!
//! Server-rendered directory of live-music venues, artists, and shows.

use anyhow::Result;
use clap::Parser;
use marquee_common::config::resolve_database_path;
use marquee_common::db::init_database;
use marquee_web::{build_router, AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for marquee-web
#[derive(Parser, Debug)]
#[command(name = "marquee-web")]
#[command(about = "Listings and booking directory for live-music venues, artists, and shows")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5730", env = "MARQUEE_PORT")]
    port: u16,

    /// Path to the SQLite database file (falls back to MARQUEE_DATABASE,
    /// the config file, then the platform data directory)
    #[arg(short, long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_web=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Marquee (marquee-web) v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let db_path = resolve_database_path(args.database.as_deref())?;
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path).await?;

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("marquee-web listening on http://127.0.0.1:{}", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
