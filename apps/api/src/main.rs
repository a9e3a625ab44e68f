mod config;
mod errors;
mod puzzle;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::puzzle::{BuildLimits, PuzzleBuilder, RandomIdGenerator, SystemClock};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Picross API v{}", env!("CARGO_PKG_VERSION"));

    // Real clock and random ids in production; tests inject fixed ones.
    let limits = BuildLimits {
        max_phrase_chars: config.max_phrase_chars,
        max_cols: config.max_cols,
    };
    let builder = PuzzleBuilder::new(Arc::new(SystemClock), Arc::new(RandomIdGenerator), limits);
    info!(
        "Puzzle builder: default widths {}..={}, max cols {}, max phrase {} chars",
        config.default_min_width, config.default_max_width, limits.max_cols, limits.max_phrase_chars
    );

    let state = AppState {
        config: config.clone(),
        builder,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the game client domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
