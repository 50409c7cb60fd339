//! notekeeper - per-user note keeping over a conversational dialog
//!
//! A Rust backend implementing a dialog state machine for storing, listing
//! and deleting short named notes.

mod api;
mod config;
mod db;
mod i18n;
mod pagination;
mod runtime;
mod state_machine;

use api::{create_router, AppState};
use config::Config;
use db::Database;
use i18n::{Catalog, Translator};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| {
                    tracing_subscriber::EnvFilter::try_new(format!(
                        "notekeeper={},tower_http=info",
                        config.log_level
                    ))
                })
                .unwrap_or_else(|_| "notekeeper=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Ensure database directory exists
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!(path = %config.db_path.display(), "Opening database");
    let db = Database::open(&config.db_path)?;

    let translator: Arc<dyn Translator> = match &config.locale_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading locale overrides");
            Arc::new(Catalog::from_file(path)?)
        }
        None => Arc::new(Catalog::english()),
    };

    if config.allowed_users.is_empty() {
        tracing::warn!("ALLOWED_USERS is empty, every user will be rejected");
    }

    let state = AppState::new(
        db,
        translator,
        config.capacity(),
        config.allowed_users.clone(),
    );
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::warn!(capacity = config.capacity(), "Notekeeper started on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::warn!("Notekeeper stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
