mod api;
mod auth;
mod catalog;
mod config;
mod coordinator;
mod error;
mod ratings;
mod search;
mod storage;
mod votes;

use crate::api::AppState;
use crate::auth::TokenTable;
use crate::catalog::{Product, Review};
use crate::config::AppConfig;
use crate::coordinator::{RetryPolicy, ReviewCoordinator};
use crate::storage::{CatalogSnapshot, MemoryCollection};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    info!("🚀 Starting Product Rating API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Search threshold: {}", config.search.threshold);
    info!("   - Snapshot: {:?}", config.storage.snapshot_path);
    info!("   - Server: {}", config.address());

    // Restore catalog
    let snapshot = if config.storage.snapshot_path.exists() {
        CatalogSnapshot::load(&config.storage.snapshot_path)?
    } else {
        info!("📂 No snapshot found, starting with an empty catalog");
        CatalogSnapshot::default()
    };
    let products = MemoryCollection::<Product>::from_records(snapshot.products)?;
    let reviews = MemoryCollection::<Review>::from_records(snapshot.reviews)?;

    let coordinator = ReviewCoordinator::new(Arc::new(products.clone()), Arc::new(reviews.clone()))
        .with_threshold(config.search.threshold)
        .with_retry(RetryPolicy::attempts(config.storage.conflict_retries));

    let identity = TokenTable::new(config.auth.tokens.clone());
    if identity.is_empty() {
        warn!("⚠️  No API tokens configured, authenticated routes will reject every request");
    } else {
        info!("🔑 {} API tokens loaded", identity.len());
    }

    // Create application state
    let state = AppState {
        coordinator: Arc::new(coordinator),
        identity: Arc::new(identity),
    };

    let app = api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /health                      - Health check");
    info!("   GET  /products                    - List products");
    info!("   POST /products                    - Add product");
    info!("   GET  /products/{{id}}               - Product detail");
    info!("   GET  /categories                  - Categories");
    info!("   GET  /categories/base/{{base}}      - Categories in a base category");
    info!("   GET  /base-categories             - Base categories and their dimensions");
    info!("   POST /reviews                     - Add review");
    info!("   GET  /reviews/mine                - Caller's reviews");
    info!("   POST /reviews/{{id}}/like           - Toggle like");
    info!("   POST /reviews/{{id}}/dislike        - Toggle dislike");
    info!("   GET  /search?query=               - Fuzzy search");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Save catalog on graceful shutdown
    info!("💾 Saving catalog before shutdown...");
    let snapshot = CatalogSnapshot {
        products: products.snapshot().await,
        reviews: reviews.snapshot().await,
    };
    if let Err(e) = snapshot.save(&config.storage.snapshot_path) {
        warn!("⚠️  Failed to save catalog: {:#}", e);
    }

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
