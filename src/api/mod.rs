pub mod extract;
pub mod models;
pub mod product;
pub mod review;
pub mod search;


// Re-exports
pub use models::*;

use axum::{extract::State, routing::get, Json, Router};

// Health handler (simple, keep here)
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let (total_products, total_reviews) = state.coordinator.counts().await?;
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        total_products,
        total_reviews,
    }))
}

/// All routes, bound to `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(product::routes())
        .merge(review::routes())
        .merge(search::routes())
        .with_state(state)
}
