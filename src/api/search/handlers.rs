use crate::api::models::*;
use axum::{
    extract::{Query, State},
    Json,
};
use tracing::info;

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    info!(query = %params.query, "Searching");

    let matches = state.coordinator.search(&params.query).await?;

    Ok(Json(matches.into()))
}
