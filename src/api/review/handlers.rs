use crate::api::models::*;
use crate::auth::Caller;
use crate::catalog::{NewReview, Review};
use crate::votes::Axis;
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

pub async fn add_review_handler(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<NewReview>,
) -> Result<Json<Review>, AppError> {
    info!(product_id = %request.product_id, user_id = %caller.user_id, "Adding review");

    let review = state.coordinator.submit_review(&caller, request).await?;

    info!(review_id = %review.id, "Review added");
    Ok(Json(review))
}

pub async fn like_review_handler(
    state: State<AppState>,
    caller: Caller,
    review_id: Path<String>,
) -> Result<Json<Review>, AppError> {
    toggle_vote(state, caller, review_id, Axis::Like).await
}

pub async fn dislike_review_handler(
    state: State<AppState>,
    caller: Caller,
    review_id: Path<String>,
) -> Result<Json<Review>, AppError> {
    toggle_vote(state, caller, review_id, Axis::Dislike).await
}

async fn toggle_vote(
    State(state): State<AppState>,
    caller: Caller,
    Path(review_id): Path<String>,
    axis: Axis,
) -> Result<Json<Review>, AppError> {
    info!(%review_id, user_id = %caller.user_id, axis = axis.as_str(), "Toggling vote");

    let review = state.coordinator.vote(&caller, &review_id, axis).await?;

    Ok(Json(review))
}

pub async fn my_reviews_handler(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = state.coordinator.reviews_by_user(&caller.user_id).await?;
    Ok(Json(reviews))
}
