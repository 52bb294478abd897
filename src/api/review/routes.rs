use crate::api::models::AppState;
use crate::api::review::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(add_review_handler))
        .route("/reviews/mine", get(my_reviews_handler))
        .route("/reviews/{id}/like", post(like_review_handler))
        .route("/reviews/{id}/dislike", post(dislike_review_handler))
}
