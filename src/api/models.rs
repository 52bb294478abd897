use crate::auth::IdentityProvider;
use crate::catalog::{BaseCategory, Category, Dimension, Product, Review};
use crate::coordinator::{ProductDetail, ReviewCoordinator, SearchMatches};
use crate::error::CoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<ReviewCoordinator>,
    pub identity: Arc<dyn IdentityProvider>,
}

/// Query string of the search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

/// Response from search endpoint
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

impl From<SearchMatches> for SearchResponse {
    fn from(matches: SearchMatches) -> Self {
        Self {
            products: matches.products,
            categories: matches.categories,
        }
    }
}

/// Product with its reviews
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    pub product: Product,
    pub reviews: Vec<Review>,
    pub average_rating: f64,
}

impl From<ProductDetail> for ProductDetailResponse {
    fn from(detail: ProductDetail) -> Self {
        Self {
            product: detail.product,
            reviews: detail.reviews,
            average_rating: detail.average_rating,
        }
    }
}

/// A base category and the dimensions reviewers score in it
#[derive(Debug, Serialize)]
pub struct BaseCategoryInfo {
    pub name: &'static str,
    pub dimensions: Vec<Dimension>,
}

impl From<BaseCategory> for BaseCategoryInfo {
    fn from(base: BaseCategory) -> Self {
        Self {
            name: base.name(),
            dimensions: base.dimensions().to_vec(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub total_products: usize,
    pub total_reviews: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => AppError::BadRequest(msg),
            CoreError::Authorization(msg) => AppError::Unauthorized(msg),
            CoreError::NotFound(msg) => AppError::NotFound(msg),
            CoreError::Conflict(msg) => AppError::Conflict(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => {
                warn!("Write conflict: {}", msg);
                (StatusCode::CONFLICT, msg)
            }
        };

        (status, Json(ErrorResponse {
            error: status.to_string(),
            message,
        }))
        .into_response()
    }
}
