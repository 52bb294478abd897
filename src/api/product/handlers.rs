use crate::api::models::*;
use crate::auth::Caller;
use crate::catalog::{BaseCategory, Category, NewProduct, Product};
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

pub async fn add_product_handler(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<NewProduct>,
) -> Result<Json<Product>, AppError> {
    info!(user_id = %caller.user_id, name = %request.name, "Adding product");

    let product = state.coordinator.submit_product(request).await?;

    Ok(Json(product))
}

pub async fn list_products_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.coordinator.list_products().await?;
    Ok(Json(products))
}

pub async fn product_detail_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductDetailResponse>, AppError> {
    info!(%product_id, "Fetching product detail");

    let detail = state.coordinator.product_detail(&product_id).await?;

    Ok(Json(detail.into()))
}

pub async fn categories_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = state.coordinator.categories().await?;
    Ok(Json(categories))
}

pub async fn categories_by_base_handler(
    State(state): State<AppState>,
    Path(base_category): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let names = state.coordinator.categories_by_base(&base_category).await?;
    Ok(Json(names))
}

pub async fn base_categories_handler() -> Json<Vec<BaseCategoryInfo>> {
    Json(BaseCategory::ALL.into_iter().map(BaseCategoryInfo::from).collect())
}
