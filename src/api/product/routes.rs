use crate::api::models::AppState;
use crate::api::product::handlers::*;
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products_handler).post(add_product_handler))
        .route("/products/{id}", get(product_detail_handler))
        .route("/categories", get(categories_handler))
        .route("/categories/base/{base_category}", get(categories_by_base_handler))
        .route("/base-categories", get(base_categories_handler))
}
