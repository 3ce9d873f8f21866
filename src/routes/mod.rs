mod health;
mod products;

use axum::{
    Json, Router,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route(
            "/v1/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/v1/products/{param}",
            get(products::find_product)
                .put(products::update_product)
                .delete(products::deactivate_product),
        )
}

async fn index() -> impl IntoResponse {
    Json(json!({
        "api": "Product Catalog Management",
        "version": env!("CARGO_PKG_VERSION"),
        "health": "/health",
        "endpoints": {
            "products": "/v1/products",
        },
    }))
}
