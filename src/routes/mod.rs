use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};

use crate::{response::ApiResponse, state::AppState};

pub mod api;
pub mod auth;
pub mod clusters;
pub mod doc;
pub mod employees;
pub mod health;
pub mod orders;
pub mod params;
pub mod products;
pub mod stores;
pub mod suppliers;

// Page and API routes without bound state; it is provided at the top level.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(clusters::router())
        .merge(stores::router())
        .merge(suppliers::router())
        .merge(products::router())
        .merge(employees::router())
        .merge(orders::router())
        .nest("/api", api::router())
}

/// Full application: health, pages, API and docs, with the not-found fallback.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(create_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::failure(
        "Not Found",
        Some(serde_json::json!({ "path": uri.path() })),
        None,
    );
    (StatusCode::NOT_FOUND, Json(body))
}
