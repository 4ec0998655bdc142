//! HTTP router construction.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api;
use crate::state::AppState;

/// Build the application router. Both `/items` and `/items/` are served.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .route("/items", get(api::list_items).post(api::create_item))
        .route("/items/", get(api::list_items).post(api::create_item))
        .route("/items/{id}", get(api::get_item).delete(api::delete_item))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
