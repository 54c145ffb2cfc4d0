use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use crate::api::handlers::{self as api_handlers, AppState};
use crate::web::handlers as web_handlers;

/// Requests are small GET queries; anything bigger is rejected.
const MAX_REQUEST_BODY_SIZE: usize = 64 * 1024;

/// Create the router with all endpoints (API + Web UI)
pub fn create_router(state: AppState) -> Router {
    // Public API routes - read-only, no authentication required
    let api_routes = Router::new()
        .route("/recommend", get(api_handlers::recommend_recipe))
        .route("/stats", get(api_handlers::get_stats))
        .with_state(state.clone());

    // Web UI routes
    let web_routes = Router::new()
        .route("/", get(web_handlers::index))
        .with_state(state.clone());

    let health_routes = Router::new().route("/health", get(api_handlers::health_check));

    Router::new()
        .merge(web_routes)
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_SIZE))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
