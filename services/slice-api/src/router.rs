//! Route table.

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Build the application router.
///
/// `/get-image` is only registered when `enable_image_route` is set.
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::usage::usage_handler))
        .route("/get-info", get(handlers::info::info_handler))
        .route("/get-data", get(handlers::data::data_handler));

    if state.config.enable_image_route {
        app = app.route("/get-image", get(handlers::image::image_handler));
    }

    app
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
