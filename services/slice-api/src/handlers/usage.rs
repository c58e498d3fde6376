//! Plain-text usage page.

use std::sync::Arc;

use axum::{extract::Extension, response::Response};

use super::ok_response;
use crate::metrics::RequestTimer;
use crate::state::AppState;

/// Usage text listing the available routes.
pub fn usage_text(enable_image_route: bool) -> String {
    let mut text = String::from(
        "Slice API\n\
         \n\
         GET /get-info              dataset dimensions and variables as JSON\n\
         GET /get-data?t=<t>&z=<z>  concentration slice at (t, z) as JSON\n",
    );
    if enable_image_route {
        text.push_str("GET /get-image?t=<t>&z=<z> concentration slice at (t, z) as grayscale PNG\n");
    }
    text.push_str(
        "GET /health                liveness check\n\
         GET /metrics               Prometheus metrics\n\
         \n\
         t and z are zero-based indices into the time and z dimensions.\n",
    );
    text
}

/// GET / - Usage
pub async fn usage_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let timer = RequestTimer::start("usage");
    let response = ok_response(
        "text/plain; charset=utf-8",
        usage_text(state.config.enable_image_route),
    );
    timer.finish(response.status().as_u16());
    response
}
