//! Slice image handler.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    response::Response,
};
use grid_processor::extract;
use renderer::render_png;

use super::{error_response, ok_response, run_blocking, slice_request};
use crate::metrics::RequestTimer;
use crate::state::AppState;

/// GET /get-image?t=&z= - Slice as an 8-bit grayscale PNG
pub async fn image_handler(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let timer = RequestTimer::start("get-image");

    let response = match slice_request(params) {
        Ok(request) => {
            let dataset = Arc::clone(&state.dataset);
            let result = run_blocking(move || {
                let slice = extract(dataset.as_ref(), &request)?;
                render_png(&slice)
            })
            .await;

            match result {
                Ok(png) => ok_response("image/png", png),
                Err(e) => error_response(&e),
            }
        }
        Err(e) => error_response(&e),
    };

    timer.finish(response.status().as_u16());
    response
}
