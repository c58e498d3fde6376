//! Slice data handler.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    response::{IntoResponse, Response},
    Json,
};
use grid_processor::extract;
use renderer::ConcentrationResponse;

use super::{error_response, run_blocking, slice_request};
use crate::metrics::RequestTimer;
use crate::state::AppState;

/// GET /get-data?t=&z= - Coordinate-tagged slice as JSON
pub async fn data_handler(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let timer = RequestTimer::start("get-data");

    let response = match slice_request(params) {
        Ok(request) => {
            let dataset = Arc::clone(&state.dataset);
            let result = run_blocking(move || {
                let slice = extract(dataset.as_ref(), &request)?;
                Ok(ConcentrationResponse::from(&slice))
            })
            .await;

            match result {
                Ok(body) => Json(body).into_response(),
                Err(e) => error_response(&e),
            }
        }
        Err(e) => error_response(&e),
    };

    timer.finish(response.status().as_u16());
    response
}
