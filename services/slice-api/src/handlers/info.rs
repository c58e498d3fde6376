//! Dataset metadata handler.

use std::sync::Arc;

use axum::{
    extract::Extension,
    response::{IntoResponse, Response},
    Json,
};
use grid_common::GridError;

use super::{error_response, run_blocking};
use crate::metrics::RequestTimer;
use crate::state::AppState;

/// GET /get-info - Dimensions and variables of the dataset
pub async fn info_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let timer = RequestTimer::start("get-info");
    let dataset = Arc::clone(&state.dataset);

    let response = match run_blocking(move || dataset.info().map_err(GridError::from)).await {
        Ok(info) => Json(info).into_response(),
        Err(e) => error_response(&e),
    };

    timer.finish(response.status().as_u16());
    response
}
