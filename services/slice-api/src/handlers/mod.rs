//! HTTP request handlers.

pub mod data;
pub mod health;
pub mod image;
pub mod info;
pub mod usage;

use axum::{
    extract::{rejection::QueryRejection, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use grid_common::{parse_index, GridError, GridResult, SliceRequest};
use serde::Serialize;

/// Raw query pairs of a slice request, in the order they appeared.
///
/// Kept as pairs rather than a struct so that a repeated key is reported as
/// an invalid value of that key instead of a whole-query rejection.
#[derive(Debug, Default)]
pub struct SliceQueryParams {
    pairs: Vec<(String, String)>,
}

impl SliceQueryParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// The single value of `name`, `None` when absent.
    fn single(&self, name: &str) -> GridResult<Option<&str>> {
        let mut values = self
            .pairs
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str());
        let first = values.next();
        if values.next().is_some() {
            return Err(GridError::invalid_parameter(name));
        }
        Ok(first)
    }

    /// Validate `t` then `z` into a [`SliceRequest`].
    pub fn to_request(&self) -> GridResult<SliceRequest> {
        let time_index = parse_index("t", self.single("t")?)?;
        let z_index = parse_index("z", self.single("z")?)?;
        Ok(SliceRequest::new(time_index, z_index))
    }
}

/// Resolve the query extractor result into a validated slice request.
pub(crate) fn slice_request(
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> GridResult<SliceRequest> {
    match params {
        Ok(Query(pairs)) => SliceQueryParams::from_pairs(pairs).to_request(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Query string rejected");
            SliceQueryParams::default().to_request()
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert a request failure into `{"error": msg}` with its HTTP status.
pub fn error_response(err: &GridError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if err.is_client_error() {
        tracing::warn!(status = status.as_u16(), error = %err, "Request rejected");
    } else {
        tracing::error!(status = status.as_u16(), error = %err, "Request failed");
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Build a 200 response with an explicit content type.
pub(crate) fn ok_response(content_type: &'static str, body: impl Into<axum::body::Body>) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body.into()).into_response()
}

/// Run dataset work on the blocking pool.
///
/// Dataset reads block on file I/O (and on the NetCDF handle lock), so they
/// never run on an async worker thread.
pub(crate) async fn run_blocking<T, F>(work: F) -> GridResult<T>
where
    F: FnOnce() -> GridResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| GridError::Internal(format!("Blocking task failed: {}", e)))?
}
