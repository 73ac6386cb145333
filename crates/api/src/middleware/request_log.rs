//! Request logging middleware.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use http_body_util::LengthLimitError;

use crate::error::AppError;
use crate::state::AppState;

/// Log method, path and body of every request before it is handled.
///
/// The body is buffered (up to `max_body_bytes`) so it can be logged and
/// then handed on unchanged. Larger bodies are rejected with 413.
pub async fn log_request(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let limit = state.config.max_body_bytes;
    let (parts, body) = request.into_parts();

    let bytes = to_bytes(body, limit)
        .await
        .map_err(|err| body_read_error(&err, limit))?;

    tracing::info!(
        method = %parts.method,
        path = %parts.uri.path(),
        body = %String::from_utf8_lossy(&bytes),
        "Incoming request",
    );

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// 413 when the body went over `limit`, 400 for any other read failure.
fn body_read_error(err: &axum::Error, limit: usize) -> AppError {
    let over_limit = std::error::Error::source(err).is_some_and(|e| e.is::<LengthLimitError>());

    if over_limit {
        AppError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: format!("Request body exceeds {limit} bytes"),
        }
    } else {
        tracing::warn!(error = %err, "Failed to read request body");
        AppError::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: "Failed to read request body".to_string(),
        }
    }
}
