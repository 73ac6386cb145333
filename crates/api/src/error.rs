use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gradebook_core::error::CoreError;
use gradebook_db::store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// errors, and adds a variant for framework rejections. Implements
/// [`IntoResponse`] to produce consistent `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `gradebook_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An error from the record store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A request the framework could not extract (bad JSON, bad path
    /// segment, oversized body). Carries the status the rejection chose.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON whose fields have the wrong types.
            JsonRejection::JsonDataError(err) => {
                AppError::Core(CoreError::Validation(err.body_text()))
            }
            other => AppError::Rejected {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }

            // --- Store errors ---
            AppError::Store(store) => match store {
                StoreError::DuplicateRollNo(_) => {
                    (StatusCode::CONFLICT, "CONFLICT", store.to_string())
                }
                StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", store.to_string()),
                StoreError::Database(err) => {
                    tracing::error!(error = %err, "Database error");
                    internal()
                }
            },

            // --- HTTP-specific errors ---
            AppError::Rejected { status, message } => {
                (*status, rejection_code(*status), message.clone())
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn rejection_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::METHOD_NOT_ALLOWED => "METHOD_NOT_ALLOWED",
        StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        s if s.is_server_error() => "INTERNAL_ERROR",
        _ => "BAD_REQUEST",
    }
}
