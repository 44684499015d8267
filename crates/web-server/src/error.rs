use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing;
use utoipa::ToSchema;

/// The error body shape reported under a `message` key.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"message": "Order not found"}))]
pub struct MessageBody {
    pub message: String,
}

/// The error body shape used by the older routes, reported under an `error` key.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"error": "Order not found"}))]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    /// A missing resource on the current routes, reported as `{"message": ...}`.
    #[error("Not found: {0}")]
    NotFound(String),
    /// A missing resource on the older routes, reported as `{"error": ...}`.
    /// Kept separate so neither body convention can silently drift.
    #[error("Not found: {0}")]
    NotFoundLegacy(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Database failures collapse to one generic 500 body; the underlying error
/// is logged server-side and never echoed to the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal Server Error" }),
                )
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
            AppError::NotFoundLegacy(message) => {
                (StatusCode::NOT_FOUND, json!({ "error": message }))
            }
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
        };

        (status, Json(body)).into_response()
    }
}
