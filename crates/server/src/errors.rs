use askdoc::FeedbackError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

/// A custom error type for the server application.
///
/// This enum encapsulates the different kinds of errors that can occur within
/// the server, allowing them to be converted into appropriate HTTP responses.
pub enum AppError {
    /// The requested session does not exist.
    SessionNotFound(Uuid),
    /// The request payload was rejected.
    BadRequest(String),
    /// Errors from the feedback log.
    Feedback(FeedbackError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl AppError {
    pub fn lock_poisoned() -> Self {
        AppError::Internal(anyhow::anyhow!("session store lock was poisoned"))
    }
}

/// Conversion from `FeedbackError` to `AppError`.
impl From<FeedbackError> for AppError {
    fn from(err: FeedbackError) -> Self {
        AppError::Feedback(err)
    }
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::SessionNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Unknown session: {id}"))
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Feedback(err) => {
                error!("FeedbackError: {:?}", err);
                match err {
                    FeedbackError::Empty => (StatusCode::BAD_REQUEST, err.to_string()),
                    FeedbackError::Open { .. } | FeedbackError::Csv(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to save feedback: {err}"),
                    ),
                }
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
