// API error responses
// Everything surfaces to the client as `{ "error": message }` with an
// appropriate status code

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use courtside_lib::services::backup::BackupError;

/// Result type for request handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Unauthorized".to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Repository-level errors are plain strings
impl From<String> for ApiError {
    fn from(message: String) -> Self {
        ApiError::internal(message)
    }
}

/// Pre-mutation backup errors are client errors: nothing changed and the
/// archive itself is at fault. A relational-replace failure is a server
/// error and tells the operator to verify the database.
impl From<BackupError> for ApiError {
    fn from(err: BackupError) -> Self {
        match &err {
            BackupError::RelationalReplace { .. } => ApiError::internal(format!(
                "{}. Verify database integrity before making further changes.",
                err
            )),
            BackupError::Store { .. } | BackupError::Build { .. } => {
                ApiError::internal(err.to_string())
            }
            _ => ApiError::bad_request(err.to_string()),
        }
    }
}
