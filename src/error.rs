use axum::response::{IntoResponse, Response};
use axum::Json;
use diesel::r2d2;
use http::StatusCode;
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug)]
pub enum ApiError {
    Database(diesel::result::Error),
    Bcrypt(bcrypt::BcryptError),
    Validation(validator::ValidationErrors),
    BadRequest(String),
    DuplicateUsername,
    DatabaseConnection(String),
    Token(String),
    Auth(String),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Database(e) => write!(f, "Database error: {}", e),
            ApiError::Bcrypt(e) => write!(f, "Bcrypt error: {}", e),
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::BadRequest(e) => write!(f, "Bad request: {}", e),
            ApiError::DuplicateUsername => write!(f, "Duplicate username"),
            ApiError::DatabaseConnection(e) => write!(f, "Database connection error: {}", e),
            ApiError::Token(e) => write!(f, "Token error: {}", e),
            ApiError::Auth(e) => write!(f, "Authentication error: {}", e),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Database(e) => Some(e),
            ApiError::Bcrypt(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<r2d2::PoolError> for ApiError {
    fn from(err: r2d2::PoolError) -> Self {
        ApiError::DatabaseConnection(err.to_string())
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        ApiError::Database(err)
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ApiError::Bcrypt(err)
    }
}

impl From<String> for ApiError {
    fn from(err: String) -> Self {
        ApiError::Token(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

impl From<ApiError> for (StatusCode, String) {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Database(e) => match e {
                diesel::result::Error::NotFound => (
                    StatusCode::UNAUTHORIZED,
                    "Неверное имя или пароль".to_string(),
                ),
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) => (StatusCode::BAD_REQUEST, "Это имя уже занято".to_string()),
                // Storage details stay in the server logs
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ошибка сервера".to_string(),
                ),
            },
            ApiError::Bcrypt(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Ошибка сервера".to_string(),
            ),
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, validation_message(&errors)),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::DuplicateUsername => {
                (StatusCode::BAD_REQUEST, "Это имя уже занято".to_string())
            }
            ApiError::DatabaseConnection(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Ошибка сервера".to_string(),
            ),
            ApiError::Token(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Ошибка сервера".to_string(),
            ),
            ApiError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Ошибка сервера".to_string(),
            ),
        }
    }
}

/// Error body shared by every endpoint: `{"success": false, "message": ...}`.
#[derive(Serialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Server faults keep their detail here and reach the client as a
        // generic message; client errors are logged at the call site.
        if matches!(
            &self,
            ApiError::Database(_)
                | ApiError::Bcrypt(_)
                | ApiError::DatabaseConnection(_)
                | ApiError::Token(_)
                | ApiError::Internal(_)
        ) {
            tracing::error!("Request failed: {}", self);
        }
        let (status, message): (StatusCode, String) = self.into();
        (
            status,
            Json(ErrorResponse {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

// First field-level message, so the client sees "Имя слишком короткое"
// instead of the validator's multi-line Display dump.
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|field| field.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Некорректные данные".to_string())
}
