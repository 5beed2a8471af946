use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum SkillError {
    #[error("{0}")]
    Validation(String),

    #[error("User already exists!")]
    DuplicateUser(String),

    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("Please log in first.")]
    NotAuthenticated,

    #[error("No course titled '{0}'")]
    UnknownCourse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Config error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Ractor error: {0}")]
    RactorError(String),
}

impl SkillError {
    /// Whether the error is an expected outcome of a user action rather than a server fault.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            SkillError::Validation(_)
                | SkillError::DuplicateUser(_)
                | SkillError::InvalidCredentials
                | SkillError::NotAuthenticated
                | SkillError::UnknownCourse(_)
        )
    }
}

impl IntoResponse for SkillError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self {
            SkillError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            SkillError::DuplicateUser(_) => (StatusCode::CONFLICT, "DUPLICATE_USER"),
            SkillError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            SkillError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "NOT_AUTHENTICATED"),
            SkillError::UnknownCourse(_) => (StatusCode::NOT_FOUND, "UNKNOWN_COURSE"),
            SkillError::Io(_)
            | SkillError::Csv(_)
            | SkillError::DatabaseError(_)
            | SkillError::Figment(_)
            | SkillError::Config(_)
            | SkillError::RactorError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let message = if self.is_user_facing() {
            self.to_string()
        } else {
            error!(error = %self, "request failed");
            "An internal server error occurred.".to_string()
        };

        let body = ApiErrorBody {
            code: code.to_string(),
            message,
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
