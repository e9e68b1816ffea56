use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    // Policy rejections, kept distinct so callers can show a specific notice
    #[error("message flagged as spam")]
    SpamRejected,

    #[error("you are blocked by this user")]
    BlockedByRecipient,

    #[error("account banned: {0}")]
    Banned(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => AppError::NotFound("resource not found".to_string()),
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                AppError::Conflict("resource already exists".to_string())
            }
            _ => AppError::Database(e),
        }
    }
}

impl AppError {
    /// Machine-readable code included in every error response body
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "DUPLICATE",
            AppError::SpamRejected => "SPAM_REJECTED",
            AppError::BlockedByRecipient => "BLOCKED_BY_RECIPIENT",
            AppError::Banned(_) => "USER_BANNED",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::SpamRejected | AppError::BlockedByRecipient | AppError::Banned(_) => {
                StatusCode::FORBIDDEN
            }
            AppError::Config(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error occurred".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status()).json(json!({
            "error": {
                "code": self.code(),
                "message": message,
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_rejections_are_distinguishable() {
        assert_eq!(AppError::SpamRejected.code(), "SPAM_REJECTED");
        assert_eq!(AppError::BlockedByRecipient.code(), "BLOCKED_BY_RECIPIENT");
        assert_eq!(AppError::Banned("spam".to_string()).code(), "USER_BANNED");
        assert_eq!(AppError::SpamRejected.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_errors_mask_details() {
        let err: AppError = sqlx::Error::PoolClosed.into();
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
