//! Typed errors and HTTP mapping.

use crate::response::{already_exists, internal_error, not_found, validation_failed};
use crate::service::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    InvalidVar { name: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("conflict: {0}")]
    Conflict(String),
    /// The company row appeared between the existence check and the insert.
    #[error("company {0} already exists")]
    CompanyExists(i64),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("write rejected: {0}")]
    WriteRejected(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn is_unique_violation(e: &sqlx::Error) -> bool {
        matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::WriteRejected(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CompanyExists(_) | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(e) => validation_failed(e.message()).into_response(),
            AppError::BadRequest(message) => validation_failed(&message).into_response(),
            AppError::Conflict(_) => already_exists().into_response(),
            AppError::NotFound(_) => not_found().into_response(),
            AppError::WriteRejected(reason) => {
                tracing::warn!(%reason, "write affected no rows");
                (StatusCode::BAD_REQUEST, internal_error().1).into_response()
            }
            // Logged with operation context where the error was raised.
            AppError::CompanyExists(_) | AppError::Db(_) => internal_error().into_response(),
        }
    }
}
