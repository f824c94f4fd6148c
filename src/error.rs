use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::SqlErr;
use serde::Serialize;
use thiserror::Error;

use crate::{response::ApiResponse, validation::FieldErrors};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid form data")]
    Validation(FieldErrors),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Database error")]
    DbError(sqlx::Error),

    #[error("Internal Server Error")]
    OrmError(sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

pub const STILL_REFERENCED: &str = "Data is still used by other records";
pub const ALREADY_EXISTS: &str = "Data already exists";

// Constraint violations map to 400.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (foreign_key, unique) = err
            .as_database_error()
            .map(|db| (db.is_foreign_key_violation(), db.is_unique_violation()))
            .unwrap_or_default();
        if foreign_key {
            AppError::BadRequest(STILL_REFERENCED.into())
        } else if unique {
            AppError::BadRequest(ALREADY_EXISTS.into())
        } else {
            AppError::DbError(err)
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::BadRequest(STILL_REFERENCED.into())
            }
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::BadRequest(ALREADY_EXISTS.into())
            }
            _ => AppError::OrmError(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::DbError(err) => tracing::error!(error = %err, "database error"),
            AppError::OrmError(err) => tracing::error!(error = %err, "orm error"),
            AppError::Internal(err) => tracing::error!(error = %err, "internal error"),
            _ => {}
        }

        let message = self.to_string();
        let errors = match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        };

        let body = ApiResponse::failure(
            message.clone(),
            Some(ErrorData { error: message }),
            errors,
        );

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
