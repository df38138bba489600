use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use utoipa::ToSchema;

/// FieldError
///
/// A single offending field with its human-readable message, e.g.
/// `{ "field": "title", "message": "can't be blank" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// ValidationError
///
/// The collected field-level failures of a create/update submission. Serialized
/// as the 422 response body so the client can re-render the form with messages
/// next to each offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Error)]
#[error("validation failed")]
#[ts(export)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn add(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Collapses the accumulator into a result: Ok when no field failed.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// ApiError
///
/// The request-level error taxonomy. Every handler returns `Result<_, ApiError>`;
/// the `IntoResponse` impl maps each variant onto its HTTP equivalent:
///
/// - `Validation` -> 422 with the field errors as JSON (user-correctable)
/// - `NotFound`   -> 404 (unknown id or slug)
/// - `Forbidden`  -> 403 (gate denied the role/action pair, before any mutation)
/// - `Database`   -> 500 (store failure; logged, never silently swallowed)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(ValidationError),

    #[error("record not found")]
    NotFound,

    #[error("forbidden")]
    Forbidden,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
            }
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Forbidden => StatusCode::FORBIDDEN.into_response(),
            // A missing row surfacing as a raw sqlx error still means "not found"
            // to the client, not a server fault.
            ApiError::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND.into_response(),
            ApiError::Database(e) => {
                tracing::error!("database error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
