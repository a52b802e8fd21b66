use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};
use serde_json::json;
use thiserror::Error;

/// Everything a handler can fail with. Each variant maps to one HTTP
/// status; infrastructure failures keep their cause out of the response
/// body and in the log.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error")]
    Validation(Vec<String>),

    #[error("Invalid {0} ID format")]
    InvalidId(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Validation error", "details": details }),
            ),
            ApiError::InvalidId(_) | ApiError::MalformedPayload => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "error": self.to_string() })),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, json!({ "error": self.to_string() })),
            ApiError::Database(_) | ApiError::Io(_) => {
                tracing::error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Identifier format check, done before any database round-trip.
pub fn parse_object_id(raw: &str, resource: &'static str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::InvalidId(resource))
}

/// Mongo reports unique-index violations as write error code 11000.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == 11000
    )
}
