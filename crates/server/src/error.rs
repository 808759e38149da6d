use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use store::{StoreError, ValidationError};

pub type ServerResult<T> = Result<T, ServerError>;

/// Body of every 400 returned by the create route.
pub const MISSING_FIELDS_MESSAGE: &str = "The name and number must be provided.";

/// Body of the 404 returned by the delete route.
pub const PERSON_NOT_FOUND_MESSAGE: &str = "Person not found with the provided ID";

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,

    #[error("Validation failed: {0}")]
    Validation(ValidationError),

    #[error("Payload too large: max {0}KB allowed")]
    PayloadTooLarge(usize),

    #[error("Not found")]
    NotFound,

    #[error("{}", PERSON_NOT_FOUND_MESSAGE)]
    PersonNotFound,

    /// Malformed id. Answered with a server error, like any other storage
    /// failure; a 400 here is still an open product decision.
    #[error("{0}")]
    InvalidId(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// JSON error body: `{"error": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::MissingFields | ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::NotFound | ServerError::PersonNotFound => StatusCode::NOT_FOUND,
            ServerError::InvalidId(_)
            | ServerError::Storage(_)
            | ServerError::Config(_)
            | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the JSON body, if any.
    fn body_message(&self) -> Option<String> {
        match self {
            ServerError::NotFound => None,
            // store-side validation failures answer with the same fixed message
            ServerError::MissingFields | ServerError::Validation(_) => {
                Some(MISSING_FIELDS_MESSAGE.to_string())
            }
            other => Some(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        }

        match self.body_message() {
            Some(error) => (status, Json(ErrorResponse { error })).into_response(),
            None => status.into_response(),
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(inner) => ServerError::Validation(inner),
            invalid @ StoreError::InvalidId(_) => ServerError::InvalidId(invalid.to_string()),
            StoreError::Backend(msg) => ServerError::Storage(msg),
        }
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(err: config::ConfigError) -> Self {
        ServerError::Config(err.to_string())
    }
}
