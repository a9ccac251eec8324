use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Failures raised by a [`DocumentStore`](crate::store::DocumentStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Update called without an identifier.
    #[error("Existing Item Not Found")]
    MissingId,

    #[error("item {0} not found")]
    NotFound(String),

    /// A filter key that is an operator, not a field name.
    #[error("filter key '{0}' is not a field name")]
    InvalidFilter(String),

    /// Connection failure, rejected write, or cursor failure.
    #[error("Database error: {0}")]
    Database(String),

    /// The item could not be converted to or from a stored document.
    #[error("Document encoding error: {0}")]
    Encoding(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        StoreError::Encoding(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for StoreError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        StoreError::Encoding(err.to_string())
    }
}

/// Failures of a dispatched resource operation.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("request field '{0}' is missing or empty")]
    MissingPayload(String),

    #[error("invalid JSON payload: {0}")]
    InvalidPayload(String),

    #[error("item {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// No local handler and no proxy target for this path.
    #[error("service not found {0}")]
    NotImplemented(String),

    #[error("proxy request to {target} failed: {message}")]
    Proxy { target: String, message: String },

    #[error("failed to generate identifier: {0}")]
    IdGeneration(String),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Convert DocumentError to AppError for standardized error responses
impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::MissingPayload(_) | DocumentError::InvalidPayload(_) => {
                AppError::InvalidJson(err.to_string())
            }
            DocumentError::NotFound(_) => AppError::NotFound(err.to_string()),
            DocumentError::Store(StoreError::NotFound(id)) => {
                AppError::NotFound(format!("item {} not found", id))
            }
            DocumentError::Store(StoreError::MissingId | StoreError::InvalidFilter(_)) => {
                AppError::BadRequest(err.to_string())
            }
            DocumentError::Store(e) => AppError::Database(e.to_string()),
            DocumentError::NotImplemented(_) => AppError::NotImplemented(err.to_string()),
            DocumentError::Proxy { .. } => AppError::BadGateway(err.to_string()),
            DocumentError::IdGeneration(_) => AppError::InternalServerError(err.to_string()),
            DocumentError::Encode(e) => AppError::SerdeJson(e),
        }
    }
}

impl IntoResponse for DocumentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
