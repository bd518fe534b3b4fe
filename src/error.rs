//! Error types for the catalog service
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Catalog Error Enum ==
/// Unified error type for the catalog service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A product field is missing or out of range
    #[error("Invalid field '{field}': {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// No product with the given id
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Listing query parameters are unusable
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Request body is not a JSON object
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Response cache could not serve or store an entry
    #[error("Cache backend error: {0}")]
    CacheBackend(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Shorthand for a validation failure on `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CatalogError::Validation {
            field,
            message: message.into(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            CatalogError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": message, "field": field }),
            ),
            CatalogError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Product not found" }),
            ),
            CatalogError::InvalidQuery(msg) | CatalogError::MalformedBody(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            CatalogError::CacheBackend(msg) | CatalogError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::MalformedBody(rejection.body_text())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog service.
pub type Result<T> = std::result::Result<T, CatalogError>;
