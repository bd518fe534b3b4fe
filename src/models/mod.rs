//! Request and Response models for the catalog API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies that are not
//! catalog types themselves.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{BodyField, CreateProductRequest, ListProductsParams, UpdateProductRequest};
pub use responses::{DeleteResponse, HealthResponse, StatsResponse};
