//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /products` - Filtered, sorted, paginated listing
//! - `POST /products` - Create a product
//! - `GET /products/:id` - Fetch one product
//! - `PUT /products/:id` - Partially update a product
//! - `DELETE /products/:id` - Delete a product
//! - `GET /categories` - Category slugs with product counts
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
