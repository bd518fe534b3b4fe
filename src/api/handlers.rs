//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::catalog::{CategorySummary, Page, Product, ProductInput, ProductPatch, QuerySpec};
use crate::config::Config;
use crate::coordinator::CacheCoordinator;
use crate::error::Result;
use crate::models::{
    CreateProductRequest, DeleteResponse, HealthResponse, ListProductsParams, StatsResponse,
    UpdateProductRequest,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store and cache behind their consistency rules
    pub catalog: Arc<CacheCoordinator>,
}

impl AppState {
    pub fn new(catalog: CacheCoordinator) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Creates an empty catalog sized and timed from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheCoordinator::from_config(config))
    }
}

/// Handler for GET /products
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListProductsParams>,
) -> Result<Json<Page>> {
    let query = QuerySpec::try_from(params)?;
    let page = state.catalog.fetch_page(&query).await?;
    Ok(Json(page))
}

/// Handler for GET /products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let product = state.catalog.fetch_by_id(&id).await?;
    Ok(Json(product))
}

/// Handler for POST /products
///
/// Body rejections and field errors both answer 400 with a JSON body.
pub async fn create_product(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let Json(body) = body?;
    let input = ProductInput::try_from(body)?;
    let product = state.catalog.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for PUT /products/:id
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<Product>> {
    let Json(body) = body?;
    let patch = ProductPatch::try_from(body)?;
    let product = state.catalog.update(&id, patch).await?;
    Ok(Json(product))
}

/// Handler for DELETE /products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.catalog.delete(&id).await?;
    Ok(Json(DeleteResponse::ok()))
}

/// Handler for GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategorySummary>>> {
    let categories = state.catalog.fetch_categories().await?;
    Ok(Json(categories))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.catalog.cache_stats().await;
    let product_count = state.catalog.product_count().await;
    Json(StatsResponse::new(&stats, product_count))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
