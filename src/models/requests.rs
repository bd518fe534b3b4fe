//! Request DTOs for the catalog API
//!
//! Raw query-string parameters and JSON bodies, and their conversion into
//! catalog types. Conversion failures carry the offending field.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

use crate::catalog::{ProductInput, ProductPatch, ProductStatus, QuerySpec, SortBy, SortOrder};
use crate::error::{CatalogError, Result};

/// Query string of `GET /products`.
///
/// Every field is taken as text so malformed values surface as
/// [`CatalogError::InvalidQuery`] with a JSON body instead of an extractor
/// rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl TryFrom<ListProductsParams> for QuerySpec {
    type Error = CatalogError;

    fn try_from(params: ListProductsParams) -> Result<Self> {
        let defaults = QuerySpec::default();

        let status = match non_empty(params.status) {
            Some(raw) => Some(ProductStatus::parse(&raw).ok_or_else(|| {
                CatalogError::InvalidQuery(format!("unknown status '{}'", raw))
            })?),
            None => None,
        };
        let sort_by = match non_empty(params.sort_by) {
            Some(raw) => SortBy::parse(&raw).ok_or_else(|| {
                CatalogError::InvalidQuery(format!("unknown sortBy '{}'", raw))
            })?,
            None => defaults.sort_by,
        };
        let sort_order = match non_empty(params.sort_order) {
            Some(raw) => SortOrder::parse(&raw).ok_or_else(|| {
                CatalogError::InvalidQuery(format!("unknown sortOrder '{}'", raw))
            })?,
            None => defaults.sort_order,
        };

        Ok(QuerySpec {
            category: non_empty(params.category),
            search: non_empty(params.search),
            status,
            sort_by,
            sort_order,
            page: parse_int("page", params.page)?.unwrap_or(defaults.page),
            limit: parse_int("limit", params.limit)?.unwrap_or(defaults.limit),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_int(name: &str, value: Option<String>) -> Result<Option<i64>> {
    match non_empty(value) {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| CatalogError::InvalidQuery(format!("{} must be an integer", name))),
        None => Ok(None),
    }
}

// == Body Field ==
/// One field of a JSON body, decoded without failing the whole body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyField<T> {
    Missing,
    Null,
    /// Present with a JSON type that does not fit `T`
    Invalid,
    Value(T),
}

impl<T> Default for BodyField<T> {
    fn default() -> Self {
        BodyField::Missing
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for BodyField<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => BodyField::Null,
            raw => serde_json::from_value(raw).map_or(BodyField::Invalid, BodyField::Value),
        })
    }
}

impl<T> BodyField<T> {
    fn required(self, field: &'static str, expected: &str) -> Result<T> {
        match self {
            BodyField::Value(value) => Ok(value),
            BodyField::Missing | BodyField::Null => {
                Err(CatalogError::validation(field, "is required"))
            }
            BodyField::Invalid => Err(mistyped(field, expected)),
        }
    }

    /// Absent and null both mean "not given".
    fn optional(self, field: &'static str, expected: &str) -> Result<Option<T>> {
        match self {
            BodyField::Value(value) => Ok(Some(value)),
            BodyField::Missing | BodyField::Null => Ok(None),
            BodyField::Invalid => Err(mistyped(field, expected)),
        }
    }

    /// Absent keeps the stored value; null is rejected.
    fn patch(self, field: &'static str, expected: &str) -> Result<Option<T>> {
        match self {
            BodyField::Value(value) => Ok(Some(value)),
            BodyField::Missing => Ok(None),
            BodyField::Null => Err(CatalogError::validation(field, "must not be null")),
            BodyField::Invalid => Err(mistyped(field, expected)),
        }
    }

    /// Absent keeps the stored value; null clears it.
    fn patch_nullable(self, field: &'static str, expected: &str) -> Result<Option<Option<T>>> {
        match self {
            BodyField::Value(value) => Ok(Some(Some(value))),
            BodyField::Missing => Ok(None),
            BodyField::Null => Ok(Some(None)),
            BodyField::Invalid => Err(mistyped(field, expected)),
        }
    }
}

const TEXT: &str = "a string";
const NUMBER: &str = "a number";
const STRINGS: &str = "an array of strings";
const STATUS: &str = "one of active, inactive, draft";
const STOCK: &str = "a non-negative integer";

fn mistyped(field: &'static str, expected: &str) -> CatalogError {
    CatalogError::validation(field, format!("must be {}", expected))
}

fn stock_count(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| mistyped("stock", STOCK))
}

// == Create Product Request ==
/// Body of `POST /products`. Unknown fields such as `id` are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: BodyField<String>,
    pub description: BodyField<String>,
    pub price: BodyField<f64>,
    pub original_price: BodyField<f64>,
    pub category: BodyField<String>,
    pub subcategory: BodyField<String>,
    pub images: BodyField<Vec<String>>,
    pub stock: BodyField<i64>,
    pub sku: BodyField<String>,
    pub status: BodyField<ProductStatus>,
    pub tags: BodyField<Vec<String>>,
}

impl TryFrom<CreateProductRequest> for ProductInput {
    type Error = CatalogError;

    fn try_from(body: CreateProductRequest) -> Result<Self> {
        Ok(ProductInput {
            name: body.name.required("name", TEXT)?,
            description: body.description.required("description", TEXT)?,
            price: body.price.required("price", NUMBER)?,
            original_price: body.original_price.optional("originalPrice", NUMBER)?,
            category: body.category.required("category", TEXT)?,
            subcategory: body.subcategory.optional("subcategory", TEXT)?,
            images: body.images.optional("images", STRINGS)?.unwrap_or_default(),
            stock: stock_count(body.stock.optional("stock", STOCK)?.unwrap_or(0))?,
            sku: body.sku.required("sku", TEXT)?,
            status: body.status.optional("status", STATUS)?.unwrap_or_default(),
            tags: body.tags.optional("tags", STRINGS)?.unwrap_or_default(),
        })
    }
}

// == Update Product Request ==
/// Body of `PUT /products/{id}`. Absent fields keep their value; `null`
/// clears `originalPrice` or `subcategory`. Identity fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: BodyField<String>,
    pub description: BodyField<String>,
    pub price: BodyField<f64>,
    pub original_price: BodyField<f64>,
    pub category: BodyField<String>,
    pub subcategory: BodyField<String>,
    pub images: BodyField<Vec<String>>,
    pub stock: BodyField<i64>,
    pub sku: BodyField<String>,
    pub status: BodyField<ProductStatus>,
    pub tags: BodyField<Vec<String>>,
}

impl TryFrom<UpdateProductRequest> for ProductPatch {
    type Error = CatalogError;

    fn try_from(body: UpdateProductRequest) -> Result<Self> {
        Ok(ProductPatch {
            name: body.name.patch("name", TEXT)?,
            description: body.description.patch("description", TEXT)?,
            price: body.price.patch("price", NUMBER)?,
            original_price: body.original_price.patch_nullable("originalPrice", NUMBER)?,
            category: body.category.patch("category", TEXT)?,
            subcategory: body.subcategory.patch_nullable("subcategory", TEXT)?,
            images: body.images.patch("images", STRINGS)?,
            stock: body.stock.patch("stock", STOCK)?.map(stock_count).transpose()?,
            sku: body.sku.patch("sku", TEXT)?,
            status: body.status.patch("status", STATUS)?,
            tags: body.tags.patch("tags", STRINGS)?,
        })
    }
}
