//! Catalog Module
//!
//! Product records, the authoritative product store, and the pure query engine.

mod engine;
mod product;
mod query;
pub mod seed;
mod store;


// Re-export public types
pub use engine::{evaluate, summarize_categories};
pub use product::{Product, ProductInput, ProductPatch, ProductStatus};
pub use query::{
    CategorySummary, Page, QuerySpec, SortBy, SortOrder, DEFAULT_LIMIT, LIST_KEY_PREFIX,
};
pub use store::ProductStore;
