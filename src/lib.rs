//! Filter, search, sort and page over in-memory typed records.
//!
//! A [`QueryRequest`] names fields as text; each record type registers a
//! [`Schema`] that maps those names to typed getters. Building a [`QueryPlan`]
//! resolves and coerces every part of the request up front, so a bad field
//! name or value is reported before any record is read.
//!
//! ```
//! use recordquery::{FieldType, FilterCondition, Operator, QueryRequest, Record, Schema, SortDirection, apply_query};
//! use serde_json::json;
//! use std::sync::LazyLock;
//!
//! struct Item {
//!     id: i64,
//!     price: f64,
//! }
//!
//! static ITEM: LazyLock<Schema<Item>> = LazyLock::new(|| {
//!     Schema::builder("Item")
//!         .field("Id", FieldType::Int, |i: &Item| i.id.into())
//!         .field("Price", FieldType::Float, |i: &Item| i.price.into())
//!         .build()
//! });
//!
//! impl Record for Item {
//!     fn schema() -> &'static Schema<Self> {
//!         &ITEM
//!     }
//! }
//!
//! let items = vec![Item { id: 1, price: 50.0 }, Item { id: 2, price: 150.0 }, Item { id: 3, price: 120.0 }];
//! let request = QueryRequest::new()
//!     .with_filter("price", FilterCondition::new(Operator::Gte, json!(100)))
//!     .with_sort("Id", SortDirection::Desc)
//!     .with_page(1, 5);
//! let ids: Vec<i64> = apply_query(&items, &request)?.iter().map(|i| i.id).collect();
//! assert_eq!(ids, vec![3, 2]);
//! # Ok::<(), recordquery::QueryError>(())
//! ```

pub mod collection;
pub mod config;
pub mod errors;
pub mod query;
pub mod schema;
pub mod utils;

pub use collection::Collection;
pub use config::QueryConfig;
pub use errors::QueryError;
pub use query::{
    FilterCondition, Operator, Page, QueryPlan, QueryRequest, SortDirection, apply_query, count_matching,
    parse_request_json,
};
pub use schema::{FieldType, FieldValue, Record, Schema};

/// Initializes logging from `log4rs.yaml` in the working directory, if present.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    utils::logger::init()?;
    Ok(())
}
