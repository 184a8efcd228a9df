//! # pagekit
//!
//! Normalizes pagination, search, and ordering parameters from an inbound HTTP
//! request's query string into a sanitized, ready-to-use bundle for data-access
//! code (`LIMIT` / `OFFSET` / `ORDER BY` / `LIKE`).
//!
//! The crate never fails a request over a bad parameter: invalid or missing
//! values fall back to defaults, free-text search and order-by field names are
//! stripped down to injection-safe character sets, and extra filters are only
//! captured when explicitly allow-listed.
//!
//! ## Quick Start
//!
//! ```
//! use pagekit::{Ordering, Paginator};
//! use std::collections::HashMap;
//!
//! let query: HashMap<String, String> = [
//!     ("limit".to_string(), "25".to_string()),
//!     ("page".to_string(), "3".to_string()),
//!     ("q".to_string(), "jane;--@example.com".to_string()),
//!     ("order".to_string(), "desc".to_string()),
//!     ("is_active".to_string(), "1".to_string()),
//! ]
//! .into();
//!
//! let params = Paginator::new().allow_filter("is_active").parse(&query);
//!
//! assert_eq!(params.limit(), 25);
//! assert_eq!(params.offset(), 50);
//! assert_eq!(params.search(), "%jane--@example.com%");
//! assert_eq!(params.ordering(), Ordering::Desc);
//! assert_eq!(params.filter("is_active").and_then(|v| v.as_deref()), Some("1"));
//! ```
//!
//! The produced [`Pagination`] is a plain value: hand it to the query-building
//! layer and read `limit()`, `offset()`, `order_by()`, `ordering()`, and
//! `search()` from it. It performs no I/O and executes no query itself.

pub mod errors;
pub mod paginate;
pub mod query;
pub mod sanitize;

pub use errors::ParseOrderingError;
pub use paginate::{FilterValue, Ordering, Pagination, Paginator, ParamNames, QuerySource};
pub use query::PageQuery;
