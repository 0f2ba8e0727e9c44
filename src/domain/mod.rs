//! Domain layer for blog search.
//!
//! This module contains the core types and pure logic of the crate,
//! independent of the HTTP client, the worker runtime, and the presentation
//! surface.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`document`]: Search payload and display record models
//! - [`mapper`]: Payload to display record projection
//! - [`sort`]: Sort criteria and record ordering
//!
//! # Examples
//!
//! ```
//! use blogsearch::domain::{
//!     map_to_display_records, sort_records, BlogDocument, BlogPayload, MissingDatetime,
//!     SortCriterion,
//! };
//!
//! let payload = BlogPayload::new(vec![
//!     BlogDocument { title: Some("b".into()), ..Default::default() },
//!     BlogDocument { title: Some("a".into()), ..Default::default() },
//! ]);
//!
//! let records = map_to_display_records(&payload);
//! let sorted = sort_records(&records, SortCriterion::ByTitle, MissingDatetime::Now);
//! assert_eq!(sorted[0].title.as_deref(), Some("a"));
//! ```

pub mod document;
pub mod error;
pub mod mapper;
pub mod sort;

pub use document::{BlogDocument, BlogPayload, DisplayRecord};
pub use error::{BlogSearchError, Result, SearchFailed};
pub use mapper::map_to_display_records;
pub use sort::{sort_records, sort_records_at, MissingDatetime, SortCriterion};
