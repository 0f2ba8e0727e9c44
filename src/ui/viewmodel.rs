//! View model published to the presentation surface.
//!
//! [`ListViewModel`] is an immutable snapshot computed from `AppState` each
//! time the displayed list changes. It carries display-ready data only; the
//! surface renders it as-is.
//!
//! # Example
//!
//! ```rust
//! use blogsearch::app::AppState;
//! use blogsearch::domain::{MissingDatetime, SortCriterion};
//!
//! let state = AppState::new(MissingDatetime::Now);
//! let vm = state.compute_viewmodel();
//! assert!(vm.records.is_empty());
//! assert_eq!(vm.criterion, SortCriterion::ByTitle);
//! assert!(vm.empty_state.is_some());
//! ```

use crate::domain::{DisplayRecord, SortCriterion};

/// Ordered list of records ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    /// Records in display order.
    pub records: Vec<DisplayRecord>,

    /// Criterion the records are ordered by.
    pub criterion: SortCriterion,

    /// Query that produced the records, `None` before the first result.
    pub query: Option<String>,

    /// Header information (title, active sort).
    pub header: HeaderInfo,

    /// Optional empty state message (when there is nothing to show).
    pub empty_state: Option<EmptyState>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, including the result count once results exist.
    pub title: String,

    /// Label of the sort button (e.g. "Sort: Title").
    pub sort_label: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No results").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
