//! Application state and view model computation.
//!
//! [`AppState`] holds the last known value of every pipeline input: the last
//! query that triggered a search, the records of the latest successful
//! response, the active sort criterion, and the pending alert. The displayed
//! list is derived state, recomputed whenever the records or the criterion
//! change.
//!
//! # State Components
//!
//! - **Query bookkeeping**: last triggering query and its generation number
//! - **Records**: unsorted records of the latest accepted success
//! - **Displayed**: `records` ordered by `criterion`
//! - **Criterion**: active sort key, persists across queries
//! - **Pending alert**: the only alert that may still be answered
//!
//! # Example
//!
//! ```rust
//! use blogsearch::app::AppState;
//! use blogsearch::domain::MissingDatetime;
//!
//! let mut state = AppState::new(MissingDatetime::Now);
//! assert_eq!(state.accept_query("  rust  "), Some(("rust".to_string(), 1)));
//! assert_eq!(state.accept_query("rust"), None);
//! assert_eq!(state.accept_query("   "), None);
//! ```

use super::alert::{Alert, AlertAction};
use crate::domain::{sort_records, DisplayRecord, MissingDatetime, SortCriterion};
use crate::ui::viewmodel::{EmptyState, HeaderInfo, ListViewModel};

/// Central pipeline state container.
///
/// Mutated only by the event handler, one event at a time.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Last query that triggered a search.
    ///
    /// Used for duplicate suppression: an identical resubmission does not
    /// search again, whatever the outcome of the previous search was.
    pub last_query: Option<String>,

    /// Generation number of the most recent search.
    ///
    /// Responses carrying any other generation are stale and discarded.
    pub generation: u64,

    /// Query whose records are currently held.
    pub records_query: Option<String>,

    /// Records of the latest accepted successful response, in API order.
    ///
    /// `None` until the first success; the displayed list is only published
    /// once records exist.
    pub records: Option<Vec<DisplayRecord>>,

    /// `records` ordered by `criterion`.
    pub displayed: Vec<DisplayRecord>,

    /// Active sort criterion.
    pub criterion: SortCriterion,

    /// Placement of undated records in a date sort.
    pub missing_datetime: MissingDatetime,

    /// Alert that may still be answered.
    pub pending_alert: Option<Alert>,

    next_alert_id: u64,
}

impl AppState {
    /// Creates an empty state sorted by title.
    #[must_use]
    pub fn new(missing_datetime: MissingDatetime) -> Self {
        Self {
            last_query: None,
            generation: 0,
            records_query: None,
            records: None,
            displayed: vec![],
            criterion: SortCriterion::default(),
            missing_datetime,
            pending_alert: None,
            next_alert_id: 1,
        }
    }

    /// Registers a submitted query and returns what to search for.
    ///
    /// Returns the trimmed query and its new generation, or `None` when the
    /// query is blank or identical to the last triggering query.
    pub fn accept_query(&mut self, raw: &str) -> Option<(String, u64)> {
        let query = raw.trim();

        if query.is_empty() {
            tracing::debug!("ignoring blank query");
            return None;
        }

        if self.last_query.as_deref() == Some(query) {
            tracing::debug!(query = %query, "ignoring duplicate query");
            return None;
        }

        self.generation += 1;
        self.last_query = Some(query.to_string());
        Some((query.to_string(), self.generation))
    }

    /// Whether a response for `generation` belongs to the latest search.
    #[must_use]
    pub const fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Replaces the held records and recomputes the displayed list.
    pub fn replace_records(&mut self, query: &str, records: Vec<DisplayRecord>) {
        self.records_query = Some(query.to_string());
        self.records = Some(records);
        self.apply_sort();
    }

    /// Sets the sort criterion and recomputes the displayed list.
    ///
    /// Returns `true` when the criterion changed, so the published list
    /// (order, criterion and sort label) must be refreshed.
    pub fn select_criterion(&mut self, criterion: SortCriterion) -> bool {
        if self.criterion == criterion {
            return false;
        }

        self.criterion = criterion;
        self.apply_sort();
        true
    }

    /// Recomputes `displayed` from `records` and `criterion`.
    pub fn apply_sort(&mut self) {
        let Some(records) = &self.records else {
            return;
        };

        self.displayed = sort_records(records, self.criterion, self.missing_datetime);

        tracing::debug!(
            count = self.displayed.len(),
            criterion = ?self.criterion,
            "displayed list recomputed"
        );
    }

    /// Raises a new alert, superseding any pending one.
    pub fn open_alert(&mut self, build: impl FnOnce(u64) -> Alert) -> Alert {
        let id = self.next_alert_id;
        self.next_alert_id += 1;

        let alert = build(id);
        if let Some(previous) = self.pending_alert.replace(alert.clone()) {
            tracing::debug!(alert_id = previous.id, "pending alert superseded");
        }
        alert
    }

    /// Consumes the answer to the pending alert.
    ///
    /// Returns the action when `alert_id` matches the pending alert and the
    /// action is one it offered; otherwise the answer is ignored.
    pub fn resolve_alert(&mut self, alert_id: u64, action: AlertAction) -> Option<AlertAction> {
        let pending = self.pending_alert.as_ref()?;

        if pending.id != alert_id {
            tracing::debug!(alert_id, pending_id = pending.id, "answer for stale alert ignored");
            return None;
        }

        if !pending.offers(action) {
            tracing::debug!(alert_id, action = ?action, "action not offered by alert");
            return None;
        }

        self.pending_alert = None;
        Some(action)
    }

    /// Computes the view model for the presentation surface.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ListViewModel {
        ListViewModel {
            records: self.displayed.clone(),
            criterion: self.criterion,
            query: self.records_query.clone(),
            header: self.compute_header(),
            empty_state: self.compute_empty_state(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match &self.records_query {
            Some(query) => format!("{query} ({})", self.displayed.len()),
            None => "Blog Search".to_string(),
        };

        HeaderInfo {
            title,
            sort_label: format!("Sort: {}", self.criterion.label()),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        match &self.records {
            None => Some(EmptyState {
                message: "Search for blog posts".to_string(),
                subtitle: "Enter a query and press search".to_string(),
            }),
            Some(records) if records.is_empty() => Some(EmptyState {
                message: "No results".to_string(),
                subtitle: "Try a different query".to_string(),
            }),
            Some(_) => None,
        }
    }
}
