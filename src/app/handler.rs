//! Event handling and state transition logic.
//!
//! This module implements the event handler that turns user intents and
//! worker responses into state changes and action sequences. It is the
//! single coordinator of the query-to-display pipeline.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the presentation surface or the search worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! The returned `bool` tells the runtime whether the displayed list changed
//! and must be republished.
//!
//! # Event Types
//!
//! - **Intents**: `QuerySubmitted`, `SortRequested`, `AlertActionChosen`
//! - **Worker**: `WorkerResponse` with the outcome of a search
//!
//! # Example
//!
//! ```rust
//! use blogsearch::app::{handle_event, Action, AppState, Event};
//! use blogsearch::domain::MissingDatetime;
//!
//! let mut state = AppState::new(MissingDatetime::Now);
//! let (publish, actions) = handle_event(&mut state, &Event::QuerySubmitted("rust".into()));
//! assert!(!publish);
//! assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
//! ```

use super::alert::{Alert, AlertAction};
use crate::app::{Action, AppState};
use crate::domain::map_to_display_records;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user intents or worker responses.
///
/// Events are processed strictly one at a time in arrival order, so every
/// transition sees the effects of all earlier events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The user submitted search text.
    QuerySubmitted(String),

    /// The user asked to change the sort order.
    ///
    /// Answered with a sort options alert.
    SortRequested,

    /// The user answered an alert.
    AlertActionChosen {
        /// Id of the alert being answered.
        alert_id: u64,
        /// Chosen action.
        action: AlertAction,
    },

    /// Wraps a response from the search worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates state, and returns actions to execute.
///
/// # Returns
///
/// A tuple of `(publish, actions)`. `publish` is `true` when the displayed
/// list changed. `actions` may be empty (e.g. a duplicate query or a stale
/// response).
pub fn handle_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::QuerySubmitted(raw) => {
            let Some((query, generation)) = state.accept_query(raw) else {
                return (false, vec![]);
            };

            tracing::debug!(query = %query, generation, "starting search");
            (
                false,
                vec![Action::PostToWorker(WorkerMessage::search(query, generation))],
            )
        }
        Event::SortRequested => {
            let alert = state.open_alert(Alert::sort_options);
            tracing::debug!(alert_id = alert.id, "presenting sort options");
            (false, vec![Action::PresentAlert(alert)])
        }
        Event::AlertActionChosen { alert_id, action } => {
            let Some(action) = state.resolve_alert(*alert_id, *action) else {
                return (false, vec![]);
            };

            match action.sort_criterion() {
                Some(criterion) => {
                    tracing::debug!(criterion = ?criterion, "sort criterion selected");
                    (state.select_criterion(criterion), vec![])
                }
                None => {
                    tracing::debug!(action = ?action, "alert dismissed");
                    (false, vec![])
                }
            }
        }
        Event::WorkerResponse(WorkerResponse::SearchCompleted {
            generation,
            query,
            result,
        }) => {
            if !state.is_current(*generation) {
                tracing::debug!(
                    generation,
                    current = state.generation,
                    query = %query,
                    "discarding superseded search response"
                );
                return (false, vec![]);
            }

            match result {
                Ok(payload) => {
                    let records = map_to_display_records(payload);
                    tracing::debug!(query = %query, count = records.len(), "search results received");
                    state.replace_records(query, records);
                    (true, vec![])
                }
                Err(failure) => {
                    tracing::warn!(query = %query, reason = %failure.reason, "search failed");
                    let alert = state.open_alert(|id| Alert::search_error(id, &failure.reason));
                    (false, vec![Action::PresentAlert(alert)])
                }
            }
        }
    }
}
