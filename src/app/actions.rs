//! Actions representing side effects to be executed by the pipeline runtime.
//!
//! The event handler never talks to the worker or the presentation surface
//! itself. It returns a `Vec<Action>` after each event, and the runtime
//! executes them in order. Publishing the list is signalled separately by the
//! handler's `bool` return value.
//!
//! # Example
//!
//! ```rust
//! use blogsearch::app::{Action, Alert};
//! use blogsearch::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::search("rust".to_string(), 1)),
//!     Action::PresentAlert(Alert::sort_options(1)),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use super::alert::Alert;
use crate::worker::WorkerMessage;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Posts a message to the search worker.
    ///
    /// Used to start a search for a newly submitted query, which also
    /// supersedes whatever search is still in flight.
    PostToWorker(WorkerMessage),

    /// Asks the presentation surface to show an alert.
    ///
    /// The answer comes back as an `AlertActionChosen` event carrying the
    /// alert's id.
    PresentAlert(Alert),
}
