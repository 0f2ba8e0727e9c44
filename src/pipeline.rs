//! Runtime driving the query pipeline.
//!
//! [`QueryPipeline`] owns the [`AppState`], the [`SearchWorker`], and the
//! output channels. It feeds events to [`handle_event`] one at a time and
//! executes the returned actions, so all state changes happen on a single
//! logical timeline.
//!
//! # Outputs
//!
//! - A `watch` channel holding the latest [`ListViewModel`]. It is only
//!   updated when the displayed records or the sort criterion change.
//! - An unbounded channel of [`Alert`] requests (sort options, search errors).
//!
//! # Example
//!
//! ```no_run
//! use blogsearch::pipeline::Intent;
//! use blogsearch::{initialize, Config};
//! use tokio::sync::mpsc;
//!
//! # async fn demo() -> blogsearch::Result<()> {
//! let config = Config { api_key: Some("key".into()), ..Config::default() };
//! let (pipeline, mut outputs) = initialize(&config)?;
//!
//! let (intents, intent_rx) = mpsc::channel(16);
//! let runner = tokio::spawn(pipeline.run(intent_rx));
//!
//! intents.send(Intent::SubmitQuery("rust".into())).await.ok();
//! outputs.list.changed().await.ok();
//! println!("{} results", outputs.list.borrow().records.len());
//!
//! drop(intents);
//! runner.await.ok();
//! # Ok(())
//! # }
//! ```

use crate::app::{handle_event, Action, Alert, AlertAction, AppState, Event};
use crate::client::SearchClient;
use crate::domain::error::{BlogSearchError, Result};
use crate::domain::MissingDatetime;
use crate::ui::ListViewModel;
use crate::worker::{SearchWorker, WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// User intents accepted by [`QueryPipeline::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Search text was submitted.
    SubmitQuery(String),
    /// The sort button was pressed.
    RequestSort,
    /// An alert was answered.
    ChooseAction {
        alert_id: u64,
        action: AlertAction,
    },
}

impl From<Intent> for Event {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::SubmitQuery(query) => Self::QuerySubmitted(query),
            Intent::RequestSort => Self::SortRequested,
            Intent::ChooseAction { alert_id, action } => {
                Self::AlertActionChosen { alert_id, action }
            }
        }
    }
}

/// Receiving ends handed to the presentation surface.
#[derive(Debug)]
pub struct PipelineOutputs {
    /// Latest list snapshot.
    pub list: watch::Receiver<ListViewModel>,
    /// One-shot alert requests, in emission order.
    pub alerts: mpsc::UnboundedReceiver<Alert>,
}

/// Single owner of pipeline state and executor of handler actions.
#[derive(Debug)]
pub struct QueryPipeline {
    state: AppState,
    worker: SearchWorker,
    responses: mpsc::UnboundedReceiver<WorkerResponse>,
    list: watch::Sender<ListViewModel>,
    alerts: mpsc::UnboundedSender<Alert>,
}

impl QueryPipeline {
    /// Creates a pipeline around `client`.
    #[must_use]
    pub fn new(
        client: Arc<dyn SearchClient>,
        missing_datetime: MissingDatetime,
    ) -> (Self, PipelineOutputs) {
        let state = AppState::new(missing_datetime);
        let (worker, responses) = SearchWorker::new(client);
        let (list, list_rx) = watch::channel(state.compute_viewmodel());
        let (alerts, alerts_rx) = mpsc::unbounded_channel();

        let pipeline = Self {
            state,
            worker,
            responses,
            list,
            alerts,
        };
        let outputs = PipelineOutputs {
            list: list_rx,
            alerts: alerts_rx,
        };
        (pipeline, outputs)
    }

    /// Current pipeline state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Runs one event through the handler and executes its actions.
    ///
    /// # Errors
    ///
    /// Returns [`BlogSearchError::Worker`] if a search cannot be started
    /// (no Tokio runtime).
    pub fn dispatch(&mut self, event: &Event) -> Result<()> {
        let (publish, actions) = handle_event(&mut self.state, event);

        if publish {
            self.publish_list();
        }

        for action in actions {
            self.execute(action)?;
        }
        Ok(())
    }

    /// Submits search text.
    ///
    /// # Errors
    ///
    /// See [`QueryPipeline::dispatch`].
    pub fn submit_query(&mut self, query: impl Into<String>) -> Result<()> {
        self.dispatch(&Event::QuerySubmitted(query.into()))
    }

    /// Asks for the sort options alert.
    ///
    /// # Errors
    ///
    /// See [`QueryPipeline::dispatch`].
    pub fn request_sort(&mut self) -> Result<()> {
        self.dispatch(&Event::SortRequested)
    }

    /// Answers the alert with id `alert_id`.
    ///
    /// # Errors
    ///
    /// See [`QueryPipeline::dispatch`].
    pub fn choose(&mut self, alert_id: u64, action: AlertAction) -> Result<()> {
        self.dispatch(&Event::AlertActionChosen { alert_id, action })
    }

    /// Waits for the next search response and processes it.
    ///
    /// # Errors
    ///
    /// Returns [`BlogSearchError::Worker`] if the response channel closed.
    pub async fn next_response(&mut self) -> Result<()> {
        let response = self
            .responses
            .recv()
            .await
            .ok_or_else(|| BlogSearchError::Worker("search response channel closed".to_string()))?;
        self.dispatch(&Event::WorkerResponse(response))
    }

    /// Processes intents and search responses until `intents` closes.
    ///
    /// Any search still in flight when the intent channel closes is aborted.
    ///
    /// # Errors
    ///
    /// See [`QueryPipeline::dispatch`].
    pub async fn run(mut self, mut intents: mpsc::Receiver<Intent>) -> Result<()> {
        tracing::debug!("query pipeline running");

        loop {
            tokio::select! {
                intent = intents.recv() => match intent {
                    Some(intent) => self.dispatch(&intent.into())?,
                    None => break,
                },
                Some(response) = self.responses.recv() => {
                    self.dispatch(&Event::WorkerResponse(response))?;
                }
            }
        }

        self.worker.handle_message(WorkerMessage::CancelInFlight)?;
        tracing::debug!("query pipeline stopped");
        Ok(())
    }

    fn execute(&mut self, action: Action) -> Result<()> {
        match action {
            Action::PostToWorker(message) => self.worker.handle_message(message),
            Action::PresentAlert(alert) => {
                if self.alerts.send(alert).is_err() {
                    tracing::debug!("alert receiver dropped, alert not delivered");
                }
                Ok(())
            }
        }
    }

    fn publish_list(&self) {
        self.list.send_replace(self.state.compute_viewmodel());
    }
}
