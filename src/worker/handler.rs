//! Search worker that runs client calls on Tokio tasks.
//!
//! The worker owns at most one in-flight search. A new `Search` message
//! aborts the previous task before spawning the next one, so only the latest
//! query can still produce a response. Completed searches are posted back on
//! an unbounded channel that the pipeline drains in arrival order.

use crate::client::SearchClient;
use crate::domain::error::{BlogSearchError, Result};
use crate::worker::{TraceContext, WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Bookkeeping for the search currently running.
#[derive(Debug)]
struct InFlight {
    generation: u64,
    query: String,
    handle: JoinHandle<()>,
}

/// Executes searches and enforces latest-wins cancellation.
///
/// # Examples
///
/// ```no_run
/// use blogsearch::worker::{SearchWorker, WorkerMessage};
/// use blogsearch::{Config, KakaoSearchClient};
/// use std::sync::Arc;
///
/// # async fn demo() -> blogsearch::Result<()> {
/// let config = Config { api_key: Some("key".into()), ..Config::default() };
/// let client = Arc::new(KakaoSearchClient::new(&config)?);
/// let (mut worker, mut responses) = SearchWorker::new(client);
///
/// worker.handle_message(WorkerMessage::search("rust".into(), 1))?;
/// let response = responses.recv().await;
/// # Ok(())
/// # }
/// ```
pub struct SearchWorker {
    client: Arc<dyn SearchClient>,
    responses: mpsc::UnboundedSender<WorkerResponse>,
    in_flight: Option<InFlight>,
}

impl std::fmt::Debug for SearchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchWorker")
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl SearchWorker {
    /// Creates a worker and the receiving end of its response channel.
    #[must_use]
    pub fn new(client: Arc<dyn SearchClient>) -> (Self, mpsc::UnboundedReceiver<WorkerResponse>) {
        let (responses, receiver) = mpsc::unbounded_channel();
        let worker = Self {
            client,
            responses,
            in_flight: None,
        };
        (worker, receiver)
    }

    /// Generation of the search still running, if any.
    #[must_use]
    pub fn in_flight_generation(&self) -> Option<u64> {
        self.in_flight
            .as_ref()
            .filter(|in_flight| !in_flight.handle.is_finished())
            .map(|in_flight| in_flight.generation)
    }

    /// Processes a worker message.
    ///
    /// # Errors
    ///
    /// Returns [`BlogSearchError::Worker`] if a search is requested outside a
    /// Tokio runtime.
    pub fn handle_message(&mut self, message: WorkerMessage) -> Result<()> {
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::Search {
                query,
                generation,
                trace_context,
            } => {
                self.cancel_in_flight();
                self.spawn_search(query, generation, trace_context.as_ref())
            }
            WorkerMessage::CancelInFlight => {
                self.cancel_in_flight();
                Ok(())
            }
        }
    }

    fn cancel_in_flight(&mut self) {
        let Some(previous) = self.in_flight.take() else {
            return;
        };

        if previous.handle.is_finished() {
            tracing::trace!(generation = previous.generation, "previous search already finished");
            return;
        }

        tracing::debug!(
            generation = previous.generation,
            query = %previous.query,
            "superseding in-flight search"
        );
        previous.handle.abort();
    }

    fn spawn_search(
        &mut self,
        query: String,
        generation: u64,
        trace_context: Option<&TraceContext>,
    ) -> Result<()> {
        let runtime = Handle::try_current()
            .map_err(|e| BlogSearchError::Worker(format!("no async runtime for search: {e}")))?;

        let span = tracing::debug_span!("search_task", generation = generation, query = %query);
        if let Some(parent) = trace_context.and_then(TraceContext::to_otel_context) {
            span.set_parent(parent);
        }

        let search = self.client.search(&query);
        let responses = self.responses.clone();
        let task_query = query.clone();

        let task = async move {
            let result = search.await;
            match &result {
                Ok(payload) => {
                    tracing::debug!(documents = payload.len(), "search succeeded");
                }
                Err(failure) => {
                    tracing::debug!(reason = %failure.reason, "search failed");
                }
            }

            let response = WorkerResponse::SearchCompleted {
                generation,
                query: task_query,
                result,
            };
            if responses.send(response).is_err() {
                tracing::debug!("pipeline dropped, discarding search response");
            }
        };

        let handle = runtime.spawn(task.instrument(span));
        self.in_flight = Some(InFlight {
            generation,
            query,
            handle,
        });
        Ok(())
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
        }
    }
}
