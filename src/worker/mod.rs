//! Background search execution with latest-wins cancellation.
//!
//! The pipeline never awaits the network directly. It posts a
//! [`WorkerMessage`] to the [`SearchWorker`], which runs the client call on a
//! Tokio task and posts a [`WorkerResponse`] back when the call completes.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and task lifecycle

pub mod handler;
pub mod messages;

pub use handler::SearchWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
