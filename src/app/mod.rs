//! Application layer coordinating state, events, and actions.
//!
//! This module is the query pipeline's state machine. It sits between the
//! runtime (`pipeline.rs`) and the domain/worker layers, and it never performs
//! I/O itself.
//!
//! # Architecture
//!
//! ```text
//! Intents → Events → Event Handler → State Mutations → Actions → Side Effects
//!                         ↑                                  ↓
//!                         └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`alert`]: Alert requests and their answers
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`state`]: Last-known inputs, derived list, and view model computation

pub mod actions;
pub mod alert;
pub mod handler;
pub mod state;

pub use actions::Action;
pub use alert::{Alert, AlertAction, AlertKind, AlertStyle};
pub use handler::{handle_event, Event};
pub use state::AppState;
