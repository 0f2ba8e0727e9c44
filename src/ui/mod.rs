//! Presentation boundary types.
//!
//! Rendering is done by an external surface; this module only defines what
//! the pipeline publishes to it.
//!
//! - [`viewmodel`]: Immutable list snapshot published on every change

pub mod viewmodel;

pub use viewmodel::{EmptyState, HeaderInfo, ListViewModel};
