//! Logging and OpenTelemetry span export.
//!
//! Every run logs to stderr through `tracing-subscriber`'s fmt layer. Span
//! export is opt-in (`trace_export = true`):
//!
//! ```text
//! tracing spans → tracing-opentelemetry → OpenTelemetry SDK → SpanFileExporter → JSON lines
//! ```
//!
//! The exported file rotates to a single `.1` backup at 5 MB.
//!
//! # Configuration
//!
//! Level is controlled by:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `exporter`: JSON-lines span exporter with rotation (internal)

mod exporter;
pub mod init;

pub use init::{init_tracing, trace_file_path};
