//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::infrastructure::{data_dir, expand_tilde};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "blogsearch";

/// File name used when `trace_export` is on and no `trace_file` is set.
const DEFAULT_TRACE_FILE: &str = "blogsearch-spans.json";

/// Initializes the global tracing subscriber.
///
/// The subscriber always logs to stderr. When `config.trace_export` is set,
/// spans are additionally exported as JSON lines to [`trace_file_path`].
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// - Creates the trace file's parent directory if needed
/// - Skips span export if that directory cannot be created
/// - Idempotent: only the first call installs a subscriber
///
/// # Example
///
/// ```rust
/// use blogsearch::observability::init_tracing;
/// use blogsearch::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let otel_layer = config
        .trace_export
        .then(|| trace_file_path(config))
        .filter(|path| match path.parent() {
            Some(parent) => std::fs::create_dir_all(parent).is_ok(),
            None => true,
        })
        .map(|path| {
            let provider = exporter::create_tracer_provider(path, SERVICE_NAME);
            OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME))
        });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(otel_layer)
        .try_init();
}

/// Where exported spans are written for `config`.
///
/// `trace_file` (with `~` expanded) when set, otherwise
/// `blogsearch-spans.json` in the data directory.
#[must_use]
pub fn trace_file_path(config: &Config) -> PathBuf {
    config.trace_file.as_deref().map_or_else(
        || data_dir().join(DEFAULT_TRACE_FILE),
        expand_tilde,
    )
}
