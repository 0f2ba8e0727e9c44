//! Blogsearch: a query-driven blog search pipeline.
//!
//! Blogsearch turns submitted search text into a sortable list of blog posts:
//! - Search requests against the Kakao (Daum) blog search API
//! - Latest-query-wins cancellation of in-flight searches
//! - Duplicate query suppression
//! - Title and datetime sorting with a persistent criterion
//! - Alert requests for sort options and search failures

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Presentation surface (external)                    │  ← Renders, sends intents
//! └─────────────────────────────────────────────────────┘
//!               │ Intent              ▲ ListViewModel / Alert
//! ┌─────────────────────────────────────────────────────┐
//! │  Pipeline (pipeline.rs)                             │  ← Single owner of state
//! │  - Event loop over intents and search responses     │
//! │  - Action execution                                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Alert bookkeeping                                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                       │
//! ┌───────────────────────┐           ┌───────────────────────┐
//! │ Worker Layer          │           │ UI Layer (ui/)        │
//! │ (worker/)             │           │ - List view model     │
//! │ - Search task spawning│           │ - Header, empty state │
//! │ - Cancellation        │           └───────────────────────┘
//! └───────────────────────┘
//!         │
//! ┌───────────────────────┐
//! │ Client Layer (client/)│
//! │ - Kakao HTTP client   │
//! │ - Response decoding   │
//! └───────────────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Config and data paths (infrastructure/)          │
//! │  - Error types (domain/error)                       │
//! │  - Documents, mapping, sorting (domain/)            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - stderr logging                                   │
//! │  - Optional JSON-lines span export                  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`client`]: Search client trait and the Kakao implementation
//! - [`domain`]: Documents, display records, sorting, errors
//! - [`infrastructure`]: Filesystem locations
//! - [`observability`]: Tracing subscriber and span export
//! - [`pipeline`]: Async runtime tying the layers together
//! - [`ui`]: View model published to the presentation surface
//! - [`worker`]: Search task spawning and cancellation
//!
//! # Configuration
//!
//! Configuration is read from `$XDG_CONFIG_HOME/blogsearch/config.toml`:
//!
//! ```toml
//! api_key = "your-rest-api-key"
//! page_size = 25
//! request_timeout_ms = 5000
//! missing_datetime = "last"
//! trace_level = "debug"
//! trace_export = true
//! ```
//!
//! `BLOGSEARCH_API_KEY` overrides the file's `api_key`.
//!
//! # Key Design Decisions
//!
//! ## Latest Query Wins
//!
//! Each accepted query gets a new generation number:
//! - The worker aborts the previous search task before spawning the next
//! - Responses whose generation is not current are dropped by the state
//!
//! ## Immutable View Models
//!
//! The list is published as a computed snapshot:
//! - Only when the displayed records or the sort criterion change
//! - A failed search keeps the current list and raises an alert instead

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod pipeline;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, Alert, AlertAction, AppState, Event};
pub use client::KakaoSearchClient;
pub use domain::{BlogSearchError, DisplayRecord, MissingDatetime, Result, SearchFailed, SortCriterion};
pub use pipeline::{Intent, PipelineOutputs, QueryPipeline};
pub use ui::ListViewModel;

use client::kakao::DEFAULT_ENDPOINT;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Environment variable overriding [`Config::api_key`].
pub const API_KEY_ENV: &str = "BLOGSEARCH_API_KEY";

/// Allowed range for [`Config::page_size`].
const PAGE_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=50;

/// Runtime configuration.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
///
/// # Example
///
/// ```toml
/// api_key = "your-rest-api-key"
/// endpoint = "https://dapi.kakao.com/v2/search/blog"
/// page_size = 10
/// missing_datetime = "now"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// REST API key sent as `Authorization: KakaoAK <key>`. Required.
    pub api_key: Option<String>,

    /// Search endpoint URL. Default: the Kakao blog search endpoint.
    pub endpoint: String,

    /// Documents requested per search (`size` parameter), 1 to 50. Default: 10
    pub page_size: u32,

    /// Whole-request timeout in milliseconds. Default: none
    pub request_timeout_ms: Option<u64>,

    /// How records without a datetime are placed in a datetime sort.
    pub missing_datetime: MissingDatetime,

    /// Log level filter when `RUST_LOG` is unset.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Export finished spans to a JSON-lines file. Default: false
    pub trace_export: bool,

    /// Span export file. Default: `blogsearch-spans.json` in the data directory
    pub trace_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: 10,
            request_timeout_ms: None,
            missing_datetime: MissingDatetime::default(),
            trace_level: None,
            trace_export: false,
            trace_file: None,
        }
    }
}

impl Config {
    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`BlogSearchError::Io`] if the file cannot be read and
    /// [`BlogSearchError::Config`] if it is not valid configuration TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| BlogSearchError::Config(format!("{}: {e}", path.display())))
    }

    /// Loads the default config file if it exists, then applies environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// See [`Config::from_file`].
    pub fn load() -> Result<Self> {
        let path = infrastructure::default_config_path();
        let config = if path.is_file() {
            tracing::debug!(path = %path.display(), "loading configuration file");
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    /// Applies `BLOGSEARCH_API_KEY` when it is set and non-empty.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(key) = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Checks that the configuration can drive a search client.
    ///
    /// # Errors
    ///
    /// Returns [`BlogSearchError::Config`] when the API key is missing or
    /// blank, the endpoint is not an absolute `http`/`https` URL, or
    /// `page_size` is outside 1 to 50.
    pub fn validate(&self) -> Result<()> {
        if !self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty()) {
            return Err(BlogSearchError::Config("api_key is required".to_string()));
        }

        let endpoint = Url::parse(&self.endpoint)
            .map_err(|e| BlogSearchError::Config(format!("invalid endpoint {:?}: {e}", self.endpoint)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(BlogSearchError::Config(format!(
                "endpoint must use http or https, got {:?}",
                endpoint.scheme()
            )));
        }

        if !PAGE_SIZE_RANGE.contains(&self.page_size) {
            return Err(BlogSearchError::Config(format!(
                "page_size must be between {} and {}, got {}",
                PAGE_SIZE_RANGE.start(),
                PAGE_SIZE_RANGE.end(),
                self.page_size
            )));
        }

        Ok(())
    }
}

/// Builds a ready-to-run pipeline backed by the Kakao client.
///
/// Tracing is not initialized here; call
/// [`observability::init_tracing`] first if logs are wanted.
///
/// # Errors
///
/// Returns [`BlogSearchError::Config`] if the configuration is invalid.
///
/// # Example
///
/// ```rust
/// use blogsearch::{initialize, Config};
///
/// let config = Config {
///     api_key: Some("key".to_string()),
///     ..Default::default()
/// };
///
/// let (pipeline, outputs) = initialize(&config)?;
/// assert!(outputs.list.borrow().records.is_empty());
/// # drop(pipeline);
/// # Ok::<(), blogsearch::BlogSearchError>(())
/// ```
pub fn initialize(config: &Config) -> Result<(QueryPipeline, PipelineOutputs)> {
    tracing::debug!("initializing blog search pipeline");

    let client = KakaoSearchClient::new(config)?;
    Ok(QueryPipeline::new(Arc::new(client), config.missing_datetime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    fn valid() -> Config {
        Config {
            api_key: Some("key".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.missing_datetime, MissingDatetime::Now);
        assert!(!config.trace_export);
    }

    #[test]
    fn from_file_reads_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api_key = \"abc\"\npage_size = 30\nmissing_datetime = \"last\"\ntrace_export = true"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.page_size, 30);
        assert_eq!(config.missing_datetime, MissingDatetime::Last);
        assert!(config.trace_export);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = \"ten\"").unwrap();

        assert!(matches!(
            Config::from_file(file.path()),
            Err(BlogSearchError::Config(_))
        ));
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::from_file(dir.path().join("absent.toml")),
            Err(BlogSearchError::Io(_))
        ));
    }

    #[test]
    fn valid_config_passes() {
        assert!(valid().validate().is_ok());
    }

    #[rstest]
    #[case::no_key(Config { api_key: None, ..valid() })]
    #[case::blank_key(Config { api_key: Some(" ".to_string()), ..valid() })]
    #[case::relative_endpoint(Config { endpoint: "/v2/search/blog".to_string(), ..valid() })]
    #[case::ftp_endpoint(Config { endpoint: "ftp://dapi.kakao.com/blog".to_string(), ..valid() })]
    #[case::zero_page(Config { page_size: 0, ..valid() })]
    #[case::large_page(Config { page_size: 51, ..valid() })]
    fn invalid_configs_are_rejected(#[case] config: Config) {
        assert!(matches!(config.validate(), Err(BlogSearchError::Config(_))));
    }

    #[test]
    fn initialize_requires_api_key() {
        assert!(matches!(
            initialize(&Config::default()),
            Err(BlogSearchError::Config(_))
        ));
    }
}
