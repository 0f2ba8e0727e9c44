//! JSON-lines span exporter with size-based rotation.
//!
//! Each finished span is written as one JSON object per line. When the file
//! grows past [`MAX_FILE_BYTES`] it is renamed to `<file>.1` (replacing any
//! older backup) and a fresh file is started.

use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::SystemTime;

/// Size at which the trace file is rotated (5 MB).
const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Writes finished spans to a rotating JSON-lines file.
#[derive(Debug)]
pub struct SpanFileExporter {
    path: PathBuf,
    max_bytes: u64,
    file: Mutex<Option<File>>,
    service_name: String,
    is_shutdown: AtomicBool,
}

impl SpanFileExporter {
    /// Creates an exporter writing to `path`. The file is opened lazily.
    #[must_use]
    pub fn new(path: PathBuf, service_name: &str) -> Self {
        Self::with_max_bytes(path, service_name, MAX_FILE_BYTES)
    }

    #[must_use]
    pub fn with_max_bytes(path: PathBuf, service_name: &str, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            file: Mutex::new(None),
            service_name: service_name.to_string(),
            is_shutdown: AtomicBool::new(false),
        }
    }

    /// Appends one line per span, rotating first if the file is too large.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening, or writing the file.
    pub fn write_spans(&self, batch: &[SpanData]) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("trace file lock poisoned"))?;

        self.rotate_if_needed(&mut guard)?;

        if guard.is_none() {
            *guard = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }

        if let Some(file) = guard.as_mut() {
            for span in batch {
                writeln!(file, "{}", span_to_json(span, &self.service_name))?;
            }
            file.flush()?;
        }
        Ok(())
    }

    fn rotate_if_needed(&self, handle: &mut Option<File>) -> io::Result<()> {
        let Ok(metadata) = fs::metadata(&self.path) else {
            return Ok(());
        };
        if metadata.len() < self.max_bytes {
            return Ok(());
        }

        *handle = None;
        fs::rename(&self.path, backup_path(&self.path))
    }
}

impl SpanExporter for SpanFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown.load(Ordering::SeqCst) {
            Err(TraceError::from("exporter is shut down"))
        } else {
            self.write_spans(&batch)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

/// Creates a tracer provider that exports every span as soon as it ends.
#[must_use]
pub fn create_tracer_provider(path: PathBuf, service_name: &'static str) -> TracerProvider {
    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        service_name,
    )]);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(SpanFileExporter::new(path, service_name))
        .build()
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".1");
    PathBuf::from(name)
}

fn timestamp(time: SystemTime) -> String {
    chrono::DateTime::<chrono::Utc>::from(time)
        .to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

fn attributes_to_json(attributes: &[opentelemetry::KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| {
            (
                kv.key.to_string(),
                JsonValue::String(kv.value.as_str().into_owned()),
            )
        })
        .collect();
    JsonValue::Object(map)
}

fn span_to_json(span: &SpanData, service_name: &str) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        JsonValue::Null
    } else {
        JsonValue::String(format!("{:016x}", span.parent_span_id))
    };

    let duration_us = span
        .end_time
        .duration_since(span.start_time)
        .unwrap_or_default()
        .as_micros();

    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| {
            json!({
                "time": timestamp(event.timestamp),
                "name": event.name,
                "attributes": attributes_to_json(&event.attributes),
            })
        })
        .collect();

    let status = match &span.status {
        Status::Unset => JsonValue::Null,
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description }),
    };

    json!({
        "service": service_name,
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "start": timestamp(span.start_time),
        "durationUs": u64::try_from(duration_us).unwrap_or(u64::MAX),
        "attributes": attributes_to_json(&span.attributes),
        "events": events,
        "status": status,
    })
}
