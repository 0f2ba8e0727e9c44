//! Projection of search payloads into display records.

use super::document::{BlogDocument, BlogPayload, DisplayRecord};
use url::Url;

/// Maps every document of a payload to a [`DisplayRecord`], preserving order.
///
/// The mapping is total: documents are never dropped, even when every field
/// is empty. A thumbnail that does not parse as an absolute URL becomes `None`.
///
/// # Examples
///
/// ```
/// use blogsearch::domain::{map_to_display_records, BlogDocument, BlogPayload};
///
/// let payload = BlogPayload::new(vec![
///     BlogDocument { title: Some("Rust".into()), ..Default::default() },
///     BlogDocument::default(),
/// ]);
///
/// let records = map_to_display_records(&payload);
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].title.as_deref(), Some("Rust"));
/// ```
#[must_use]
pub fn map_to_display_records(payload: &BlogPayload) -> Vec<DisplayRecord> {
    payload.documents.iter().map(to_display_record).collect()
}

fn to_display_record(document: &BlogDocument) -> DisplayRecord {
    DisplayRecord {
        thumbnail_url: document.thumbnail.as_deref().and_then(parse_thumbnail),
        name: document.name.clone(),
        title: document.title.clone(),
        datetime: document.datetime,
    }
}

fn parse_thumbnail(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    match Url::parse(trimmed) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::trace!(thumbnail = %trimmed, error = %e, "discarding unparseable thumbnail");
            None
        }
    }
}
