//! Blog search payload and display record models.
//!
//! [`BlogPayload`] is what a search client hands back on success: the upstream
//! documents in API order, with every field optional because the API may omit
//! any of them. [`DisplayRecord`] is the normalized projection the pipeline
//! sorts and publishes.

use chrono::{DateTime, Utc};
use url::Url;

/// One blog post as returned by the search API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogDocument {
    /// Thumbnail location as sent by the API, not yet validated.
    pub thumbnail: Option<String>,
    /// Blog (author) name.
    pub name: Option<String>,
    /// Post title with highlight markup removed.
    pub title: Option<String>,
    /// Publication timestamp.
    pub datetime: Option<DateTime<Utc>>,
}

/// Ordered documents of one successful search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPayload {
    pub documents: Vec<BlogDocument>,
}

impl BlogPayload {
    #[must_use]
    pub const fn new(documents: Vec<BlogDocument>) -> Self {
        Self { documents }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Render-ready projection of a [`BlogDocument`].
///
/// Records are built fresh for every successful response and are never
/// mutated afterwards; a new response replaces the whole set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    /// Parsed thumbnail URL, `None` when absent or not a valid absolute URL.
    pub thumbnail_url: Option<Url>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
}

impl DisplayRecord {
    /// Title used as the sort key; empty when the document has none.
    #[must_use]
    pub fn title_key(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}
