//! Search clients for the upstream blog search API.
//!
//! The [`SearchClient`] trait is the seam between the pipeline and the
//! network. The worker only needs a future that resolves to a
//! [`SearchResult`]; it owns cancellation, so clients never track in-flight
//! requests themselves.
//!
//! # Modules
//!
//! - [`kakao`]: reqwest-based client for the Kakao (Daum) blog search API

pub mod kakao;

pub use kakao::KakaoSearchClient;

use crate::domain::{BlogPayload, SearchFailed};
use futures_util::future::BoxFuture;

/// Outcome of one search: the payload or the reason it failed.
pub type SearchResult = std::result::Result<BlogPayload, SearchFailed>;

/// Issues a search request for a query string.
///
/// Returned futures must be `'static` so they can run on a spawned task that
/// outlives the borrow of the client; implementations typically clone a cheap
/// handle (such as a `reqwest::Client`) into the future.
///
/// # Examples
///
/// ```
/// use blogsearch::client::{SearchClient, SearchResult};
/// use blogsearch::domain::BlogPayload;
/// use futures_util::future::{self, BoxFuture};
///
/// struct EmptyClient;
///
/// impl SearchClient for EmptyClient {
///     fn search(&self, _query: &str) -> BoxFuture<'static, SearchResult> {
///         Box::pin(future::ready(Ok(BlogPayload::default())))
///     }
/// }
/// ```
pub trait SearchClient: Send + Sync {
    /// Starts a search for `query`.
    fn search(&self, query: &str) -> BoxFuture<'static, SearchResult>;
}
