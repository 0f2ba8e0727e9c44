//! End-to-end tests for the query pipeline with scripted search clients.

use blogsearch::app::alert::{AlertKind, SEARCH_ERROR_MESSAGE, SEARCH_ERROR_TITLE};
use blogsearch::client::{SearchClient, SearchResult};
use blogsearch::domain::{BlogDocument, BlogPayload};
use blogsearch::{
    AlertAction, Intent, MissingDatetime, PipelineOutputs, QueryPipeline, SearchFailed,
    SortCriterion,
};
use chrono::{TimeZone, Utc};
use futures_util::future::{self, BoxFuture};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// Answers immediately from a fixed table and counts calls.
#[derive(Default)]
struct ScriptedClient {
    results: HashMap<String, SearchResult>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    fn with(mut self, query: &str, result: SearchResult) -> Self {
        self.results.insert(query.to_string(), result);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SearchClient for ScriptedClient {
    fn search(&self, query: &str) -> BoxFuture<'static, SearchResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .results
            .get(query)
            .cloned()
            .unwrap_or_else(|| Ok(BlogPayload::default()));
        Box::pin(future::ready(result))
    }
}

/// Holds every search open until the test releases it.
#[derive(Default)]
struct GatedClient {
    gates: Mutex<HashMap<String, oneshot::Sender<SearchResult>>>,
}

impl GatedClient {
    fn release(&self, query: &str, result: SearchResult) {
        if let Some(tx) = self.gates.lock().unwrap().remove(query) {
            let _ = tx.send(result);
        }
    }
}

impl SearchClient for GatedClient {
    fn search(&self, query: &str) -> BoxFuture<'static, SearchResult> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(query.to_string(), tx);
        Box::pin(async move {
            rx.await
                .unwrap_or_else(|_| Err(SearchFailed::new("gate dropped")))
        })
    }
}

fn titled(titles: &[&str]) -> BlogPayload {
    BlogPayload::new(
        titles
            .iter()
            .map(|t| BlogDocument {
                title: Some((*t).to_string()),
                ..Default::default()
            })
            .collect(),
    )
}

fn pipeline(client: Arc<dyn SearchClient>) -> (QueryPipeline, PipelineOutputs) {
    QueryPipeline::new(client, MissingDatetime::Now)
}

fn displayed_titles(outputs: &PipelineOutputs) -> Vec<String> {
    outputs
        .list
        .borrow()
        .records
        .iter()
        .map(|r| r.title_key().to_string())
        .collect()
}

#[tokio::test]
async fn payload_documents_become_records_in_order() {
    let client = Arc::new(ScriptedClient::default().with("rust", Ok(titled(&["c", "a", "b"]))));
    let (mut pipeline, outputs) = pipeline(client);

    pipeline.submit_query("rust").unwrap();
    pipeline.next_response().await.unwrap();

    let held: Vec<_> = pipeline
        .state()
        .records
        .as_ref()
        .unwrap()
        .iter()
        .map(|r| r.title_key().to_string())
        .collect();
    assert_eq!(held, ["c", "a", "b"]);
    assert_eq!(displayed_titles(&outputs), ["a", "b", "c"]);
    assert_eq!(outputs.list.borrow().header.title, "rust (3)");
}

#[tokio::test]
async fn repeated_query_issues_one_request() {
    let client = Arc::new(ScriptedClient::default());
    let (mut pipeline, _outputs) = pipeline(client.clone());

    pipeline.submit_query("rust").unwrap();
    pipeline.next_response().await.unwrap();
    pipeline.submit_query("rust").unwrap();
    pipeline.submit_query("  rust  ").unwrap();
    pipeline.submit_query("   ").unwrap();
    assert_eq!(client.calls(), 1);

    pipeline.submit_query("go").unwrap();
    pipeline.submit_query("rust").unwrap();
    assert_eq!(client.calls(), 3);
}

#[tokio::test]
async fn failure_keeps_list_and_alerts_once() {
    let client = Arc::new(
        ScriptedClient::default()
            .with("rust", Ok(titled(&["ownership"])))
            .with("go", Err(SearchFailed::network("connection reset"))),
    );
    let (mut pipeline, mut outputs) = pipeline(client);

    pipeline.submit_query("rust").unwrap();
    pipeline.next_response().await.unwrap();
    outputs.list.borrow_and_update();

    pipeline.submit_query("go").unwrap();
    pipeline.next_response().await.unwrap();

    assert!(!outputs.list.has_changed().unwrap());
    assert_eq!(displayed_titles(&outputs), ["ownership"]);

    let alert = outputs.alerts.try_recv().unwrap();
    assert_eq!(alert.kind, AlertKind::SearchError);
    assert_eq!(alert.title.as_deref(), Some(SEARCH_ERROR_TITLE));
    assert_eq!(alert.message.as_deref(), Some(SEARCH_ERROR_MESSAGE));
    assert!(alert.detail.unwrap().contains("connection reset"));
    assert!(outputs.alerts.try_recv().is_err());
}

#[tokio::test]
async fn superseded_search_never_displays() {
    let client = Arc::new(GatedClient::default());
    let (mut pipeline, outputs) = pipeline(client.clone());

    pipeline.submit_query("first").unwrap();
    tokio::task::yield_now().await;
    pipeline.submit_query("second").unwrap();
    tokio::task::yield_now().await;

    client.release("first", Ok(titled(&["stale"])));
    client.release("second", Ok(titled(&["fresh"])));

    pipeline.next_response().await.unwrap();
    assert_eq!(displayed_titles(&outputs), ["fresh"]);
    assert_eq!(outputs.list.borrow().query.as_deref(), Some("second"));

    let extra = tokio::time::timeout(Duration::from_millis(50), pipeline.next_response()).await;
    assert!(extra.is_err());
    assert_eq!(displayed_titles(&outputs), ["fresh"]);
}

#[tokio::test]
async fn datetime_sort_through_alert() {
    let older = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let newer = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let payload = BlogPayload::new(vec![
        BlogDocument {
            title: Some("a-old".into()),
            datetime: Some(older),
            ..Default::default()
        },
        BlogDocument {
            title: Some("b-new".into()),
            datetime: Some(newer),
            ..Default::default()
        },
    ]);
    let client = Arc::new(ScriptedClient::default().with("rust", Ok(payload)));
    let (mut pipeline, mut outputs) = pipeline(client);

    pipeline.submit_query("rust").unwrap();
    pipeline.next_response().await.unwrap();
    assert_eq!(displayed_titles(&outputs), ["a-old", "b-new"]);
    outputs.list.borrow_and_update();

    pipeline.request_sort().unwrap();
    let alert = outputs.alerts.try_recv().unwrap();
    assert_eq!(alert.kind, AlertKind::SortOptions);

    pipeline.choose(alert.id, AlertAction::Datetime).unwrap();

    assert!(outputs.list.has_changed().unwrap());
    let list = outputs.list.borrow_and_update().clone();
    assert_eq!(list.criterion, SortCriterion::ByDatetime);
    assert_eq!(list.header.sort_label, "Sort: Datetime");
    assert_eq!(displayed_titles(&outputs), ["b-new", "a-old"]);
}

#[tokio::test]
async fn cancel_and_stale_answers_change_nothing() {
    let client = Arc::new(ScriptedClient::default().with("rust", Ok(titled(&["b", "a"]))));
    let (mut pipeline, mut outputs) = pipeline(client);

    pipeline.submit_query("rust").unwrap();
    pipeline.next_response().await.unwrap();
    outputs.list.borrow_and_update();

    pipeline.request_sort().unwrap();
    let first = outputs.alerts.try_recv().unwrap();
    pipeline.choose(first.id, AlertAction::Cancel).unwrap();

    pipeline.request_sort().unwrap();
    let second = outputs.alerts.try_recv().unwrap();
    pipeline.choose(first.id, AlertAction::Datetime).unwrap();
    pipeline.choose(second.id, AlertAction::Confirm).unwrap();

    assert!(!outputs.list.has_changed().unwrap());
    assert_eq!(pipeline.state().criterion, SortCriterion::ByTitle);
    assert!(pipeline.state().pending_alert.is_some());
}

#[tokio::test]
async fn sort_choice_before_any_search_updates_published_header() {
    let (mut pipeline, mut outputs) = pipeline(Arc::new(ScriptedClient::default()));
    outputs.list.borrow_and_update();

    pipeline.request_sort().unwrap();
    let alert = outputs.alerts.try_recv().unwrap();
    pipeline.choose(alert.id, AlertAction::Datetime).unwrap();

    assert!(outputs.list.has_changed().unwrap());
    let list = outputs.list.borrow_and_update();
    assert_eq!(list.criterion, SortCriterion::ByDatetime);
    assert_eq!(list.header.sort_label, "Sort: Datetime");
    assert!(list.records.is_empty());
}

#[tokio::test]
async fn criterion_survives_new_query() {
    let client = Arc::new(
        ScriptedClient::default()
            .with("rust", Ok(titled(&["x"])))
            .with("go", Ok(titled(&["b", "a"]))),
    );
    let (mut pipeline, mut outputs) = pipeline(client);

    pipeline.request_sort().unwrap();
    let alert = outputs.alerts.try_recv().unwrap();
    pipeline.choose(alert.id, AlertAction::Datetime).unwrap();

    pipeline.submit_query("go").unwrap();
    pipeline.next_response().await.unwrap();

    let list = outputs.list.borrow();
    assert_eq!(list.criterion, SortCriterion::ByDatetime);
    assert_eq!(list.records.len(), 2);
}

#[tokio::test]
async fn run_processes_intents_until_closed() {
    let client = Arc::new(ScriptedClient::default().with("rust", Ok(titled(&["ownership"]))));
    let (pipeline, mut outputs) = pipeline(client);

    let (intents, intent_rx) = mpsc::channel(8);
    let runner = tokio::spawn(pipeline.run(intent_rx));

    intents
        .send(Intent::SubmitQuery("rust".into()))
        .await
        .unwrap();
    tokio::time::timeout(Duration::from_secs(1), outputs.list.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(displayed_titles(&outputs), ["ownership"]);

    intents.send(Intent::RequestSort).await.unwrap();
    let alert = tokio::time::timeout(Duration::from_secs(1), outputs.alerts.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(alert.kind, AlertKind::SortOptions);

    drop(intents);
    runner.await.unwrap().unwrap();
}
