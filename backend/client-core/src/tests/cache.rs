// Unit tests for the cached collection state machine

use crate::cache::{CachedCollection, CollectionSource};
use crate::error::gateway::GatewayError;
use crate::view::{MemoryView, Region, View};

use common::{ErrorLocation, HttpStatusCode};
use models::Station;

use std::collections::VecDeque;
use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::sync::oneshot;

const ITEM_CLASS: &str = "class=\"station-list-item\"";

type Response = Result<Vec<Station>, GatewayError>;

/// Scripted source: each fetch pops the next response, optionally held by a gate.
#[derive(Clone, Default)]
struct ScriptedSource {
    responses: Arc<Mutex<VecDeque<Response>>>,
    gate: Arc<Mutex<Option<oneshot::Receiver<()>>>>,
    fetches: Arc<AtomicUsize>,
}

impl ScriptedSource {
    fn respond(&self, response: Response) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn hold_next_fetch(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(rx);
        tx
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl CollectionSource for ScriptedSource {
    type Item = Station;

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn fetch(&self) -> BoxFuture<'static, Response> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()));
        let gate = self.gate.lock().unwrap().take();
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            response
        }
        .boxed()
    }

    fn render_item(&self, item: &Station) -> String {
        format!(r#"<li class="station-list-item">{}</li>"#, item.name)
    }
}

fn stations(names: &[&str]) -> Vec<Station> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| Station {
            id: index as u64 + 1,
            name: name.to_string(),
        })
        .collect()
}

fn server_error() -> GatewayError {
    GatewayError::Status {
        status: HttpStatusCode(500),
        message: "boom".to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

fn collection(source: &ScriptedSource) -> CachedCollection<ScriptedSource> {
    CachedCollection::new(source.clone(), Region::StationList)
}

/// **VALUE**: Verifies a valid collection is served without a network call.
///
/// **WHY THIS MATTERS**: Revisiting the stations page must not refetch.
///
/// **BUG THIS CATCHES**: Would catch `ensure_view` fetching unconditionally.
#[tokio::test]
async fn given_valid_collection_when_ensuring_view_twice_then_fetches_once() {
    let source = ScriptedSource::default();
    source.respond(Ok(stations(&["Gangnam", "Yeoksam", "Jamsil"])));
    let cache = collection(&source);

    let first = cache.ensure_view().await.unwrap();
    let second = cache.ensure_view().await.unwrap();

    assert_eq!(source.fetches(), 1);
    assert_eq!(cache.fetch_count(), 1);
    assert_eq!(first, second);
    assert_eq!(first.matches(ITEM_CLASS).count(), 3);
    assert!(cache.is_valid());
}

/// **VALUE**: Verifies overlapping callers share one in-flight fetch.
///
/// **BUG THIS CATCHES**: Would catch two page renders racing into two GETs.
#[tokio::test]
async fn given_concurrent_callers_when_collection_invalid_then_single_fetch_shared() {
    let source = ScriptedSource::default();
    source.respond(Ok(stations(&["Gangnam", "Yeoksam"])));
    let release = source.hold_next_fetch();
    let cache = collection(&source);

    let open = async {
        release.send(()).unwrap();
    };
    let (a, b, ()) = tokio::join!(cache.ensure_view(), cache.ensure_view(), open);

    assert_eq!(source.fetches(), 1);
    assert_eq!(a.unwrap(), b.unwrap());
    assert!(cache.is_valid());
}

#[tokio::test]
async fn given_invalidated_collection_when_ensuring_view_then_refetches() {
    let source = ScriptedSource::default();
    source.respond(Ok(stations(&["Gangnam"])));
    source.respond(Ok(stations(&["Gangnam", "Jamsil"])));
    let cache = collection(&source);
    cache.ensure_view().await.unwrap();

    cache.invalidate();
    assert!(!cache.is_valid());
    let view = cache.ensure_view().await.unwrap();

    assert_eq!(source.fetches(), 2);
    assert!(view.contains("Jamsil"));
    assert_eq!(cache.items().len(), 2);
}

/// **VALUE**: Verifies a failed fetch keeps the last known-good state.
///
/// **WHY THIS MATTERS**: A flaky network must not wipe out data the user
/// already has, and the next visit must try again.
///
/// **BUG THIS CATCHES**: Would catch a failure clearing items or leaving the
/// collection stuck in the building state.
#[tokio::test]
async fn given_fetch_failure_when_ensuring_view_then_state_is_preserved() {
    let source = ScriptedSource::default();
    source.respond(Ok(stations(&["Gangnam", "Yeoksam"])));
    source.respond(Err(server_error()));
    source.respond(Ok(stations(&["Gangnam", "Yeoksam"])));
    let cache = collection(&source);
    cache.ensure_view().await.unwrap();
    cache.invalidate();

    let error = cache.ensure_view().await.unwrap_err();

    assert_eq!(error.status(), Some(HttpStatusCode(500)));
    assert!(!cache.is_valid());
    assert_eq!(cache.items(), stations(&["Gangnam", "Yeoksam"]));

    cache.ensure_view().await.unwrap();
    assert_eq!(source.fetches(), 3, "failure must leave the cache retryable");
    assert!(cache.is_valid());
}

/// **VALUE**: Verifies an optimistic append shows the item once, now and after reload.
///
/// **WHY THIS MATTERS**: The freshly created line must appear immediately and
/// must not be duplicated when the list is rebuilt from the server.
///
/// **BUG THIS CATCHES**: Would catch the new item being pushed into the cached
/// items as well as being returned by the refetch.
#[tokio::test]
async fn given_optimistic_append_when_view_rebuilt_then_item_appears_once() {
    let source = ScriptedSource::default();
    source.respond(Ok(stations(&["Gangnam", "Yeoksam"])));
    source.respond(Ok(stations(&["Gangnam", "Yeoksam", "Jamsil"])));
    let cache = collection(&source);
    let view = MemoryView::new();
    let list = cache.ensure_view().await.unwrap();
    view.replace_main(&format!(r#"<ul class="station-list-wrapper">{list}</ul>"#));

    let created = Station {
        id: 3,
        name: "Jamsil".to_string(),
    };
    cache.append_optimistically(&created, &view);

    assert_eq!(view.snapshot().count_in_main(ITEM_CLASS), 3);
    assert!(!cache.is_valid());
    assert_eq!(cache.items().len(), 2);

    cache.refresh_region(&view).await.unwrap();

    let snapshot = view.snapshot();
    assert_eq!(snapshot.count_in_main(ITEM_CLASS), 3);
    assert_eq!(snapshot.count_in_main("Jamsil"), 1);
    assert_eq!(source.fetches(), 2);
}

/// **VALUE**: Verifies appended items count as known until a build replaces them.
///
/// **WHY THIS MATTERS**: Duplicate-name and used-color checks run against the
/// known items; a just-created entity must block an identical second create.
///
/// **BUG THIS CATCHES**: Would catch pending items being invisible to checks,
/// or lingering after the refetch and showing up twice.
#[tokio::test]
async fn given_optimistic_append_when_listing_known_items_then_pending_included_until_rebuild() {
    let source = ScriptedSource::default();
    source.respond(Ok(stations(&["Gangnam"])));
    source.respond(Ok(stations(&["Gangnam", "Jamsil"])));
    let cache = collection(&source);
    let view = MemoryView::new();
    cache.ensure_view().await.unwrap();

    let created = Station {
        id: 2,
        name: "Jamsil".to_string(),
    };
    cache.append_optimistically(&created, &view);

    let names: Vec<String> = cache.known_items().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Gangnam", "Jamsil"]);
    assert_eq!(cache.items().len(), 1);

    cache.ensure_view().await.unwrap();

    let names: Vec<String> = cache.known_items().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Gangnam", "Jamsil"]);
}

/// **VALUE**: Verifies a build finishing after an invalidation is not cached.
///
/// **BUG THIS CATCHES**: Would catch pre-mutation data being marked valid,
/// hiding the mutation until the next invalidation.
#[tokio::test]
async fn given_invalidation_during_fetch_when_fetch_completes_then_result_not_cached() {
    let source = ScriptedSource::default();
    source.respond(Ok(stations(&["Gangnam"])));
    source.respond(Ok(stations(&["Gangnam", "Jamsil"])));
    let release = source.hold_next_fetch();
    let cache = collection(&source);

    let mutate = async {
        cache.invalidate();
        release.send(()).unwrap();
    };
    let (stale, ()) = tokio::join!(cache.ensure_view(), mutate);

    assert!(stale.unwrap().contains("Gangnam"));
    assert!(!cache.is_valid());

    let fresh = cache.ensure_view().await.unwrap();
    assert!(fresh.contains("Jamsil"));
    assert_eq!(source.fetches(), 2);
}

#[tokio::test]
async fn given_region_missing_from_page_when_refreshing_then_view_is_untouched() {
    let source = ScriptedSource::default();
    source.respond(Ok(stations(&["Gangnam"])));
    let cache = collection(&source);
    let view = MemoryView::new();
    view.replace_main("<p>home</p>");

    cache.refresh_region(&view).await.unwrap();

    assert_eq!(view.snapshot().main, "<p>home</p>");
}
