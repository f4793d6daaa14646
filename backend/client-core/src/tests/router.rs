// Unit tests for the router
// Covers fallback rendering, history ordering and last-navigation-wins

use crate::router::{
    History, MemoryHistory, Navigation, Page, PageRenderer, RenderedPage, Resolved, Router,
    normalize_path,
};
use crate::view::{MemoryView, View};

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::sync::oneshot;

/// Renders `<p>{path}</p>`, optionally holding a page until its gate opens.
/// Failing pages come back with a load alert.
struct GatedRenderer {
    history: Arc<MemoryHistory>,
    gates: Mutex<HashMap<Page, oneshot::Receiver<()>>>,
    failing: Mutex<HashSet<Page>>,
    history_at_render: Mutex<Vec<Option<String>>>,
}

impl GatedRenderer {
    fn new(history: Arc<MemoryHistory>) -> Self {
        Self {
            history,
            gates: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            history_at_render: Mutex::new(Vec::new()),
        }
    }

    fn gate(&self, page: Page) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(page, rx);
        tx
    }

    fn fail(&self, page: Page) {
        self.failing.lock().unwrap().insert(page);
    }
}

impl PageRenderer for GatedRenderer {
    fn render(&self, page: Page) -> BoxFuture<'_, RenderedPage> {
        self.history_at_render
            .lock()
            .unwrap()
            .push(self.history.current());
        let gate = self.gates.lock().unwrap().remove(&page);
        let failing = self.failing.lock().unwrap().contains(&page);
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            let markup = format!("<p>{page}</p>");
            if failing {
                RenderedPage::with_alert(markup, format!("{page} failed to load"))
            } else {
                RenderedPage::new(markup)
            }
        }
        .boxed()
    }
}

struct Fixture {
    router: Router,
    renderer: Arc<GatedRenderer>,
    history: Arc<MemoryHistory>,
    view: Arc<MemoryView>,
}

fn fixture() -> Fixture {
    let history = Arc::new(MemoryHistory::starting_at("/"));
    let renderer = Arc::new(GatedRenderer::new(Arc::clone(&history)));
    let view = Arc::new(MemoryView::new());
    let router = Router::new(
        Arc::clone(&renderer) as Arc<dyn PageRenderer>,
        Arc::clone(&view) as Arc<dyn View>,
        Arc::clone(&history) as Arc<dyn History>,
    );
    Fixture {
        router,
        renderer,
        history,
        view,
    }
}

/// **VALUE**: Verifies unmatched paths resolve to the not-found view instead of hanging.
///
/// **WHY THIS MATTERS**: A hand-typed URL or a stale link must still leave the
/// user with something on screen.
///
/// **BUG THIS CATCHES**: Would catch a missing fallback branch that leaves the
/// previous page in place or never resolves.
#[tokio::test]
async fn given_unknown_path_when_rendering_then_shows_not_found_view() {
    let f = fixture();

    for path in ["/nope", "/lines/42", "lines", "/sign%20in"] {
        let navigation = f.router.render(path).await;

        assert_eq!(navigation, Navigation::Rendered(Resolved::NotFound));
        assert!(f.view.snapshot().main.contains("Page not found"), "{path}");
    }
}

#[test]
fn given_paths_with_query_or_trailing_slash_when_normalized_then_match_routes() {
    assert_eq!(normalize_path("/lines/"), "/lines");
    assert_eq!(normalize_path("/lines?page=2"), "/lines");
    assert_eq!(normalize_path("/stations#top"), "/stations");
    assert_eq!(normalize_path(""), "/");
    assert_eq!(normalize_path("///"), "/");
}

/// **VALUE**: Verifies history is pushed before the page action starts.
///
/// **BUG THIS CATCHES**: Would catch `route` rendering first and pushing after,
/// which leaves the wrong history entry if the user navigates mid-render.
#[tokio::test]
async fn given_route_when_page_action_runs_then_history_already_has_path() {
    let f = fixture();

    f.router.route("/stations").await;

    let seen = f.renderer.history_at_render.lock().unwrap().clone();
    assert_eq!(seen, vec![Some(String::from("/stations"))]);
    assert_eq!(f.history.len(), 2);
}

/// **VALUE**: Verifies `render` (the popstate path) never pushes history.
///
/// **BUG THIS CATCHES**: Would catch back/forward creating new entries, which
/// turns the back button into a loop.
#[tokio::test]
async fn given_render_when_called_then_history_is_unchanged() {
    let f = fixture();
    f.router.route("/lines").await;
    let depth = f.history.len();

    let navigation = f.router.render("/").await;

    assert_eq!(navigation, Navigation::Rendered(Resolved::Page(Page::Home)));
    assert_eq!(f.history.len(), depth);
    assert_eq!(f.history.current().as_deref(), Some("/lines"));
}

/// **VALUE**: Verifies a slow earlier navigation cannot overwrite a newer one.
///
/// **WHY THIS MATTERS**: The lines page waits on the network; the user may
/// click Stations before it answers. Stations must stay on screen.
///
/// **BUG THIS CATCHES**: Would catch the stale render writing the view after
/// the newer navigation completed.
#[tokio::test]
async fn given_slow_first_navigation_when_second_finishes_first_then_second_wins() {
    let f = fixture();
    let release_lines = f.renderer.gate(Page::Lines);

    let release = async {
        release_lines.send(()).unwrap();
    };
    let (first, second, ()) = tokio::join!(
        f.router.route("/lines"),
        f.router.route("/stations"),
        release
    );

    assert_eq!(first, Navigation::Superseded);
    assert_eq!(second, Navigation::Rendered(Resolved::Page(Page::Stations)));
    let snapshot = f.view.snapshot();
    assert_eq!(snapshot.main, "<p>/stations</p>");
    assert_eq!(snapshot.main_writes, 1, "stale render must not touch the view");
    assert_eq!(f.history.current().as_deref(), Some("/stations"));
}

/// **VALUE**: Verifies the last-issued navigation wins when it is also the slowest.
///
/// **BUG THIS CATCHES**: Would catch a "first to finish wins" policy.
#[tokio::test]
async fn given_fast_first_navigation_when_slow_second_finishes_then_second_wins() {
    let f = fixture();
    let release_lines = f.renderer.gate(Page::Lines);

    let release = async {
        release_lines.send(()).unwrap();
    };
    let (first, second, ()) = tokio::join!(
        f.router.route("/stations"),
        f.router.route("/lines"),
        release
    );

    assert_eq!(first, Navigation::Rendered(Resolved::Page(Page::Stations)));
    assert_eq!(second, Navigation::Rendered(Resolved::Page(Page::Lines)));
    assert_eq!(f.view.snapshot().main, "<p>/lines</p>");
}

#[tokio::test]
async fn given_three_overlapping_navigations_when_all_settle_then_only_last_is_visible() {
    let f = fixture();
    let release_home = f.renderer.gate(Page::Home);
    let release_lines = f.renderer.gate(Page::Lines);

    let release = async {
        release_lines.send(()).unwrap();
        release_home.send(()).unwrap();
    };
    let (a, b, c, ()) = tokio::join!(
        f.router.route("/"),
        f.router.route("/lines"),
        f.router.route("/sections"),
        release
    );

    assert_eq!(a, Navigation::Superseded);
    assert_eq!(b, Navigation::Superseded);
    assert_eq!(c.page(), Some(Page::Sections));
    assert_eq!(f.view.snapshot().main, "<p>/sections</p>");
}

/// **VALUE**: Verifies a page's load-failure alert shows when that page wins.
///
/// **BUG THIS CATCHES**: Would catch the alert being dropped along with the
/// data, leaving an empty page with no explanation.
#[tokio::test]
async fn given_failing_page_when_navigation_wins_then_alert_shown_after_markup() {
    let f = fixture();
    f.renderer.fail(Page::Lines);

    let navigation = f.router.route("/lines").await;

    assert_eq!(navigation.page(), Some(Page::Lines));
    let snapshot = f.view.snapshot();
    assert_eq!(snapshot.main, "<p>/lines</p>");
    assert_eq!(snapshot.alerts, vec![String::from("/lines failed to load")]);
}

/// **VALUE**: Verifies a superseded navigation raises no alert of its own.
///
/// **WHY THIS MATTERS**: The user already left the failing page; an alert
/// about it over the page they chose is a stale effect.
///
/// **BUG THIS CATCHES**: Would catch the renderer alerting before the router
/// knows whether its navigation still wins.
#[tokio::test]
async fn given_slow_failing_navigation_when_superseded_then_no_alert() {
    let f = fixture();
    f.renderer.fail(Page::Lines);
    let release_lines = f.renderer.gate(Page::Lines);

    let release = async {
        release_lines.send(()).unwrap();
    };
    let (first, second, ()) = tokio::join!(
        f.router.route("/lines"),
        f.router.route("/stations"),
        release
    );

    assert_eq!(first, Navigation::Superseded);
    assert_eq!(second.page(), Some(Page::Stations));
    let snapshot = f.view.snapshot();
    assert_eq!(snapshot.main, "<p>/stations</p>");
    assert!(snapshot.alerts.is_empty(), "{:?}", snapshot.alerts);
}
