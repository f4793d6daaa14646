//! Path-based view router.
//!
//! Maps a path to a [`Page`], asks the [`PageRenderer`] for its markup and
//! swaps it into the view's main content region.
//!
//! # Ordering
//!
//! - `route` pushes history before any asynchronous rendering starts
//! - `render` never pushes history (popstate handling goes through it)
//! - Navigations may overlap; the last one started wins. Each render takes a
//!   ticket from a monotonically increasing counter and only writes the view
//!   if no newer navigation has started since. A page's load-failure alert
//!   is shown only for the navigation that wins.

pub mod history;
pub mod route;

pub use history::{History, MemoryHistory};
pub use route::{
    HOME_PATH, LINES_PATH, Page, Resolved, Route, SECTIONS_PATH, SIGN_IN_PATH, SIGN_OUT_PATH,
    SIGN_UP_PATH, STATIONS_PATH, normalize_path,
};

use crate::templates;
use crate::view::View;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::future::BoxFuture;
use log::{debug, info, warn};

/// Markup for a page, plus an alert to raise if this page ends up on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub markup: String,
    pub alert: Option<String>,
}

impl RenderedPage {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            alert: None,
        }
    }

    pub fn with_alert(markup: impl Into<String>, alert: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            alert: Some(alert.into()),
        }
    }
}

/// Produces the markup for a page. Failures are handled inside the renderer;
/// it always yields something to show.
pub trait PageRenderer: Send + Sync {
    fn render(&self, page: Page) -> BoxFuture<'_, RenderedPage>;
}

/// How a navigation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The view now shows this navigation's result.
    Rendered(Resolved),
    /// A newer navigation started first; this result was discarded.
    Superseded,
}

impl Navigation {
    /// Page shown, if this navigation won and matched a route.
    pub fn page(&self) -> Option<Page> {
        match self {
            Navigation::Rendered(Resolved::Page(page)) => Some(*page),
            _ => None,
        }
    }
}

pub struct Router {
    routes: Vec<Route>,
    renderer: Arc<dyn PageRenderer>,
    view: Arc<dyn View>,
    history: Arc<dyn History>,
    latest_ticket: AtomicU64,
}

impl Router {
    pub fn new(
        renderer: Arc<dyn PageRenderer>,
        view: Arc<dyn View>,
        history: Arc<dyn History>,
    ) -> Self {
        Self::with_routes(Route::table(), renderer, view, history)
    }

    pub fn with_routes(
        routes: Vec<Route>,
        renderer: Arc<dyn PageRenderer>,
        view: Arc<dyn View>,
        history: Arc<dyn History>,
    ) -> Self {
        Self {
            routes,
            renderer,
            view,
            history,
            latest_ticket: AtomicU64::new(0),
        }
    }

    pub fn resolve(&self, path: &str) -> Resolved {
        let normalized = normalize_path(path);
        self.routes
            .iter()
            .find(|route| route.pattern == normalized)
            .map_or(Resolved::NotFound, |route| Resolved::Page(route.page))
    }

    pub fn current_path(&self) -> Option<String> {
        self.history.current()
    }

    /// Push `path` onto history, then render it.
    pub async fn route(&self, path: &str) -> Navigation {
        self.history.push(path);
        info!("Navigating to {path}");
        self.render(path).await
    }

    /// Render `path` into the main content region without touching history.
    pub async fn render(&self, path: &str) -> Navigation {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let resolved = self.resolve(path);

        let rendered = match resolved {
            Resolved::Page(page) => self.renderer.render(page).await,
            Resolved::NotFound => {
                warn!("No route for {path} - rendering not-found view");
                RenderedPage::new(templates::not_found_page(path))
            }
        };

        let latest = self.latest_ticket.load(Ordering::SeqCst);
        if latest != ticket {
            debug!("Discarding render of {path} (ticket {ticket}, latest {latest})");
            return Navigation::Superseded;
        }

        self.view.replace_main(&rendered.markup);
        if let Some(alert) = rendered.alert {
            self.view.alert(&alert);
        }
        debug!("Rendered {path}");
        Navigation::Rendered(resolved)
    }
}
