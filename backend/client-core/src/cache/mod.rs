//! Lazily (re)built, locally cached view of a server-held collection.
//!
//! # States
//!
//! - `Invalid`: the next `ensure_view` fetches
//! - `Building`: a fetch is in flight; every `ensure_view` awaits that same fetch
//! - `Valid`: `ensure_view` returns the rendered view without a network call
//!
//! A generation counter is bumped on every `invalidate`. A build that finishes
//! after an invalidation still answers its callers but is not installed.
//! Failed fetches leave items and view as they were.
//!
//! Items appended optimistically are kept as pending until a build is
//! installed, so local checks (duplicate names, used colors) see them.

use crate::error::gateway::GatewayError;
use crate::view::{Region, View};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use log::{debug, info, warn};

/// Where a collection's items come from and how one item renders.
pub trait CollectionSource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    /// Label used in logs.
    fn name(&self) -> &'static str;

    /// Fetch the authoritative collection.
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<Self::Item>, GatewayError>>;

    fn render_item(&self, item: &Self::Item) -> String;
}

type SharedFetch<T> = Shared<BoxFuture<'static, Result<Arc<Vec<T>>, GatewayError>>>;

enum Phase<T> {
    Invalid,
    Building(SharedFetch<T>),
    Valid,
}

struct Inner<T> {
    items: Vec<T>,
    pending: Vec<T>,
    rendered_view: String,
    phase: Phase<T>,
    generation: u64,
    fetches: u64,
}

pub struct CachedCollection<S: CollectionSource> {
    source: S,
    region: Region,
    inner: Mutex<Inner<S::Item>>,
}

impl<S: CollectionSource> CachedCollection<S> {
    /// Starts `Invalid`: nothing is fetched until the first `ensure_view`.
    pub fn new(source: S, region: Region) -> Self {
        Self {
            source,
            region,
            inner: Mutex::new(Inner {
                items: Vec::new(),
                pending: Vec::new(),
                rendered_view: String::new(),
                phase: Phase::Invalid,
                generation: 0,
                fetches: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S::Item>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.lock().phase, Phase::Valid)
    }

    /// Items from the last successful fetch.
    pub fn items(&self) -> Vec<S::Item> {
        self.lock().items.clone()
    }

    /// Cached items followed by those appended since the last installed build.
    pub fn known_items(&self) -> Vec<S::Item> {
        let inner = self.lock();
        inner
            .items
            .iter()
            .chain(inner.pending.iter())
            .cloned()
            .collect()
    }

    /// Number of fetches started over the collection's lifetime.
    pub fn fetch_count(&self) -> u64 {
        self.lock().fetches
    }

    fn render_all(&self, items: &[S::Item]) -> String {
        items
            .iter()
            .map(|item| self.source.render_item(item))
            .collect()
    }

    /// Rendered view of the collection, fetching only when invalid.
    ///
    /// # Errors
    ///
    /// Returns the fetch's [`GatewayError`]; cached state is left untouched.
    pub async fn ensure_view(&self) -> Result<String, GatewayError> {
        let (fetch, generation) = {
            let mut guard = self.lock();
            let inner = &mut *guard;
            match &inner.phase {
                Phase::Valid => {
                    debug!("{}: serving cached view", self.source.name());
                    return Ok(inner.rendered_view.clone());
                }
                Phase::Building(fetch) => {
                    debug!("{}: joining in-flight fetch", self.source.name());
                    (fetch.clone(), inner.generation)
                }
                Phase::Invalid => {
                    info!("{}: fetching collection", self.source.name());
                    let fetch = self
                        .source
                        .fetch()
                        .map(|result| result.map(Arc::new))
                        .boxed()
                        .shared();
                    inner.phase = Phase::Building(fetch.clone());
                    inner.fetches += 1;
                    (fetch, inner.generation)
                }
            }
        };

        let result = fetch.await;

        let mut inner = self.lock();
        let current_build =
            inner.generation == generation && matches!(inner.phase, Phase::Building(_));

        match result {
            Ok(items) => {
                if inner.generation == generation && matches!(inner.phase, Phase::Valid) {
                    // Another waiter on the same fetch already installed it.
                    return Ok(inner.rendered_view.clone());
                }

                let view = self.render_all(&items);
                if current_build {
                    inner.items = items.as_ref().clone();
                    inner.pending.clear();
                    inner.rendered_view = view.clone();
                    inner.phase = Phase::Valid;
                    debug!("{}: cached {} items", self.source.name(), items.len());
                } else {
                    debug!(
                        "{}: collection invalidated during fetch - not caching",
                        self.source.name()
                    );
                }
                Ok(view)
            }
            Err(error) => {
                if current_build {
                    inner.phase = Phase::Invalid;
                }
                warn!("{}: fetch failed: {error}", self.source.name());
                Err(error)
            }
        }
    }

    /// Mark the view stale. Call only after the server confirmed a mutation.
    pub fn invalidate(&self) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.phase = Phase::Invalid;
        inner.rendered_view.clear();
        debug!("{}: invalidated", self.source.name());
    }

    /// Show a just-created item in the live view and invalidate.
    ///
    /// The item is held as pending, not added to the cached items; the next
    /// installed build replaces both, so it appears exactly once.
    pub fn append_optimistically(&self, item: &S::Item, view: &dyn View) {
        view.append_to_region(self.region, &self.source.render_item(item));
        self.lock().pending.push(item.clone());
        self.invalidate();
    }

    /// Re-render the collection's region from `ensure_view`.
    pub async fn refresh_region(&self, view: &dyn View) -> Result<(), GatewayError> {
        let markup = self.ensure_view().await?;
        view.replace_region(self.region, &markup);
        Ok(())
    }
}
