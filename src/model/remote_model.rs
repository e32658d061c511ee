//! RemoteModel - Windowed Remote Data Loader
//!
//! Serves row data for whatever index range the presentation layer is
//! showing, fetching only missing spans (padded by a buffer margin) and
//! notifying subscribers over the model event channel. At most one fetch is
//! in flight; overlapping requests coalesce or wait. Every fetch carries the
//! generation active at issue time, and a result arriving after a sort or
//! search change is discarded so stale rows never corrupt the new view.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use snafu::ensure;

use crate::domain::config::ModelConfig;
use crate::domain::query::{RowRange, SortDirection, SortSpec};
use crate::domain::record::Record;
use crate::error::{InvalidSnafu, Result};
use crate::eventing::model_event::ModelEvent;
use crate::model::cache::RowCache;
use crate::services::{FetchPage, FetchRequest, RowFetcher, spawn_in_tokio};

/// Mutable model state, serialized behind one lock
struct Inner {
    cache: RowCache,
    generation: u64,
    sort: SortSpec,
    search: String,
    /// Range and generation of the single in-flight fetch
    pending: Option<(RowRange, u64)>,
    /// Span requested while a fetch was in flight, replayed when it settles
    deferred: Option<RowRange>,
}

/// Windowed cache of rows fetched on demand from a remote search endpoint
///
/// Constructed with its fetcher and windowing config injected; there is no
/// ambient global model state. Clones share the same cache and event channel.
#[derive(Clone)]
pub struct RemoteModel {
    inner: Arc<Mutex<Inner>>,
    fetcher: Arc<dyn RowFetcher>,
    config: ModelConfig,
    tx: Sender<ModelEvent>,
    rx: Receiver<ModelEvent>,
}

impl RemoteModel {
    /// Create a model over the given fetch boundary
    pub fn new(fetcher: Arc<dyn RowFetcher>, config: ModelConfig) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            inner: Arc::new(Mutex::new(Inner {
                cache: RowCache::new(),
                generation: 0,
                sort: SortSpec::default(),
                search: String::new(),
                pending: None,
                deferred: None,
            })),
            fetcher,
            config,
            tx,
            rx,
        }
    }

    /// Get the event receiver for the presentation layer
    pub fn events(&self) -> Receiver<ModelEvent> {
        self.rx.clone()
    }

    /// Make the inclusive index range `[start, end]` resident.
    ///
    /// Fully cached ranges are a no-op with no fetch and no event; the caller
    /// may read synchronously. Otherwise the missing span (padded by the
    /// buffer margin) is fetched, `LoadingStarted` is emitted synchronously,
    /// and `DataLoaded` follows asynchronously with the actual merged range.
    /// While a fetch is in flight a covering request coalesces into it and a
    /// non-covered request waits for it to settle.
    pub fn ensure_data(&self, start: u64, end: u64) -> Result<()> {
        ensure!(
            start <= end,
            InvalidSnafu {
                message: format!("invalid range: start {start} > end {end}"),
            }
        );
        let requested = RowRange::new(start, end);
        let mut inner = self.inner.lock();

        let Some(missing) = inner.cache.missing_span(requested) else {
            tracing::trace!(%requested, "range fully resident");
            return Ok(());
        };

        if let Some((pending, _)) = inner.pending {
            if pending.covers(missing) {
                tracing::debug!(%missing, %pending, "coalesced into in-flight fetch");
            } else {
                let deferred = inner.deferred.map_or(missing, |d| d.union(missing));
                inner.deferred = Some(deferred);
                tracing::debug!(%missing, "deferred until in-flight fetch settles");
            }
            return Ok(());
        }

        let padded = missing.padded(self.padding(), inner.cache.known_total());
        self.issue_fetch(&mut inner, padded);
        Ok(())
    }

    /// Change the sort column and direction.
    ///
    /// Invalidates the cache and known total and advances the generation.
    /// Does not itself fetch; the caller re-issues `ensure_data` for its
    /// viewport.
    pub fn set_sort(&self, field: &str, direction: SortDirection) {
        let mut inner = self.inner.lock();
        inner.sort = SortSpec::new(field, direction);
        Self::invalidate(&mut inner, "sort changed");
    }

    /// Change the free-text search term. Same invalidation contract as
    /// `set_sort`.
    pub fn set_search(&self, term: &str) {
        let mut inner = self.inner.lock();
        inner.search = term.to_string();
        Self::invalidate(&mut inner, "search changed");
    }

    /// Row count: the known total when learned, else a provisional count
    /// (highest fetched index plus one) so the grid can grow as data lands.
    pub fn len(&self) -> u64 {
        self.inner.lock().cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Synchronous read of a cached row
    pub fn row(&self, index: u64) -> Option<Record> {
        self.inner.lock().cache.row(index).cloned()
    }

    /// Total row count learned from the endpoint, if any
    pub fn known_total(&self) -> Option<u64> {
        self.inner.lock().cache.known_total()
    }

    /// Current sort specification
    pub fn sort(&self) -> SortSpec {
        self.inner.lock().sort.clone()
    }

    /// Current search term
    pub fn search(&self) -> String {
        self.inner.lock().search.clone()
    }

    /// Whether a fetch is currently in flight
    pub fn has_pending_fetch(&self) -> bool {
        self.inner.lock().pending.is_some()
    }

    fn padding(&self) -> u64 {
        self.config.buffer_pages * self.config.page_size
    }

    fn invalidate(inner: &mut Inner, reason: &str) {
        inner.generation += 1;
        inner.cache.clear();
        inner.pending = None;
        inner.deferred = None;
        tracing::debug!(generation = inner.generation, reason, "cache invalidated");
    }

    /// Record the pending fetch, raise the busy indicator, and run the fetch
    /// on the runtime bridge. Caller holds the lock.
    fn issue_fetch(&self, inner: &mut Inner, range: RowRange) {
        let request = FetchRequest {
            range,
            sort: inner.sort.clone(),
            search: inner.search.clone(),
            generation: inner.generation,
        };
        inner.pending = Some((range, inner.generation));
        let future = self.fetcher.fetch(request.clone());

        let _ = self.tx.send(ModelEvent::LoadingStarted);
        tracing::debug!(%range, generation = request.generation, "fetch issued");

        let model = self.clone();
        spawn_in_tokio(async move {
            let result = future.await;
            model.on_settled(request, result);
        });
    }

    fn on_settled(&self, request: FetchRequest, result: Result<FetchPage>) {
        let mut inner = self.inner.lock();

        if request.generation != inner.generation {
            // Superseded by a sort/search change; the pending marker (if any)
            // belongs to a newer fetch and must not be touched
            tracing::debug!(
                range = %request.range,
                generation = request.generation,
                "discarding stale fetch result"
            );
            return;
        }

        inner.pending = None;

        match result {
            Ok(page) => {
                if let Some(total) = page.total {
                    inner.cache.set_known_total(total);
                }
                if let Some(merged) = inner.cache.insert_rows(request.range.start, page.rows) {
                    tracing::debug!(%merged, "rows merged");
                    let _ = self.tx.send(ModelEvent::DataLoaded {
                        from: merged.start,
                        to: merged.end,
                    });
                } else {
                    tracing::debug!(range = %request.range, "fetch returned no rows");
                }
            }
            Err(error) => {
                tracing::warn!(range = %request.range, %error, "fetch failed");
                let _ = self.tx.send(ModelEvent::LoadFailed {
                    from: request.range.start,
                    to: request.range.end,
                    message: error.to_string().into(),
                });
            }
        }

        // A span requested mid-flight is a live request; replay whatever part
        // of it is still missing
        if let Some(deferred) = inner.deferred.take() {
            if let Some(missing) = inner.cache.missing_span(deferred) {
                let padded = missing.padded(self.padding(), inner.cache.known_total());
                self.issue_fetch(&mut inner, padded);
            }
        }
    }
}

impl std::fmt::Debug for RemoteModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("RemoteModel")
            .field("generation", &inner.generation)
            .field("resident_rows", &inner.cache.resident_rows())
            .field("known_total", &inner.cache.known_total())
            .field("pending", &inner.pending)
            .finish()
    }
}
