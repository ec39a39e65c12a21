use crate::source::PaletteSource;
use palette_protocol::{CommandContext, PaletteResult};
use palette_search::SearchEngine;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Observable state of one palette instance
#[derive(Debug, Clone, Default)]
pub struct PaletteState {
    pub context: CommandContext,
    pub query: String,
    pub results: Vec<PaletteResult>,
    pub is_loading: bool,

    /// Message of the last failed request, cleared when a new one starts
    pub error: Option<String>,

    pub initial_results_loaded: bool,
    pub is_open: bool,
}

impl PaletteState {
    #[must_use]
    pub fn new(context: CommandContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Passed to every search and initial-results request
    pub limit: Option<usize>,
}

impl StoreOptions {
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Request {
    Query,
    Initial,
}

struct StoreInner {
    source: Arc<dyn PaletteSource>,
    state: watch::Sender<PaletteState>,
    search_token: AtomicU64,
    limit: Option<usize>,
}

/// Handle to an independent palette instance.
///
/// Clones share the same state. Each instance keeps its own search token, so
/// two stores never cancel each other's requests.
#[derive(Clone)]
pub struct PaletteStore {
    inner: Arc<StoreInner>,
}

impl PaletteStore {
    #[must_use]
    pub fn new(
        source: Arc<dyn PaletteSource>,
        context: CommandContext,
        options: StoreOptions,
    ) -> Self {
        let (state, _) = watch::channel(PaletteState::new(context));
        Self {
            inner: Arc::new(StoreInner {
                source,
                state,
                search_token: AtomicU64::new(0),
                limit: options.limit,
            }),
        }
    }

    /// Store backed directly by a search engine
    #[must_use]
    pub fn with_engine(
        engine: SearchEngine,
        context: CommandContext,
        options: StoreOptions,
    ) -> Self {
        Self::new(Arc::new(engine), context, options)
    }

    #[must_use]
    pub fn state(&self) -> PaletteState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PaletteState> {
        self.inner.state.subscribe()
    }

    pub fn set_context(&self, context: CommandContext) {
        self.update(|state| {
            if state.context == context {
                return false;
            }
            state.context = context;
            true
        });
    }

    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.update(|state| {
            if state.query == query {
                return false;
            }
            state.query = query;
            true
        });
    }

    pub fn set_open(&self, open: bool) {
        self.update(|state| {
            if state.is_open == open {
                return false;
            }
            state.is_open = open;
            true
        });
    }

    pub fn toggle_open(&self) {
        self.update(|state| {
            state.is_open = !state.is_open;
            true
        });
    }

    /// Search for `query`, or the current query when `None`.
    ///
    /// Failures land in `state().error`; a response that arrives after a
    /// newer request has started is discarded.
    pub async fn execute_query(&self, query: Option<&str>) {
        let (query, context) = {
            let state = self.inner.state.borrow();
            let query = query.map_or_else(|| state.query.clone(), str::to_string);
            (query, state.context.clone())
        };

        let token = self.begin_request();
        let outcome = self
            .inner
            .source
            .search(&query, &context, self.inner.limit)
            .await;
        self.finish_request(token, Request::Query, outcome);
    }

    /// Fetch initial results once. Later calls are no-ops after a load has
    /// been committed.
    pub async fn load_initial_results(&self) {
        let context = {
            let state = self.inner.state.borrow();
            if state.initial_results_loaded {
                return;
            }
            state.context.clone()
        };

        let token = self.begin_request();
        let outcome = self
            .inner
            .source
            .initial_results(&context, self.inner.limit)
            .await;
        self.finish_request(token, Request::Initial, outcome);
    }

    fn update(&self, modify: impl FnOnce(&mut PaletteState) -> bool) {
        self.inner.state.send_if_modified(modify);
    }

    // Token bump and stale check both run under the state lock, so a request
    // cannot start between another request's check and its commit.
    fn begin_request(&self) -> u64 {
        let mut token = 0;
        self.inner.state.send_modify(|state| {
            token = self.inner.search_token.fetch_add(1, Ordering::SeqCst) + 1;
            state.is_loading = true;
            state.error = None;
        });
        token
    }

    fn finish_request(
        &self,
        token: u64,
        request: Request,
        outcome: anyhow::Result<Vec<PaletteResult>>,
    ) {
        self.update(|state| {
            let current = self.inner.search_token.load(Ordering::SeqCst);
            if current != token {
                log::debug!("Discarding stale palette {request:?} response ({token} < {current})");
                return false;
            }

            state.is_loading = false;
            match outcome {
                Ok(results) => {
                    state.results = results;
                    if request == Request::Initial {
                        state.initial_results_loaded = true;
                    }
                }
                Err(err) => {
                    log::warn!("Palette {request:?} request failed: {err:#}");
                    state.error = Some(err.to_string());
                }
            }
            true
        });
    }
}
