//! Server-side pagination with a page cache
//!
//! Pages are fetched through a [`PageFetcher`] and kept in a cache keyed by
//! the filters plus page and limit. Concurrent navigation is resolved as
//! latest-request-wins: every fetch takes a sequence number and a response
//! that is no longer the latest is dropped without touching state or cache.

use crate::error::extract_error_message;
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use shared::PaginatedResponse;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;

/// Source of server-paginated rows
#[async_trait]
pub trait PageFetcher<T, F>: Send + Sync {
    async fn fetch_page(
        &self,
        filters: &F,
        page: u32,
        limit: u32,
    ) -> ClientResult<PaginatedResponse<T>>;
}

/// Visible pagination state
#[derive(Debug, Clone, PartialEq)]
pub struct PageState<T, F> {
    pub data: Vec<T>,
    pub total: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub limit: u32,
    pub filters: F,
    pub is_loading: bool,
    /// Normalized message of the last failed fetch
    pub error: Option<String>,
}

struct Inner<T, F> {
    state: PageState<T, F>,
    cache: HashMap<String, PaginatedResponse<T>>,
    latest_request: u64,
}

impl<T: Clone, F> Inner<T, F> {
    fn apply(&mut self, page: u32, response: PaginatedResponse<T>) {
        self.state.data = response.data;
        self.state.total = response.total;
        self.state.total_pages = response.total_pages.max(1);
        self.state.current_page = page;
        self.state.is_loading = false;
        self.state.error = None;
    }
}

/// Server-side paginator
///
/// Cloning yields another handle to the same state, cache and
/// cancellation token.
pub struct ServerPagination<T, F, P> {
    fetcher: Arc<P>,
    inner: Arc<Mutex<Inner<T, F>>>,
    cancel: CancellationToken,
}

impl<T, F, P> Clone for ServerPagination<T, F, P> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            inner: self.inner.clone(),
            cancel: self.cancel.clone(),
        }
    }
}

impl<T, F, P> ServerPagination<T, F, P>
where
    T: Clone + Send + Sync,
    F: Serialize + Clone + Send + Sync,
    P: PageFetcher<T, F>,
{
    /// Create an idle paginator. Nothing is fetched until [`Self::load`].
    pub fn new(fetcher: P, limit: u32, filters: F) -> Self {
        Self::with_cancellation(fetcher, limit, filters, CancellationToken::new())
    }

    /// Like [`Self::new`], tied to a parent token: cancelling the parent
    /// shuts the paginator down.
    pub fn with_parent(fetcher: P, limit: u32, filters: F, parent: &CancellationToken) -> Self {
        Self::with_cancellation(fetcher, limit, filters, parent.child_token())
    }

    fn with_cancellation(fetcher: P, limit: u32, filters: F, cancel: CancellationToken) -> Self {
        let state = PageState {
            data: Vec::new(),
            total: 0,
            total_pages: 1,
            current_page: 1,
            limit: limit.max(1),
            filters,
            is_loading: false,
            error: None,
        };
        Self {
            fetcher: Arc::new(fetcher),
            inner: Arc::new(Mutex::new(Inner {
                state,
                cache: HashMap::new(),
                latest_request: 0,
            })),
            cancel,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T, F>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch the current page, served from cache when present
    pub async fn load(&self) {
        let page = self.lock().state.current_page;
        self.load_page(page, true).await;
    }

    /// Navigate to `page`. Pages outside `1..=total_pages` are ignored.
    pub async fn go_to_page(&self, page: u32) {
        let total_pages = self.lock().state.total_pages;
        if page < 1 || page > total_pages {
            tracing::debug!(page, total_pages, "Ignoring out-of-range page");
            return;
        }
        self.load_page(page, true).await;
    }

    pub async fn next_page(&self) {
        let page = self.lock().state.current_page;
        self.go_to_page(page.saturating_add(1)).await;
    }

    pub async fn previous_page(&self) {
        let page = self.lock().state.current_page;
        if page > 1 {
            self.go_to_page(page - 1).await;
        }
    }

    /// Replace the filters and fetch page 1.
    ///
    /// The cache is always cleared, even if `filters` equals the current
    /// value.
    pub async fn apply_filters(&self, filters: F) {
        {
            let mut inner = self.lock();
            inner.cache.clear();
            inner.state.filters = filters;
        }
        self.load_page(1, false).await;
    }

    /// Re-fetch the current page, overwriting its cache entry
    pub async fn refresh_current_page(&self) {
        let page = self.lock().state.current_page;
        self.load_page(page, false).await;
    }

    pub fn clear_cache(&self) {
        self.lock().cache.clear();
    }

    pub fn clear_error(&self) {
        self.lock().state.error = None;
    }

    pub fn cache_len(&self) -> usize {
        self.lock().cache.len()
    }

    /// Copy of the visible state
    pub fn snapshot(&self) -> PageState<T, F> {
        self.lock().state.clone()
    }

    /// Cancel in-flight fetches. Later navigation is a no-op.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    async fn load_page(&self, page: u32, use_cache: bool) {
        if self.cancel.is_cancelled() {
            return;
        }

        let (filters, limit, key, seq) = {
            let mut inner = self.lock();
            let filters = inner.state.filters.clone();
            let limit = inner.state.limit;
            let key = match cache_key(&filters, page, limit) {
                Ok(key) => key,
                Err(err) => {
                    inner.state.error = Some(extract_error_message(&err));
                    return;
                }
            };

            inner.latest_request += 1;
            let seq = inner.latest_request;

            let cached = if use_cache { inner.cache.get(&key).cloned() } else { None };
            if let Some(cached) = cached {
                tracing::debug!(page, "Page served from cache");
                inner.apply(page, cached);
                return;
            }

            inner.state.is_loading = true;
            inner.state.error = None;
            (filters, limit, key, seq)
        };

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ClientError::Cancelled),
            result = self.fetcher.fetch_page(&filters, page, limit) => result,
        };

        let mut inner = self.lock();
        if inner.latest_request != seq {
            tracing::debug!(page, seq, latest = inner.latest_request, "Discarding stale page response");
            return;
        }
        if self.cancel.is_cancelled() {
            inner.state.is_loading = false;
            return;
        }

        match result {
            Ok(response) => {
                inner.cache.insert(key, response.clone());
                inner.apply(page, response);
            }
            Err(err) if err.is_cancelled() => inner.state.is_loading = false,
            Err(err) => {
                tracing::warn!(page, error = %err, "Page fetch failed");
                inner.state.error = Some(extract_error_message(&err));
                inner.state.is_loading = false;
            }
        }
    }
}

/// JSON of `{...filters, page, limit}`
///
/// `serde_json::Map` keeps keys sorted, so equal filters always produce the
/// same key.
fn cache_key<F: Serialize>(filters: &F, page: u32, limit: u32) -> ClientResult<String> {
    let mut map = match serde_json::to_value(filters)? {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("filters".to_string(), other);
            map
        }
    };
    map.insert("page".to_string(), Value::from(page));
    map.insert("limit".to_string(), Value::from(limit));
    Ok(Value::Object(map).to_string())
}
