use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use async_trait::async_trait;
use indexmap::IndexMap;
use taskdeck_protocol::SearchParams;
use taskdeck_protocol::SearchResponse;
use tracing::warn;

use crate::error::SearchError;

/// A pluggable search strategy for one page. Feature modules implement
/// this and register an instance under their page id; the dispatch
/// pipeline resolves and invokes it, and never constructs handlers itself.
#[async_trait]
pub trait SearchHandler: Send + Sync {
    /// The page id this handler is registered under (the normalized URL of
    /// the page's leaf route).
    fn page_id(&self) -> &str;

    /// Display name for diagnostics.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Run one search. Failures are per-query; returning an error never
    /// unregisters the handler.
    async fn search(&self, params: SearchParams) -> Result<SearchResponse, SearchError>;

    /// Optional wildcard predicate consulted when no handler is registered
    /// under the exact page id.
    fn can_handle(&self, page_id: &str) -> bool {
        let _ = page_id;
        false
    }
}

/// Mapping from page id to registered search handler.
///
/// Shared as an `Arc` between feature-module registration code and the
/// dispatch pipeline. Insertion order is kept so predicate lookup is
/// deterministic: the first-registered handler whose `can_handle` accepts
/// the page wins.
#[derive(Default)]
pub struct SearchHandlerRegistry {
    handlers: Mutex<IndexMap<String, Arc<dyn SearchHandler>>>,
}

impl SearchHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its page id. Re-registering a page id
    /// replaces the previous handler; that is allowed but usually a wiring
    /// mistake, so it warns.
    pub fn register(&self, handler: Arc<dyn SearchHandler>) {
        let page_id = handler.page_id().to_string();
        let mut handlers = self.lock();
        if let Some(previous) = handlers.insert(page_id.clone(), handler) {
            warn!(
                %page_id,
                previous = previous.name().unwrap_or("unnamed"),
                "replacing an already registered search handler"
            );
        }
    }

    pub fn unregister(&self, page_id: &str) -> Option<Arc<dyn SearchHandler>> {
        self.lock().shift_remove(page_id)
    }

    /// Exact-match lookup.
    pub fn get(&self, page_id: &str) -> Option<Arc<dyn SearchHandler>> {
        self.lock().get(page_id).cloned()
    }

    pub fn has(&self, page_id: &str) -> bool {
        self.lock().contains_key(page_id)
    }

    /// Resolve the handler for a page: exact match first, then the first
    /// registered handler whose `can_handle` accepts the page.
    pub fn find(&self, page_id: &str) -> Option<Arc<dyn SearchHandler>> {
        let handlers = self.lock();
        if let Some(handler) = handlers.get(page_id) {
            return Some(Arc::clone(handler));
        }
        handlers
            .values()
            .find(|handler| handler.can_handle(page_id))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IndexMap<String, Arc<dyn SearchHandler>>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SearchHandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pages: Vec<String> = self.lock().keys().cloned().collect();
        f.debug_struct("SearchHandlerRegistry")
            .field("pages", &pages)
            .finish()
    }
}
