use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;
use taskdeck_protocol::PageContext;
use taskdeck_protocol::SearchResult;
use taskdeck_protocol::SearchState;
use taskdeck_routing::NavigationEvent;
use taskdeck_routing::NavigationEvents;
use tokio::sync::broadcast;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use tracing::warn;

use crate::page_context::PageContextResolver;

/// Reactive container for the current [`PageContext`] and its search
/// substate.
///
/// The two live in separate watch channels on purpose: page context changes
/// once per navigation, search state changes per keystroke and per handler
/// response, and keeping them apart means page-context-only observers are
/// never invalidated by typing. The UI merges the two snapshots at read
/// time.
///
/// Navigation is the single owner of the page-context channel; the search
/// dispatch pipeline is the single writer of the search channel via the
/// `set_*` mutators. Every mutation replaces the whole record.
#[derive(Debug)]
pub struct PageContextState {
    resolver: PageContextResolver,
    context: watch::Sender<PageContext>,
    search: watch::Sender<SearchState>,
}

impl PageContextState {
    pub fn new(events: &NavigationEvents) -> Self {
        let resolver = PageContextResolver::new();
        let initial = events
            .current()
            .map(|event| resolver.resolve(&event.tree, &event.url))
            .unwrap_or_default();
        let (context, _) = watch::channel(initial);
        let (search, _) = watch::channel(SearchState::default());
        Self {
            resolver,
            context,
            search,
        }
    }

    /// Re-derive the page context for a completed navigation. Always clears
    /// the search substate: no page-scoped search survives a page change.
    pub fn handle_navigation(&self, event: &NavigationEvent) {
        let context = self.resolver.resolve(&event.tree, &event.url);
        debug!(url = %event.url, title = %context.page_title, "page context resolved");
        self.context.send_replace(context);
        self.search.send_replace(SearchState::default());
    }

    /// Spawn a listener that keeps this container in sync with the
    /// navigation event stream.
    pub fn attach(
        self: &Arc<Self>,
        mut events: broadcast::Receiver<NavigationEvent>,
    ) -> JoinHandle<()> {
        let state = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => state.handle_navigation(&event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "page context listener lagged behind navigation events");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    pub fn context(&self) -> PageContext {
        self.context.borrow().clone()
    }

    pub fn page_title(&self) -> String {
        self.context.borrow().page_title.clone()
    }

    pub fn page_id(&self) -> String {
        self.context.borrow().page_id.clone()
    }

    pub fn search_placeholder(&self) -> String {
        self.context.borrow().search_placeholder.clone()
    }

    pub fn search_enabled(&self) -> bool {
        self.context.borrow().search_enabled
    }

    pub fn metadata(&self) -> Option<Map<String, Value>> {
        self.context.borrow().metadata.clone()
    }

    pub fn search_state(&self) -> SearchState {
        self.search.borrow().clone()
    }

    pub fn search_query(&self) -> String {
        self.search.borrow().query.clone()
    }

    pub fn is_searching(&self) -> bool {
        self.search.borrow().is_searching
    }

    pub fn search_results(&self) -> Vec<SearchResult> {
        self.search.borrow().results.clone()
    }

    pub fn search_error(&self) -> Option<String> {
        self.search.borrow().error.clone()
    }

    pub fn has_active_search(&self) -> bool {
        self.search.borrow().has_active_search()
    }

    /// Record the live query text. Keeps results/error untouched so the
    /// input field updates with zero latency while a previous response is
    /// still on screen.
    pub fn set_search_query(&self, query: impl Into<String>) {
        let mut next = self.search.borrow().clone();
        next.query = query.into();
        self.search.send_replace(next);
    }

    pub fn set_searching(&self, is_searching: bool) {
        let mut next = self.search.borrow().clone();
        next.is_searching = is_searching;
        self.search.send_replace(next);
    }

    /// Publish a successful response. Clears the in-flight flag and any
    /// previous error.
    pub fn set_search_results(&self, results: Vec<SearchResult>) {
        let query = self.search.borrow().query.clone();
        self.search.send_replace(SearchState {
            query,
            is_searching: false,
            results,
            error: None,
        });
    }

    /// Publish a failed search. Clears the in-flight flag and any previous
    /// results.
    pub fn set_search_error(&self, message: impl Into<String>) {
        let query = self.search.borrow().query.clone();
        self.search.send_replace(SearchState {
            query,
            is_searching: false,
            results: Vec::new(),
            error: Some(message.into()),
        });
    }

    /// Reset the whole search substate to its zero value.
    pub fn clear_search(&self) {
        self.search.send_replace(SearchState::default());
    }

    /// Replace the page context directly. Test/override use only; real
    /// context changes arrive through `handle_navigation`.
    pub fn set_context(&self, context: PageContext) {
        self.context.send_replace(context);
    }

    /// Back to defaults, search substate included. Test/teardown use only.
    pub fn reset(&self) {
        self.context.send_replace(PageContext::default());
        self.search.send_replace(SearchState::default());
    }

    pub fn subscribe_context(&self) -> watch::Receiver<PageContext> {
        self.context.subscribe()
    }

    pub fn subscribe_search(&self) -> watch::Receiver<SearchState> {
        self.search.subscribe()
    }
}
