use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use tokio::sync::broadcast;
use tracing::debug;

use crate::route::RouteTree;

/// Buffered navigations per subscriber. Navigation is low-frequency; a
/// subscriber that falls this far behind is stuck, not slow.
const NAVIGATION_CHANNEL_CAPACITY: usize = 16;

/// Emitted once per completed navigation: the resolved URL and the fresh
/// route-tree snapshot it resolved to.
#[derive(Debug, Clone)]
pub struct NavigationEvent {
    pub url: String,
    pub tree: Arc<RouteTree>,
}

impl NavigationEvent {
    pub fn new(url: impl Into<String>, tree: Arc<RouteTree>) -> Self {
        Self {
            url: url.into(),
            tree,
        }
    }
}

/// The navigation-completed event hub. The router (or a test) calls
/// [`NavigationEvents::navigate`]; state containers subscribe for changes
/// and read [`NavigationEvents::current`] at construction time so they can
/// seed themselves without waiting for the next navigation.
#[derive(Debug)]
pub struct NavigationEvents {
    sender: broadcast::Sender<NavigationEvent>,
    current: Mutex<Option<NavigationEvent>>,
}

impl NavigationEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(NAVIGATION_CHANNEL_CAPACITY);
        Self {
            sender,
            current: Mutex::new(None),
        }
    }

    /// Record and broadcast a completed navigation.
    pub fn navigate(&self, url: impl Into<String>, tree: Arc<RouteTree>) -> NavigationEvent {
        let event = NavigationEvent::new(url, tree);
        self.emit(event.clone());
        event
    }

    pub fn emit(&self, event: NavigationEvent) {
        debug!(url = %event.url, "navigation completed");
        *self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(event.clone());
        // Err means no live subscribers, which is fine: late subscribers
        // seed from `current()`.
        let _ = self.sender.send(event);
    }

    /// The most recent completed navigation, if any.
    pub fn current(&self) -> Option<NavigationEvent> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.sender.subscribe()
    }
}

impl Default for NavigationEvents {
    fn default() -> Self {
        Self::new()
    }
}
