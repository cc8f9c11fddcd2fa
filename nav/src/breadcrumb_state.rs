use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use taskdeck_protocol::Breadcrumb;
use taskdeck_routing::NavigationEvent;
use taskdeck_routing::NavigationEvents;
use tokio::sync::broadcast;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use tracing::warn;

use crate::breadcrumbs::BreadcrumbBuilder;

/// Reactive container for the current breadcrumb trail.
///
/// Wraps [`BreadcrumbBuilder`] behind a watch channel: every completed
/// navigation rebuilds the trail from the fresh snapshot and replaces the
/// published value wholesale. Construction seeds synchronously from the
/// hub's current navigation so the UI never renders an empty trail flash
/// at startup.
#[derive(Debug)]
pub struct BreadcrumbState {
    builder: BreadcrumbBuilder,
    trail: watch::Sender<Vec<Breadcrumb>>,
    last_event: Mutex<Option<NavigationEvent>>,
}

impl BreadcrumbState {
    pub fn new(events: &NavigationEvents) -> Self {
        let builder = BreadcrumbBuilder::new();
        let current = events.current();
        let initial = current
            .as_ref()
            .map(|event| builder.build(&event.tree))
            .unwrap_or_default();
        let (trail, _) = watch::channel(initial);
        Self {
            builder,
            trail,
            last_event: Mutex::new(current),
        }
    }

    /// Rebuild the trail for a completed navigation and publish it.
    pub fn handle_navigation(&self, event: &NavigationEvent) {
        let trail = self.builder.build(&event.tree);
        debug!(url = %event.url, depth = trail.len(), "breadcrumb trail rebuilt");
        *self
            .last_event
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(event.clone());
        self.trail.send_replace(trail);
    }

    /// Recompute from the last seen snapshot without a navigation event,
    /// for when route data changed behind an unchanged URL.
    pub fn refresh(&self) {
        let last = self
            .last_event
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(event) = last {
            self.trail.send_replace(self.builder.build(&event.tree));
        }
    }

    /// Clear to an empty trail. Test/teardown use only.
    pub fn reset(&self) {
        *self
            .last_event
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
        self.trail.send_replace(Vec::new());
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
                        // Only stale intermediate navigations were lost; the
                        // next recv returns a fresher one.
                        warn!(skipped, "breadcrumb listener lagged behind navigation events");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// The current ordered trail, root to leaf.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.trail.borrow().clone()
    }

    /// The entry for the current location, when the trail has one.
    pub fn active_breadcrumb(&self) -> Option<Breadcrumb> {
        self.trail.borrow().last().cloned()
    }

    pub fn has_breadcrumbs(&self) -> bool {
        !self.trail.borrow().is_empty()
    }

    pub fn depth(&self) -> usize {
        self.trail.borrow().len()
    }

    /// Every entry except the current location, i.e. the clickable part of
    /// the trail.
    pub fn navigable_breadcrumbs(&self) -> Vec<Breadcrumb> {
        let trail = self.trail.borrow();
        match trail.split_last() {
            Some((_, navigable)) => navigable.to_vec(),
            None => Vec::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Breadcrumb>> {
        self.trail.subscribe()
    }
}
