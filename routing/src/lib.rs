//! # Taskdeck Routing
//!
//! The route-tree snapshot model the navigation core consumes, plus the
//! navigation event hub that distributes completed navigations to the
//! reactive state containers.
//!
//! A [`RouteTree`] models exactly one active path at a time: each node
//! carries its URL segments, resolved route params, and declarative per-node
//! data (breadcrumb and page-context configuration), and points at most at
//! one active child. Snapshots are immutable; the router publishes a fresh
//! tree with every completed navigation and consumers rebuild their derived
//! state from it wholesale.

mod events;
mod route;

pub use events::NavigationEvent;
pub use events::NavigationEvents;
pub use route::BreadcrumbConfig;
pub use route::BreadcrumbLabel;
pub use route::BreadcrumbSpec;
pub use route::PageContextConfig;
pub use route::RouteData;
pub use route::RouteNode;
pub use route::RouteNodeSpec;
pub use route::RouteParams;
pub use route::RouteTree;
pub use route::RouteTreeBuilder;
