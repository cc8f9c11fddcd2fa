//! # Taskdeck Nav
//!
//! Derived navigation state for the dashboard shell: the breadcrumb trail
//! and the per-page context (title, search placeholder, search enablement),
//! each rebuilt from the route-tree snapshot on every completed navigation.
//!
//! Two pure derivations do the work: [`BreadcrumbBuilder`] walks the
//! active route path into an ordered trail, and [`PageContextResolver`]
//! reads the deepest active leaf into a
//! [`PageContext`](taskdeck_protocol::PageContext). Two reactive containers
//! ([`BreadcrumbState`], [`PageContextState`]) wrap them behind watch
//! channels: a current-value read plus change subscriptions for the UI,
//! with whole-record replacement on every update.
//!
//! Containers are explicit instances wired up by the application root and
//! handed to whoever needs them; nothing here is a process-wide singleton.

mod breadcrumb_state;
mod breadcrumbs;
mod page_context;
mod page_context_state;

pub use breadcrumb_state::BreadcrumbState;
pub use breadcrumbs::BreadcrumbBuilder;
pub use breadcrumbs::HOME_LABEL;
pub use breadcrumbs::ROOT_URL;
pub use page_context::PageContextResolver;
pub use page_context_state::PageContextState;
