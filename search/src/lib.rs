//! # Taskdeck Search
//!
//! The dashboard's per-page search machinery: a registry of pluggable
//! page-scoped handlers and the debounced dispatch pipeline that sits
//! between the search input and whichever handler owns the current page.
//!
//! The pipeline is the concurrency core of the crate. Raw input arrives on
//! every keystroke; the pipeline debounces it, drops consecutive
//! duplicates, short-circuits empty and too-short queries, resolves the
//! handler for the page that is current *at dispatch time*, and runs the
//! search in a spawned task guarded so that only the latest query's
//! outcome is ever published: a superseded search is cancelled, and even a
//! completion that slips through is discarded before it can overwrite
//! fresher state.

mod error;
mod pipeline;
mod registry;
mod static_handler;

pub use error::SearchError;
pub use pipeline::DEFAULT_DEBOUNCE;
pub use pipeline::DEFAULT_MIN_QUERY_LENGTH;
pub use pipeline::SearchPipeline;
pub use pipeline::SearchPipelineConfig;
pub use registry::SearchHandler;
pub use registry::SearchHandlerRegistry;
pub use static_handler::StaticSearchHandler;
