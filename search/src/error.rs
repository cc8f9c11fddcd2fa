use thiserror::Error;

/// Errors a search handler can surface for one query. A failure is scoped
/// to the query that produced it: the dispatch pipeline converts it into an
/// error state for the UI and keeps serving subsequent queries.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The handler rejected the params it was given
    #[error("invalid search params: {0}")]
    InvalidParams(String),

    /// The data source behind the handler failed
    #[error("search backend error: {0}")]
    Backend(String),

    /// Anything else the handler wants to surface
    #[error("search failed: {0}")]
    Other(String),
}
