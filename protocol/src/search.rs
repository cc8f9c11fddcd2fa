use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Result page size used when the dispatcher builds params without an
/// explicit limit.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// One hit returned by a page's search handler. The core treats the payload
/// as opaque: feature modules decide what `kind`, `url` and `metadata` mean
/// for their page, and the UI renders whatever arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Parameters handed to a search handler for one invocation. Built by the
/// dispatch pipeline; `page_id` echoes the page the query was issued from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub page_id: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Map<String, Value>>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>, page_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page_id: page_id.into(),
            limit: DEFAULT_RESULT_LIMIT,
            offset: 0,
            filters: None,
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

/// What a handler hands back on success. `total` reports the size of the
/// full match set when the handler windowed it by limit/offset, so paged
/// UIs can show an overall count.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_results(results: Vec<SearchResult>) -> Self {
        let total = results.len();
        Self {
            results,
            total: Some(total),
        }
    }
}

/// The per-page search substate: the live query text, the in-flight flag,
/// and the last published results or error. Changes far more often than the
/// page context it belongs to (per keystroke rather than per navigation),
/// so it is stored and published separately and only merged with the page
/// context at the UI-read boundary.
///
/// The zero value (`Default`) is what navigation resets to: no page-scoped
/// search survives a page change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchState {
    pub query: String,
    pub is_searching: bool,
    pub results: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchState {
    /// True while the UI should render search chrome: a query is typed, a
    /// search is running, or results are on screen. A bare error does not
    /// count on its own; the query that produced it is still present
    /// whenever an error is.
    pub fn has_active_search(&self) -> bool {
        !self.query.is_empty() || self.is_searching || !self.results.is_empty()
    }
}
