use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Title shown when the active route declares nothing better.
pub const DEFAULT_PAGE_TITLE: &str = "Dashboard";

/// Placeholder shown in the search input when the active route does not
/// declare its own.
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search...";

/// Per-page UI configuration derived from the active route: the page title,
/// how the search input presents itself, and whether search applies at all.
///
/// `page_id` is the normalized URL of the active leaf route; it doubles as
/// the join key search handlers register under. A new `PageContext` replaces
/// the previous one wholesale on every completed navigation; the record is
/// never mutated field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    pub page_title: String,
    pub page_id: String,
    pub search_placeholder: String,
    pub search_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            page_title: DEFAULT_PAGE_TITLE.to_string(),
            page_id: "/".to_string(),
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            search_enabled: true,
            metadata: None,
        }
    }
}
