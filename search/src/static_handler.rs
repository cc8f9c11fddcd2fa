use async_trait::async_trait;
use taskdeck_protocol::SearchParams;
use taskdeck_protocol::SearchResponse;
use taskdeck_protocol::SearchResult;

use crate::error::SearchError;
use crate::registry::SearchHandler;

/// Search handler over a fixed in-memory result list.
///
/// This is the handler the dashboard's feature pages use while they run on
/// mock data: case-insensitive substring match on title and description,
/// windowed by the params' limit/offset, with the full match count reported
/// as `total`.
pub struct StaticSearchHandler {
    page_id: String,
    name: Option<String>,
    entries: Vec<SearchResult>,
}

impl StaticSearchHandler {
    pub fn new(page_id: impl Into<String>, entries: Vec<SearchResult>) -> Self {
        Self {
            page_id: page_id.into(),
            name: None,
            entries,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn matches(entry: &SearchResult, needle: &str) -> bool {
        entry.title.to_lowercase().contains(needle)
            || entry
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(needle))
    }
}

#[async_trait]
impl SearchHandler for StaticSearchHandler {
    fn page_id(&self) -> &str {
        &self.page_id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    async fn search(&self, params: SearchParams) -> Result<SearchResponse, SearchError> {
        let needle = params.query.to_lowercase();
        let matched: Vec<SearchResult> = self
            .entries
            .iter()
            .filter(|entry| Self::matches(entry, &needle))
            .cloned()
            .collect();
        let total = matched.len();
        let results = matched
            .into_iter()
            .skip(params.offset)
            .take(params.limit)
            .collect();
        Ok(SearchResponse {
            results,
            total: Some(total),
        })
    }
}
