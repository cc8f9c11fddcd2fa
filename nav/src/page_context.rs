use taskdeck_protocol::DEFAULT_SEARCH_PLACEHOLDER;
use taskdeck_protocol::PageContext;
use taskdeck_routing::BreadcrumbSpec;
use taskdeck_routing::RouteTree;

/// Derives the [`PageContext`] for a route-tree snapshot from its deepest
/// active leaf.
///
/// Precedence is strict: an explicit page-context declaration on the leaf
/// always wins; otherwise a plain-string breadcrumb label becomes the page
/// title; otherwise everything falls back to the defaults. The resolved
/// `page_id` is always the current URL, whatever the leaf declares.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageContextResolver;

impl PageContextResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, tree: &RouteTree, current_url: &str) -> PageContext {
        let leaf = tree.active_leaf();

        if let Some(config) = &leaf.data.page_context {
            return PageContext {
                page_title: config.title.clone(),
                page_id: current_url.to_string(),
                search_placeholder: config
                    .search_placeholder
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SEARCH_PLACEHOLDER.to_string()),
                search_enabled: !config.search_disabled,
                metadata: config.metadata.clone(),
            };
        }

        if let Some(label) = leaf
            .data
            .breadcrumb
            .as_ref()
            .and_then(BreadcrumbSpec::plain_label)
        {
            return PageContext {
                page_title: label.to_string(),
                page_id: current_url.to_string(),
                ..PageContext::default()
            };
        }

        PageContext {
            page_id: current_url.to_string(),
            ..PageContext::default()
        }
    }
}
