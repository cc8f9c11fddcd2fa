use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;

/// Route params resolved for a node, e.g. `{ "id": "42" }` for `/projects/42`.
pub type RouteParams = HashMap<String, String>;

/// How a node's breadcrumb label is produced: a fixed string, or a function
/// of the node's route params for parameterized routes (`/projects/:id`).
#[derive(Clone)]
pub enum BreadcrumbLabel {
    Static(String),
    Derived(Arc<dyn Fn(&RouteParams) -> String + Send + Sync>),
}

impl BreadcrumbLabel {
    pub fn derived<F>(f: F) -> Self
    where
        F: Fn(&RouteParams) -> String + Send + Sync + 'static,
    {
        Self::Derived(Arc::new(f))
    }

    pub fn resolve(&self, params: &RouteParams) -> String {
        match self {
            Self::Static(text) => text.clone(),
            Self::Derived(f) => f(params),
        }
    }
}

impl fmt::Debug for BreadcrumbLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Self::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

impl From<&str> for BreadcrumbLabel {
    fn from(text: &str) -> Self {
        Self::Static(text.to_string())
    }
}

impl From<String> for BreadcrumbLabel {
    fn from(text: String) -> Self {
        Self::Static(text)
    }
}

/// Full breadcrumb declaration for a route node. `skip` keeps the node out
/// of the trail entirely (used for grouping nodes that own a URL segment but
/// should not be a visible step).
#[derive(Debug, Clone)]
pub struct BreadcrumbConfig {
    pub label: BreadcrumbLabel,
    pub icon: Option<String>,
    pub skip: bool,
}

impl BreadcrumbConfig {
    pub fn new(label: impl Into<BreadcrumbLabel>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            skip: false,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }
}

/// What a node declares under its `breadcrumb` data key: either a bare
/// label string or a full [`BreadcrumbConfig`]. Absent means the node
/// contributes no breadcrumb.
#[derive(Debug, Clone)]
pub enum BreadcrumbSpec {
    Label(String),
    Config(BreadcrumbConfig),
}

impl BreadcrumbSpec {
    /// The plain-string form of this spec, if that is what was declared.
    /// Only the bare form participates in page-title fallback; configured
    /// labels may be param-derived and are breadcrumb-only.
    pub fn plain_label(&self) -> Option<&str> {
        match self {
            Self::Label(text) => Some(text),
            Self::Config(_) => None,
        }
    }
}

/// Per-page context declaration on a leaf route: the page title, the search
/// placeholder, and whether the page opts out of search.
#[derive(Debug, Clone)]
pub struct PageContextConfig {
    pub title: String,
    pub search_placeholder: Option<String>,
    pub search_disabled: bool,
    pub metadata: Option<Map<String, Value>>,
}

impl PageContextConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            search_placeholder: None,
            search_disabled: false,
            metadata: None,
        }
    }

    pub fn with_search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = Some(placeholder.into());
        self
    }

    pub fn without_search(mut self) -> Self {
        self.search_disabled = true;
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Declarative data attached to a route node. `extra` holds whatever other
/// keys the route declared; the core ignores them.
#[derive(Debug, Clone, Default)]
pub struct RouteData {
    pub breadcrumb: Option<BreadcrumbSpec>,
    pub page_context: Option<PageContextConfig>,
    pub extra: HashMap<String, Value>,
}

/// One node in a route-tree snapshot. A snapshot models a single resolved
/// navigation, so a node has at most one active child and the tree is a
/// chain from root to the deepest active leaf.
#[derive(Debug, Clone)]
pub struct RouteNode {
    pub url_segments: Vec<String>,
    pub params: RouteParams,
    pub data: RouteData,
    pub active_child: Option<Box<RouteNode>>,
}

impl RouteNode {
    /// The deepest node on the active path, the node page context derives
    /// from.
    pub fn active_leaf(&self) -> &RouteNode {
        let mut node = self;
        while let Some(child) = node.active_child.as_deref() {
            node = child;
        }
        node
    }
}

/// An immutable snapshot of the resolved route hierarchy for one completed
/// navigation.
#[derive(Debug, Clone)]
pub struct RouteTree {
    root: RouteNode,
}

impl RouteTree {
    pub fn new(root: RouteNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &RouteNode {
        &self.root
    }

    pub fn active_leaf(&self) -> &RouteNode {
        self.root.active_leaf()
    }

    /// Root-to-leaf traversal of the active path.
    pub fn active_path(&self) -> Vec<&RouteNode> {
        let mut path = Vec::new();
        let mut node = Some(&self.root);
        while let Some(current) = node {
            path.push(current);
            node = current.active_child.as_deref();
        }
        path
    }
}

/// Spec for one node while assembling a tree with [`RouteTreeBuilder`].
#[derive(Debug, Default)]
pub struct RouteNodeSpec {
    segments: Vec<String>,
    params: RouteParams,
    data: RouteData,
}

impl RouteNodeSpec {
    /// A node owning a single URL segment. Pass an empty string for a
    /// segment-less (grouping) node.
    pub fn segment(segment: impl Into<String>) -> Self {
        let segment = segment.into();
        let segments = if segment.is_empty() {
            Vec::new()
        } else {
            vec![segment]
        };
        Self {
            segments,
            ..Default::default()
        }
    }

    pub fn segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Declare a plain-string breadcrumb label for this node.
    pub fn breadcrumb(mut self, label: impl Into<String>) -> Self {
        self.data.breadcrumb = Some(BreadcrumbSpec::Label(label.into()));
        self
    }

    pub fn breadcrumb_config(mut self, config: BreadcrumbConfig) -> Self {
        self.data.breadcrumb = Some(BreadcrumbSpec::Config(config));
        self
    }

    pub fn page_context(mut self, config: PageContextConfig) -> Self {
        self.data.page_context = Some(config);
        self
    }

    pub fn data_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.extra.insert(key.into(), value);
        self
    }

    fn into_node(self) -> RouteNode {
        RouteNode {
            url_segments: self.segments,
            params: self.params,
            data: self.data,
            active_child: None,
        }
    }
}

/// Assembles a route-tree snapshot as a chain of node specs, root first.
/// Routers adapt their own structures into this; tests hand-build fixtures
/// with it.
#[derive(Debug, Default)]
pub struct RouteTreeBuilder {
    chain: Vec<RouteNodeSpec>,
}

impl RouteTreeBuilder {
    /// Start from a bare root node (no segments, no data), the shape real
    /// routers emit for the top of the tree.
    pub fn new() -> Self {
        Self {
            chain: vec![RouteNodeSpec::default()],
        }
    }

    /// Start from an explicit root spec.
    pub fn from_root(root: RouteNodeSpec) -> Self {
        Self { chain: vec![root] }
    }

    /// Append the next node on the active path.
    pub fn then(mut self, spec: RouteNodeSpec) -> Self {
        self.chain.push(spec);
        self
    }

    pub fn build(self) -> RouteTree {
        let mut nodes: Vec<RouteNode> = self
            .chain
            .into_iter()
            .map(RouteNodeSpec::into_node)
            .collect();
        // Link leaf-first so each node adopts the already-linked tail.
        let mut tail: Option<Box<RouteNode>> = None;
        while let Some(mut node) = nodes.pop() {
            node.active_child = tail;
            tail = Some(Box::new(node));
        }
        let root = match tail {
            Some(root) => *root,
            None => RouteNodeSpec::default().into_node(),
        };
        RouteTree::new(root)
    }
}
