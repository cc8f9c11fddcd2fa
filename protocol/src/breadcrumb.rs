use serde::Deserialize;
use serde::Serialize;

/// One navigable step in the hierarchical trail shown for the current
/// location. Trails are ordered root-to-leaf; at most one entry (the last)
/// is active, and the active entry is the only one the UI renders as
/// non-navigable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub label: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub is_active: bool,
}

impl Breadcrumb {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            icon: None,
            is_active: false,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}
