use taskdeck_protocol::Breadcrumb;
use taskdeck_routing::BreadcrumbSpec;
use taskdeck_routing::RouteTree;

/// Label of the synthetic trail head every build seeds.
pub const HOME_LABEL: &str = "Home";

/// URL the synthetic Home entry navigates to.
pub const ROOT_URL: &str = "/";

/// Builds the breadcrumb trail for a route-tree snapshot.
///
/// The walk follows the single active path from the root to the deepest
/// leaf. Every build seeds a synthetic Home entry first, accumulates URL
/// segments along the way, and appends one entry per node that declares a
/// breadcrumb (nodes without one, and nodes marked `skip`, contribute
/// nothing). The last appended entry is marked active; when nothing beyond
/// Home was appended, Home itself stays non-active.
///
/// Pure function of the snapshot: same tree in, same trail out.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadcrumbBuilder;

impl BreadcrumbBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, tree: &RouteTree) -> Vec<Breadcrumb> {
        let mut trail = vec![Breadcrumb::new(HOME_LABEL, ROOT_URL)];
        let mut url = String::new();

        for node in tree.active_path() {
            for segment in &node.url_segments {
                if segment.is_empty() {
                    continue;
                }
                url.push('/');
                url.push_str(segment);
            }

            let Some(spec) = &node.data.breadcrumb else {
                continue;
            };
            let (label, icon) = match spec {
                BreadcrumbSpec::Label(text) => (text.clone(), None),
                BreadcrumbSpec::Config(config) => {
                    if config.skip {
                        continue;
                    }
                    (config.label.resolve(&node.params), config.icon.clone())
                }
            };

            trail.push(Breadcrumb {
                label,
                url: if url.is_empty() {
                    ROOT_URL.to_string()
                } else {
                    url.clone()
                },
                icon,
                is_active: false,
            });
        }

        // Only the last appended entry becomes active; a Home-only trail
        // stays fully navigable.
        if trail.len() > 1
            && let Some(last) = trail.last_mut()
        {
            last.is_active = true;
        }
        trail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use taskdeck_routing::BreadcrumbConfig;
    use taskdeck_routing::BreadcrumbLabel;
    use taskdeck_routing::RouteNodeSpec;
    use taskdeck_routing::RouteParams;
    use taskdeck_routing::RouteTreeBuilder;

    fn labels(trail: &[Breadcrumb]) -> Vec<&str> {
        trail.iter().map(|crumb| crumb.label.as_str()).collect()
    }

    #[test]
    fn every_trail_starts_at_home() {
        let tree = RouteTreeBuilder::new().build();
        let trail = BreadcrumbBuilder::new().build(&tree);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].label, HOME_LABEL);
        assert_eq!(trail[0].url, ROOT_URL);
        assert!(!trail[0].is_active);
    }

    #[test]
    fn exactly_the_last_entry_is_active() {
        let tree = RouteTreeBuilder::new()
            .then(RouteNodeSpec::segment("projects").breadcrumb("Projects"))
            .then(RouteNodeSpec::segment("archive").breadcrumb("Archive"))
            .build();
        let trail = BreadcrumbBuilder::new().build(&tree);

        assert_eq!(labels(&trail), vec![HOME_LABEL, "Projects", "Archive"]);
        let active: Vec<_> = trail.iter().filter(|crumb| crumb.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "Archive");
    }

    #[test]
    fn urls_accumulate_segment_by_segment() {
        let tree = RouteTreeBuilder::new()
            .then(RouteNodeSpec::segment("projects").breadcrumb("Projects"))
            .then(RouteNodeSpec::segment("42").breadcrumb("Detail"))
            .build();
        let trail = BreadcrumbBuilder::new().build(&tree);

        assert_eq!(trail[1].url, "/projects");
        assert_eq!(trail[2].url, "/projects/42");
    }

    #[test]
    fn empty_segments_contribute_nothing_to_urls() {
        let tree = RouteTreeBuilder::new()
            .then(RouteNodeSpec::segments(["", "tasks"]).breadcrumb("Tasks"))
            .then(RouteNodeSpec::segment("").breadcrumb("Board"))
            .build();
        let trail = BreadcrumbBuilder::new().build(&tree);

        assert_eq!(trail[1].url, "/tasks");
        assert_eq!(trail[2].url, "/tasks");
    }

    #[test]
    fn nodes_without_breadcrumb_data_are_invisible() {
        let tree = RouteTreeBuilder::new()
            .then(RouteNodeSpec::segment("app"))
            .then(RouteNodeSpec::segment("tasks").breadcrumb("Tasks"))
            .build();
        let trail = BreadcrumbBuilder::new().build(&tree);

        assert_eq!(labels(&trail), vec![HOME_LABEL, "Tasks"]);
        // The invisible node still contributes its URL segment.
        assert_eq!(trail[1].url, "/app/tasks");
    }

    #[test]
    fn skip_keeps_a_configured_node_out_of_the_trail() {
        let tree = RouteTreeBuilder::new()
            .then(RouteNodeSpec::segment("admin").breadcrumb_config(
                BreadcrumbConfig::new("Admin").skipped(),
            ))
            .then(RouteNodeSpec::segment("users").breadcrumb("Users"))
            .build();
        let trail = BreadcrumbBuilder::new().build(&tree);

        assert_eq!(labels(&trail), vec![HOME_LABEL, "Users"]);
        assert_eq!(trail[1].url, "/admin/users");
    }

    #[test]
    fn derived_labels_receive_the_node_params() {
        let tree = RouteTreeBuilder::new()
            .then(RouteNodeSpec::segment("projects").breadcrumb("Projects"))
            .then(
                RouteNodeSpec::segment("42")
                    .param("id", "42")
                    .breadcrumb_config(BreadcrumbConfig::new(BreadcrumbLabel::derived(
                        |params: &RouteParams| {
                            format!(
                                "Project #{}",
                                params.get("id").map(String::as_str).unwrap_or_default()
                            )
                        },
                    ))),
            )
            .build();
        let trail = BreadcrumbBuilder::new().build(&tree);

        assert_eq!(trail[2].label, "Project #42");
        assert!(trail[2].is_active);
    }

    #[test]
    fn icons_carry_through_from_config() {
        let tree = RouteTreeBuilder::new()
            .then(RouteNodeSpec::segment("analytics").breadcrumb_config(
                BreadcrumbConfig::new("Analytics").with_icon("chart"),
            ))
            .build();
        let trail = BreadcrumbBuilder::new().build(&tree);

        assert_eq!(trail[1].icon.as_deref(), Some("chart"));
    }

    #[test]
    fn home_stays_inactive_when_nothing_else_was_appended() {
        let tree = RouteTreeBuilder::new()
            .then(RouteNodeSpec::segment("plain"))
            .build();
        let trail = BreadcrumbBuilder::new().build(&tree);

        assert_eq!(trail.len(), 1);
        assert!(!trail[0].is_active);
    }

    #[test]
    fn building_twice_yields_identical_trails() {
        let tree = RouteTreeBuilder::new()
            .then(RouteNodeSpec::segment("projects").breadcrumb("Projects"))
            .then(RouteNodeSpec::segment("7").param("id", "7").breadcrumb_config(
                BreadcrumbConfig::new(BreadcrumbLabel::derived(|params: &RouteParams| {
                    format!("#{}", params.get("id").map(String::as_str).unwrap_or_default())
                })),
            ))
            .build();

        let builder = BreadcrumbBuilder::new();
        assert_eq!(builder.build(&tree), builder.build(&tree));
    }
}
