//! End-to-end flow: navigation events drive both state containers while the
//! dispatch pipeline serves page-scoped searches over mock data.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use taskdeck_nav::BreadcrumbState;
use taskdeck_nav::PageContextState;
use taskdeck_protocol::SearchResult;
use taskdeck_protocol::SearchState;
use taskdeck_routing::NavigationEvents;
use taskdeck_routing::PageContextConfig;
use taskdeck_routing::RouteNodeSpec;
use taskdeck_routing::RouteTree;
use taskdeck_routing::RouteTreeBuilder;
use taskdeck_search::SearchHandlerRegistry;
use taskdeck_search::SearchPipeline;
use taskdeck_search::StaticSearchHandler;

fn task(id: &str, title: &str) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        kind: "task".to_string(),
        url: format!("/tasks/{id}"),
        icon: None,
        metadata: None,
    }
}

fn projects_tree() -> Arc<RouteTree> {
    Arc::new(
        RouteTreeBuilder::new()
            .then(RouteNodeSpec::segment("projects").breadcrumb("Projects").page_context(
                PageContextConfig::new("Projects").with_search_placeholder("Search projects..."),
            ))
            .build(),
    )
}

fn tasks_tree() -> Arc<RouteTree> {
    Arc::new(
        RouteTreeBuilder::new()
            .then(RouteNodeSpec::segment("tasks").breadcrumb("Tasks"))
            .build(),
    )
}

async fn wait_until<F>(state: &Arc<PageContextState>, predicate: F) -> SearchState
where
    F: Fn(&SearchState) -> bool,
{
    let mut rx = state.subscribe_search();
    tokio::time::timeout(Duration::from_secs(30), async {
        loop {
            if predicate(&rx.borrow_and_update()) {
                break;
            }
            rx.changed().await.expect("search channel closed");
        }
    })
    .await
    .expect("timed out waiting for search state");
    rx.borrow().clone()
}

#[tokio::test(start_paused = true)]
async fn navigation_and_search_work_end_to_end() {
    let events = NavigationEvents::new();
    events.navigate("/projects", projects_tree());

    let breadcrumbs = Arc::new(BreadcrumbState::new(&events));
    let page_context = Arc::new(PageContextState::new(&events));
    let breadcrumb_listener = breadcrumbs.attach(events.subscribe());
    let context_listener = page_context.attach(events.subscribe());

    let registry = Arc::new(SearchHandlerRegistry::new());
    registry.register(Arc::new(
        StaticSearchHandler::new(
            "/projects",
            vec![
                task("1", "Website relaunch"),
                task("2", "Mobile app beta"),
                task("3", "Website analytics"),
            ],
        )
        .named("projects-mock"),
    ));
    let pipeline = SearchPipeline::new(Arc::clone(&registry), Arc::clone(&page_context));

    // Startup state is seeded synchronously from the current navigation.
    assert_eq!(page_context.page_title(), "Projects");
    assert_eq!(page_context.search_placeholder(), "Search projects...");
    let trail = breadcrumbs.breadcrumbs();
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[1].label, "Projects");
    assert!(trail[1].is_active);

    // A debounced query resolves through the page's registered handler.
    pipeline.dispatch("website");
    let settled = wait_until(&page_context, |s| !s.results.is_empty()).await;
    assert_eq!(settled.results.len(), 2);
    assert_eq!(settled.results[0].title, "Website relaunch");
    assert_eq!(settled.error, None);

    // Navigating away rebuilds the trail, swaps the context and drops the
    // page-scoped search wholesale.
    events.navigate("/tasks", tasks_tree());
    let cleared = wait_until(&page_context, |s| !s.has_active_search()).await;
    assert_eq!(cleared, SearchState::default());

    let mut context_rx = page_context.subscribe_context();
    tokio::time::timeout(Duration::from_secs(30), async {
        loop {
            if context_rx.borrow_and_update().page_title == "Tasks" {
                break;
            }
            context_rx.changed().await.expect("context channel closed");
        }
    })
    .await
    .expect("timed out waiting for page context");
    assert_eq!(page_context.page_id(), "/tasks");

    let mut trail_rx = breadcrumbs.subscribe();
    tokio::time::timeout(Duration::from_secs(30), async {
        loop {
            let done = trail_rx
                .borrow_and_update()
                .last()
                .is_some_and(|crumb| crumb.label == "Tasks");
            if done {
                break;
            }
            trail_rx.changed().await.expect("trail channel closed");
        }
    })
    .await
    .expect("timed out waiting for breadcrumbs");

    // No handler is registered for /tasks: queries settle to an empty,
    // error-free response.
    pipeline.dispatch("anything");
    tokio::time::sleep(Duration::from_secs(2)).await;
    let search = page_context.search_state();
    assert_eq!(search.query, "anything");
    assert!(search.results.is_empty());
    assert_eq!(search.error, None);

    breadcrumb_listener.abort();
    context_listener.abort();
}
