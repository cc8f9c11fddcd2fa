use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use futures::FutureExt;
use taskdeck_nav::PageContextState;
use taskdeck_protocol::SearchParams;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::error;
use tracing::warn;

use crate::registry::SearchHandler;
use crate::registry::SearchHandlerRegistry;

/// Quiet period a query must survive before it is dispatched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries shorter than this clear the results instead of dispatching.
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 2;

/// Tuning knobs for [`SearchPipeline`], fixed at construction time.
#[derive(Debug, Clone)]
pub struct SearchPipelineConfig {
    pub debounce: Duration,
    pub min_query_length: usize,
    /// Cancel a still-running handler as soon as a newer query settles.
    /// With this off the old handler runs to completion, but its outcome is
    /// discarded all the same; last query wins either way.
    pub cancel_previous: bool,
}

impl Default for SearchPipelineConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
            cancel_previous: true,
        }
    }
}

enum PipelineInput {
    Query(String),
    Clear,
}

enum Settled {
    Value(String),
    Cleared,
    Closed,
}

/// The search dispatch pipeline.
///
/// [`SearchPipeline::dispatch`] is called on every raw input change and
/// returns immediately: it records the query in the page-context state (so
/// the input field never lags) and forwards it to a worker task. The worker
/// debounces bursts, drops consecutive duplicates, short-circuits empty and
/// too-short queries, and for everything else resolves the handler for the
/// page that is current at that moment and runs it in a spawned task.
///
/// Correctness property: only the latest settled query's outcome is ever
/// published. Each dispatch supersedes the previous one by cancelling its
/// token and advancing a generation counter; a response that arrives for a
/// superseded generation, or for a page that is no longer current, is
/// discarded without touching state.
#[derive(Debug)]
pub struct SearchPipeline {
    input: mpsc::UnboundedSender<PipelineInput>,
    page_context: Arc<PageContextState>,
    generation: Arc<AtomicU64>,
    worker: JoinHandle<()>,
}

impl SearchPipeline {
    pub fn new(registry: Arc<SearchHandlerRegistry>, page_context: Arc<PageContextState>) -> Self {
        Self::with_config(registry, page_context, SearchPipelineConfig::default())
    }

    pub fn with_config(
        registry: Arc<SearchHandlerRegistry>,
        page_context: Arc<PageContextState>,
        config: SearchPipelineConfig,
    ) -> Self {
        let (input, receiver) = mpsc::unbounded_channel();
        let generation = Arc::new(AtomicU64::new(0));
        let worker = PipelineWorker {
            registry,
            page_context: Arc::clone(&page_context),
            config,
            generation: Arc::clone(&generation),
            last_settled: None,
            in_flight: None,
        };
        let worker = tokio::spawn(worker.run(receiver));
        Self {
            input,
            page_context,
            generation,
            worker,
        }
    }

    /// Feed one raw input change into the pipeline. The query text is
    /// visible in the search state immediately; whether a handler runs is
    /// decided after the debounce window.
    pub fn dispatch(&self, query: impl Into<String>) {
        let query = query.into();
        self.page_context.set_search_query(query.clone());
        if self.input.send(PipelineInput::Query(query)).is_err() {
            warn!("search pipeline worker is gone; dropping query");
        }
    }

    /// Explicit user clear: drop any in-flight search and zero the search
    /// substate right away.
    pub fn clear(&self) {
        // Advancing the generation here (not just in the worker) closes the
        // window where an in-flight response could land between the state
        // reset and the worker seeing the clear.
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.page_context.clear_search();
        if self.input.send(PipelineInput::Clear).is_err() {
            warn!("search pipeline worker is gone; clear applied to state only");
        }
    }
}

impl Drop for SearchPipeline {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

struct PipelineWorker {
    registry: Arc<SearchHandlerRegistry>,
    page_context: Arc<PageContextState>,
    config: SearchPipelineConfig,
    generation: Arc<AtomicU64>,
    last_settled: Option<String>,
    in_flight: Option<CancellationToken>,
}

impl PipelineWorker {
    async fn run(mut self, mut input: mpsc::UnboundedReceiver<PipelineInput>) {
        while let Some(event) = input.recv().await {
            match event {
                PipelineInput::Clear => self.handle_clear(),
                PipelineInput::Query(query) => match self.debounce(&mut input, query).await {
                    Settled::Value(settled) => self.handle_settled(settled),
                    Settled::Cleared => {}
                    Settled::Closed => return,
                },
            }
        }
    }

    /// Absorb newer inputs until one value survives a full quiet window.
    async fn debounce(
        &mut self,
        input: &mut mpsc::UnboundedReceiver<PipelineInput>,
        first: String,
    ) -> Settled {
        let mut pending = first;
        loop {
            tokio::select! {
                next = input.recv() => match next {
                    Some(PipelineInput::Query(query)) => pending = query,
                    Some(PipelineInput::Clear) => {
                        self.handle_clear();
                        return Settled::Cleared;
                    }
                    None => return Settled::Closed,
                },
                () = tokio::time::sleep(self.config.debounce) => {
                    return Settled::Value(pending);
                }
            }
        }
    }

    fn handle_clear(&mut self) {
        self.supersede(true);
        self.last_settled = None;
        self.page_context.clear_search();
    }

    /// Invalidate whatever search is currently in flight. Its completion
    /// will see a stale generation and discard itself; `cancel` also stops
    /// the work early.
    fn supersede(&mut self, cancel: bool) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(token) = self.in_flight.take()
            && cancel
        {
            token.cancel();
        }
    }

    fn handle_settled(&mut self, settled: String) {
        // Typing and deleting back to the already-dispatched string must
        // not re-trigger the handler.
        if self.last_settled.as_deref() == Some(settled.as_str()) {
            return;
        }
        self.last_settled = Some(settled.clone());

        if settled.is_empty() {
            self.supersede(true);
            self.page_context.clear_search();
            return;
        }
        if settled.chars().count() < self.config.min_query_length {
            self.supersede(true);
            self.page_context.set_search_results(Vec::new());
            return;
        }

        // Read the page id fresh: the active page may have changed since
        // this query was typed.
        let page_id = self.page_context.page_id();
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(token) = self.in_flight.take()
            && self.config.cancel_previous
        {
            token.cancel();
        }

        let Some(handler) = self.registry.find(&page_id) else {
            debug!(%page_id, query = %settled, "no search handler for page");
            self.page_context.set_search_results(Vec::new());
            return;
        };

        self.page_context.set_searching(true);
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        let params = SearchParams::new(settled, page_id);
        tokio::spawn(run_search(
            handler,
            params,
            token,
            Arc::clone(&self.generation),
            my_generation,
            Arc::clone(&self.page_context),
        ));
    }
}

async fn run_search(
    handler: Arc<dyn SearchHandler>,
    params: SearchParams,
    token: CancellationToken,
    generation: Arc<AtomicU64>,
    my_generation: u64,
    page_context: Arc<PageContextState>,
) {
    let query = params.query.clone();
    let page_id = params.page_id.clone();

    let outcome = tokio::select! {
        () = token.cancelled() => {
            debug!(%query, "search superseded before completion");
            return;
        }
        outcome = AssertUnwindSafe(handler.search(params)).catch_unwind() => outcome,
    };

    // A newer dispatch or an explicit clear happened while we ran.
    if generation.load(Ordering::SeqCst) != my_generation {
        debug!(%query, "discarding superseded search response");
        return;
    }
    // A response for a page we have left must not repopulate the state
    // navigation just cleared.
    if page_context.page_id() != page_id {
        debug!(%query, %page_id, "discarding search response for a left page");
        return;
    }

    match outcome {
        Ok(Ok(response)) => {
            debug!(%query, results = response.results.len(), "search completed");
            page_context.set_search_results(response.results);
        }
        Ok(Err(err)) => {
            warn!(%query, error = %err, "search handler failed");
            page_context.set_search_error(err.to_string());
        }
        Err(_) => {
            error!(%query, "search handler panicked");
            page_context.set_search_error("search failed");
        }
    }
}
