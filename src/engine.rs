//! Aggregation and view-refresh engine.
//!
//! [`aggregate`] turns a raw document listing into the ordered dated set:
//! filter through the date pattern, stable-sort by key. [`View`] drives the
//! display lifecycle around it: `Closed → Opening → Ready`, with `refresh`
//! callable any number of times once the view is open.
//!
//! Refresh is generation-counted. Each call bumps an atomic counter,
//! captures its value, and re-checks it under the container lock before
//! committing. A refresh that was superseded while awaiting the store or
//! renderer discards its staged regions instead of clobbering newer output,
//! so two overlapping refreshes can never interleave in the container.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::{SortDirection, ViewConfig};
use crate::models::{DatedDocument, Document};
use crate::navigate::Navigator;
use crate::pattern::DatePattern;
use crate::render::{RenderedBody, Renderer};
use crate::store::DocumentStore;
use crate::view::{DocumentRegion, ViewContainer};

/// Filter documents through the date pattern and sort them by key.
///
/// Non-matching documents are dropped silently. The sort is stable:
/// documents with equal keys (same basename in different folders) keep
/// their listing order in both directions. A pattern with no date tokens
/// matches nothing, so a misconfigured pattern yields an empty view rather
/// than an error.
pub fn aggregate(
    documents: Vec<Document>,
    pattern: &DatePattern,
    direction: SortDirection,
) -> Vec<DatedDocument> {
    let mut dated: Vec<DatedDocument> = documents
        .into_iter()
        .filter_map(|document| {
            pattern
                .match_basename(&document.basename)
                .map(|key| DatedDocument { document, key })
        })
        .collect();

    match direction {
        SortDirection::Ascending => dated.sort_by(|a, b| a.key.cmp(&b.key)),
        SortDirection::Descending => dated.sort_by(|a, b| b.key.cmp(&a.key)),
    }

    dated
}

/// Result of a [`View::refresh`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The container now holds this many regions.
    Committed(usize),
    /// A newer refresh (or a close) started while this one was in flight;
    /// its staged output was discarded.
    Superseded,
    /// The view is closed; nothing was done.
    Closed,
}

/// Lifecycle state of a [`View`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Closed,
    Opening,
    Ready,
}

/// One aggregation view instance.
///
/// Owns its [`ViewContainer`] outright — no re-querying of external UI
/// state to find a previous run's output. Collaborators are shared trait
/// objects so hosts and tests can plug in their own store, renderer, and
/// navigator.
pub struct View {
    store: Arc<dyn DocumentStore>,
    renderer: Arc<dyn Renderer>,
    navigator: Arc<dyn Navigator>,
    container: Mutex<ViewContainer>,
    state: Mutex<ViewState>,
    generation: AtomicU64,
}

impl View {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        renderer: Arc<dyn Renderer>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            renderer,
            navigator,
            container: Mutex::new(ViewContainer::new()),
            state: Mutex::new(ViewState::Closed),
            generation: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> ViewState {
        *self.state.lock().unwrap()
    }

    /// Open the view: set up the container and run the initial refresh.
    /// Opening an already-open view just refreshes it.
    pub async fn open(&self, config: &ViewConfig) -> Result<RefreshOutcome> {
        {
            let mut state = self.state.lock().unwrap();
            if *state == ViewState::Closed {
                *state = ViewState::Opening;
                self.container.lock().unwrap().clear();
            }
        }

        let outcome = self.refresh_inner(config).await?;
        {
            // A close that raced the initial refresh wins.
            let mut state = self.state.lock().unwrap();
            if *state != ViewState::Closed {
                *state = ViewState::Ready;
            }
        }
        Ok(outcome)
    }

    /// Re-synchronize the container with the store's current contents.
    ///
    /// Reads the configuration fresh, lists documents fresh, and processes
    /// regions sequentially in sorted order. Idempotent: identical inputs
    /// leave the container observably identical. A no-op on a closed view.
    pub async fn refresh(&self, config: &ViewConfig) -> Result<RefreshOutcome> {
        if self.state() == ViewState::Closed {
            return Ok(RefreshOutcome::Closed);
        }
        self.refresh_inner(config).await
    }

    async fn refresh_inner(&self, config: &ViewConfig) -> Result<RefreshOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let pattern = config.pattern();
        let documents = self.store.list_documents().await?;
        let dated = aggregate(documents, &pattern, config.sort);
        debug!(
            generation,
            matched = dated.len(),
            pattern = pattern.raw(),
            "aggregated dated documents"
        );

        // Sequential, top-to-bottom: each region is fully rendered and
        // wired before the next document starts.
        let mut regions = Vec::with_capacity(dated.len());
        for entry in &dated {
            let region = match self.build_region(entry).await {
                Ok(region) => region,
                Err(err) => {
                    warn!(
                        path = %entry.document.path,
                        error = %err,
                        "document degraded, continuing with remaining documents"
                    );
                    DocumentRegion::degraded(&entry.document, entry.key)
                }
            };
            regions.push(region);
        }

        let mut container = self.container.lock().unwrap();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "refresh superseded, discarding staged output");
            return Ok(RefreshOutcome::Superseded);
        }
        let count = regions.len();
        container.replace_children(regions);
        Ok(RefreshOutcome::Committed(count))
    }

    async fn build_region(&self, entry: &DatedDocument) -> Result<DocumentRegion> {
        let text = self.store.read_content(&entry.document).await?;
        let mut body = RenderedBody::new();
        self.renderer
            .render(&text, &mut body, &entry.document.path)
            .await?;
        Ok(DocumentRegion::rendered(entry, body))
    }

    /// Activate an interaction in a region, as a click on the rendered
    /// surface would. Out-of-range indices are ignored.
    pub fn activate(&self, region_index: usize, interaction_index: usize) {
        let container = self.container.lock().unwrap();
        if let Some(region) = container.children().get(region_index) {
            region.activate(interaction_index, self.navigator.as_ref());
        }
    }

    /// Snapshot of the container's current regions, in display order.
    pub fn regions(&self) -> Vec<DocumentRegion> {
        self.container.lock().unwrap().children().to_vec()
    }

    /// Tear the view down: any in-flight refresh is superseded, the
    /// container is emptied, and wired interactions are dropped.
    pub fn close(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.state.lock().unwrap() = ViewState::Closed;
        self.container.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(basenames: &[&str]) -> Vec<Document> {
        basenames
            .iter()
            .map(|b| Document::new(format!("{b}.md"), *b))
            .collect()
    }

    fn pattern() -> DatePattern {
        DatePattern::compile("YYYY-MM-DD")
    }

    #[test]
    fn test_aggregate_filters_non_matching() {
        let input = docs(&["2024-01-05", "2024-1-5", "notes", "2024-01-05-extra"]);
        let dated = aggregate(input, &pattern(), SortDirection::Ascending);
        assert_eq!(dated.len(), 1);
        assert_eq!(dated[0].document.basename, "2024-01-05");
    }

    #[test]
    fn test_aggregate_sort_directions() {
        let input = docs(&["2023-03-01", "2023-01-10", "2023-02-20"]);

        let desc = aggregate(input.clone(), &pattern(), SortDirection::Descending);
        let names: Vec<_> = desc.iter().map(|d| d.document.basename.as_str()).collect();
        assert_eq!(names, ["2023-03-01", "2023-02-20", "2023-01-10"]);

        let asc = aggregate(input, &pattern(), SortDirection::Ascending);
        let names: Vec<_> = asc.iter().map(|d| d.document.basename.as_str()).collect();
        assert_eq!(names, ["2023-01-10", "2023-02-20", "2023-03-01"]);
    }

    #[test]
    fn test_ascending_and_descending_are_reverses() {
        let input = docs(&["2022-06-01", "2021-01-01", "2024-12-31", "2023-07-15"]);
        let asc = aggregate(input.clone(), &pattern(), SortDirection::Ascending);
        let mut desc = aggregate(input, &pattern(), SortDirection::Descending);
        desc.reverse();
        let asc: Vec<_> = asc.iter().map(|d| d.document.path.as_str()).collect();
        let desc: Vec<_> = desc.iter().map(|d| d.document.path.as_str()).collect();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_equal_keys_keep_listing_order_in_both_directions() {
        // Same basename in different folders: equal keys, distinct docs.
        let input = vec![
            Document::new("b/2024-01-05.md", "2024-01-05"),
            Document::new("a/2024-01-05.md", "2024-01-05"),
            Document::new("c/2024-01-04.md", "2024-01-04"),
        ];

        let asc = aggregate(input.clone(), &pattern(), SortDirection::Ascending);
        let paths: Vec<_> = asc.iter().map(|d| d.document.path.as_str()).collect();
        assert_eq!(
            paths,
            ["c/2024-01-04.md", "b/2024-01-05.md", "a/2024-01-05.md"]
        );

        let desc = aggregate(input, &pattern(), SortDirection::Descending);
        let paths: Vec<_> = desc.iter().map(|d| d.document.path.as_str()).collect();
        assert_eq!(
            paths,
            ["b/2024-01-05.md", "a/2024-01-05.md", "c/2024-01-04.md"]
        );
    }

    #[test]
    fn test_malformed_pattern_yields_empty_set() {
        let input = docs(&["2024-01-05", "2024-01-06"]);
        let malformed = DatePattern::compile("journal");
        assert!(aggregate(input, &malformed, SortDirection::Ascending).is_empty());
    }
}
