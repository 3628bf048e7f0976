#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! Session controller for the link portal.
//!
//! `PortalSession` owns the canonical tree, the current filtered view, and
//! the expansion state store, and runs as a single logical actor: load,
//! debounced searches, and toggle events are processed strictly one at a
//! time. The view layer consumes `view()`, `match_count()`, `auto_expand()`
//! and `is_expanded()`; it feeds back query text via `queue_query` and user
//! toggles via `toggle`.

pub mod debounce;

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use portal_core::error::Error;
use portal_core::ident::collect_category_ids;
use portal_core::loader;
use portal_core::search::search;
use portal_core::traits::StateStore;
use portal_core::types::{ExpansionMap, Node, NodeId, Tree};
use portal_state::reconcile;

use debounce::SearchDebouncer;

/// Quiet period between the last keystroke and the search it triggers.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Lifecycle of one session. `Error` is terminal for the initial load
/// attempt; there is no automatic retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Error,
}

pub struct PortalSession<S: StateStore> {
    phase: Phase,
    error: Option<String>,
    canonical: Option<Tree>,
    /// `None` while the view is the canonical tree (empty query).
    filtered: Option<Tree>,
    match_count: Option<usize>,
    no_results: bool,
    /// Display hint only: categories to open because of the active query.
    /// Not persisted unless the user toggles them manually.
    auto_expand: BTreeSet<NodeId>,
    /// Explicit user intent (plus restored prior intent), keyed by node id.
    expansion: ExpansionMap,
    restored: bool,
    store: S,
    debounce: SearchDebouncer,
}

impl<S: StateStore> PortalSession<S> {
    pub fn new(store: S, debounce: Duration) -> Self {
        Self {
            phase: Phase::Loading,
            error: None,
            canonical: None,
            filtered: None,
            match_count: None,
            no_results: false,
            auto_expand: BTreeSet::new(),
            expansion: ExpansionMap::new(),
            restored: false,
            store,
            debounce: SearchDebouncer::new(debounce),
        }
    }

    /// Load the portal document from disk. The one suspension point before
    /// the session becomes interactive; no timeout is applied.
    pub async fn load_from_path(&mut self, path: &Path) {
        let result = match tokio::fs::read_to_string(path).await {
            Ok(raw) => loader::parse_document(&raw),
            Err(e) => Err(Error::Load(format!("cannot read {}: {e}", path.display()))),
        };
        self.finish_load(result);
    }

    /// Load from an in-memory document (tests, embedded data).
    pub fn load_document(&mut self, raw: &str) {
        self.finish_load(loader::parse_document(raw));
    }

    fn finish_load(&mut self, result: Result<Tree, Error>) {
        match result {
            Ok(tree) => {
                info!("portal document loaded: {} top-level items", tree.items.len());
                self.canonical = Some(tree);
                self.phase = Phase::Ready;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.phase = Phase::Error;
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The tree the view layer should render: the filtered tree during an
    /// active search, the canonical tree otherwise. `None` until Ready.
    pub fn view(&self) -> Option<&Tree> {
        self.filtered.as_ref().or(self.canonical.as_ref())
    }

    /// `None` while the count display is suppressed (empty query).
    pub fn match_count(&self) -> Option<usize> {
        self.match_count
    }

    /// True after a non-empty query matched nothing.
    pub fn no_results(&self) -> bool {
        self.no_results
    }

    pub fn auto_expand(&self) -> &BTreeSet<NodeId> {
        &self.auto_expand
    }

    /// Open state of a rendered category: explicit user intent first,
    /// then the search auto-expand hint, defaulting to collapsed.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expansion.get(id).copied().unwrap_or_else(|| self.auto_expand.contains(id))
    }

    /// Record a keystroke; the search itself runs after the quiet period.
    pub fn queue_query(&mut self, query: &str) {
        if self.phase == Phase::Ready {
            self.debounce.submit(query);
        }
    }

    pub fn has_pending_search(&self) -> bool {
        self.debounce.is_armed()
    }

    /// Await the debounce timer and run the surviving query. Intended for a
    /// `select!` arm; never resolves while no search is pending.
    pub async fn run_pending_search(&mut self) {
        let query = self.debounce.fire().await;
        self.run_search(&query);
    }

    /// Drop any pending query and return to the canonical view.
    pub fn clear_query(&mut self) {
        self.debounce.cancel();
        self.run_search("");
    }

    /// Execute a search immediately against the canonical tree.
    pub fn run_search(&mut self, query: &str) {
        let Some(canonical) = &self.canonical else {
            return;
        };
        let outcome = search(canonical, query);
        let match_count = outcome.match_count;
        let no_results = outcome.is_no_results();
        let filtered = match outcome.tree {
            Cow::Borrowed(_) => None,
            Cow::Owned(tree) => Some(tree),
        };
        self.match_count = match_count;
        self.no_results = no_results;
        match filtered {
            None => {
                self.filtered = None;
                self.auto_expand.clear();
            }
            Some(tree) => {
                self.auto_expand = if match_count.unwrap_or(0) > 0 {
                    matching_category_ids(&tree, &query.trim().to_lowercase())
                } else {
                    BTreeSet::new()
                };
                self.filtered = Some(tree);
            }
        }
    }

    /// Apply persisted expansion state. Runs exactly once, after the first
    /// successful render; later calls are no-ops.
    pub fn restore(&mut self) {
        if self.restored || self.phase != Phase::Ready {
            return;
        }
        self.restored = true;
        let saved = self.store.load();
        let Some(view) = self.view() else {
            return;
        };
        let applied = reconcile(&saved, &collect_category_ids(view));
        info!("restored {} expanded categories", applied.len());
        self.expansion.extend(applied);
    }

    /// Record a user-driven expand/collapse of a rendered category and
    /// persist the wholesale snapshot of every rendered category's state.
    pub fn toggle(&mut self, id: &str, open: bool) {
        let rendered = match self.view() {
            Some(view) => collect_category_ids(view),
            None => return,
        };
        if !rendered.contains(id) {
            return;
        }
        self.expansion.insert(id.to_string(), open);
        let snapshot: ExpansionMap = rendered
            .iter()
            .map(|cat| (cat.clone(), self.expansion.get(cat).copied().unwrap_or(false)))
            .collect();
        if let Err(e) = self.store.save(&snapshot) {
            warn!("failed to persist expansion state: {e}");
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Ids of categories whose subtree text contains `needle`. On a filtered
/// tree this is what decides auto-expansion: a category opens when the query
/// appears anywhere in its rendered text, own title or descendant.
fn matching_category_ids(tree: &Tree, needle: &str) -> BTreeSet<NodeId> {
    let mut out = BTreeSet::new();
    for node in &tree.items {
        subtree_contains(node, needle, &mut out);
    }
    out
}

fn subtree_contains(node: &Node, needle: &str, out: &mut BTreeSet<NodeId>) -> bool {
    match node {
        Node::Link { title, .. } => title.to_lowercase().contains(needle),
        Node::Category { id, title, children, .. } => {
            let mut hit = title.to_lowercase().contains(needle);
            for child in children {
                hit |= subtree_contains(child, needle, out);
            }
            if hit {
                out.insert(id.clone());
            }
            hit
        }
    }
}
