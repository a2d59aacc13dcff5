//! Filter store with reactive subscribers

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

tokio::task_local! {
    static CURRENT_FILTERS: FilterStore;
}

/// A facet filter shown as a badge in the toolbar.
///
/// Two filters are the same filter when `(kind, value)` match; the label is
/// presentation only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    pub label: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Filter {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            kind: kind.into(),
        }
    }

    /// Whether both filters target the same `(type, value)` facet
    pub fn same_facet(&self, other: &Filter) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

/// Insertion-ordered list of active filters, free of `(type, value)` duplicates.
///
/// Cloning a store yields another handle to the same list.
///
/// # Example
///
/// ```rust
/// use opsconsole_sdk::{Filter, FilterStore};
///
/// let store = FilterStore::new();
/// store.add_filter(Filter::new("Statut", "delayed", "status"));
/// store.add_filter(Filter::new("Statut", "delayed", "status"));
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Clone)]
pub struct FilterStore {
    tx: Arc<watch::Sender<Vec<Filter>>>,
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FilterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterStore")
            .field("filters", &*self.tx.borrow())
            .finish()
    }
}

impl FilterStore {
    /// Create an empty store
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self { tx: Arc::new(tx) }
    }

    /// Append a filter unless its `(type, value)` is already present.
    ///
    /// Returns `true` if the list changed. A duplicate neither reorders the
    /// list nor replaces the existing label.
    pub fn add_filter(&self, filter: Filter) -> bool {
        let added = self.tx.send_if_modified(|filters| {
            if filters.iter().any(|f| f.same_facet(&filter)) {
                false
            } else {
                filters.push(filter);
                true
            }
        });
        debug!(added, "add_filter");
        added
    }

    /// Remove the filter at `index`. Out-of-range indices are ignored.
    pub fn remove_filter(&self, index: usize) -> Option<Filter> {
        let mut removed = None;
        self.tx.send_if_modified(|filters| {
            if index < filters.len() {
                removed = Some(filters.remove(index));
                true
            } else {
                false
            }
        });
        removed
    }

    /// Remove every filter
    pub fn clear_filters(&self) {
        self.tx.send_if_modified(|filters| {
            if filters.is_empty() {
                false
            } else {
                filters.clear();
                true
            }
        });
    }

    /// Current filters, in insertion order
    pub fn snapshot(&self) -> Vec<Filter> {
        self.tx.borrow().clone()
    }

    /// Run `f` against the current list without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&[Filter]) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Whether a filter with this `(type, value)` is active
    pub fn contains(&self, kind: &str, value: &str) -> bool {
        self.tx
            .borrow()
            .iter()
            .any(|f| f.kind == kind && f.value == value)
    }

    /// Active filters of one facet type
    pub fn of_type(&self, kind: &str) -> Vec<Filter> {
        self.tx
            .borrow()
            .iter()
            .filter(|f| f.kind == kind)
            .cloned()
            .collect()
    }

    /// Receiver notified after every change to the list
    pub fn subscribe(&self) -> watch::Receiver<Vec<Filter>> {
        self.tx.subscribe()
    }

    /// Run `fut` with this store installed as the task's filter scope.
    pub async fn scope<F: Future>(self, fut: F) -> F::Output {
        CURRENT_FILTERS.scope(self, fut).await
    }

    /// Synchronous variant of [`scope`](Self::scope).
    pub fn sync_scope<R>(self, f: impl FnOnce() -> R) -> R {
        CURRENT_FILTERS.sync_scope(self, f)
    }
}

/// The filter store of the enclosing scope.
///
/// # Panics
///
/// Panics when called outside [`FilterStore::scope`] or
/// [`FilterStore::sync_scope`]: a consumer mounted without a store is a
/// wiring bug.
pub fn use_filters() -> FilterStore {
    match try_use_filters() {
        Some(store) => store,
        None => panic!("use_filters() must be called within a FilterStore scope"),
    }
}

/// The filter store of the enclosing scope, if any.
pub fn try_use_filters() -> Option<FilterStore> {
    CURRENT_FILTERS.try_with(|store| store.clone()).ok()
}
