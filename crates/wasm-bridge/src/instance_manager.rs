//! Per-surface chart registry
//! Keeps the charts this module constructed so a repeated page-ready trigger
//! cannot build a second chart on the same canvas.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::page::Chart;

/// Charts keyed by the id of the surface they draw on.
///
/// A surface is `pending` between [`reserve`](Self::reserve) and the
/// matching `insert` or `release`, while the library constructs its chart.
pub struct InstanceRegistry<C> {
    charts: HashMap<String, C>,
    pending: HashSet<String>,
}

impl<C> Default for InstanceRegistry<C> {
    fn default() -> Self {
        Self {
            charts: HashMap::new(),
            pending: HashSet::new(),
        }
    }
}

impl<C> InstanceRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the surface has a chart, built or under construction
    pub fn contains(&self, surface_id: &str) -> bool {
        self.charts.contains_key(surface_id) || self.pending.contains(surface_id)
    }

    /// Claim a free surface for construction. Returns `false` if taken.
    pub fn reserve(&mut self, surface_id: &str) -> bool {
        if self.contains(surface_id) {
            return false;
        }
        self.pending.insert(surface_id.to_string())
    }

    /// Drop a reservation whose construction failed
    pub fn release(&mut self, surface_id: &str) {
        self.pending.remove(surface_id);
    }

    /// Register a chart, returning any chart it displaced
    pub fn insert(&mut self, surface_id: &str, chart: C) -> Option<C> {
        self.pending.remove(surface_id);
        self.charts.insert(surface_id.to_string(), chart)
    }

    pub fn remove(&mut self, surface_id: &str) -> Option<C> {
        self.charts.remove(surface_id)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty() && self.pending.is_empty()
    }
}

// Thread-local storage for the charts living on this page
thread_local! {
    static BROWSER_CHARTS: RefCell<InstanceRegistry<Chart>> = RefCell::new(InstanceRegistry::new());
}

/// Run `f` against the page's chart registry.
///
/// The cell is handed over unborrowed; callers borrow it only between calls
/// into JS, since library hooks may re-enter the exported functions.
pub fn with_browser_registry<F, R>(f: F) -> R
where
    F: FnOnce(&RefCell<InstanceRegistry<Chart>>) -> R,
{
    BROWSER_CHARTS.with(f)
}
