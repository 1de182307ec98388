//! FilterState - the live filter specification and its memoized view.
//!
//! The view is recomputed lazily on the next read after the vehicle
//! collection or the specification changes. Collection changes are detected
//! by `Arc` identity; every specification setter bumps a revision, so a read
//! is never stale relative to the latest write.

use std::fmt;
use std::sync::{Arc, Mutex};

use super::{apply, FilterPatch, FilterSpecification};
use crate::vehicle::Vehicle;

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// One page of the filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

struct Memo {
    vehicles: Arc<Vec<Vehicle>>,
    revision: u64,
    view: Arc<Vec<Vehicle>>,
}

/// Single-owner filter state. See [`SharedFilterState`] for use across threads.
pub struct FilterState {
    vehicles: Arc<Vec<Vehicle>>,
    spec: FilterSpecification,
    revision: u64,
    page: usize,
    page_size: usize,
    memo: Option<Memo>,
    computations: u64,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(Arc::new(Vec::new()))
    }
}

impl FilterState {
    pub fn new(vehicles: Arc<Vec<Vehicle>>) -> Self {
        Self {
            vehicles,
            spec: FilterSpecification::default(),
            revision: 0,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            memo: None,
            computations: 0,
        }
    }

    /// Rows per page; values below 1 are raised to 1.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn filters(&self) -> &FilterSpecification {
        &self.spec
    }

    pub fn vehicles(&self) -> &Arc<Vec<Vehicle>> {
        &self.vehicles
    }

    /// True when at least one clause is active, i.e. there is something worth
    /// saving as a named search.
    pub fn has_active_filters(&self) -> bool {
        !self.spec.is_default()
    }

    /// Swap in a new collection. Passing the same `Arc` is a no-op.
    pub fn set_vehicles(&mut self, vehicles: Arc<Vec<Vehicle>>) {
        if Arc::ptr_eq(&self.vehicles, &vehicles) {
            return;
        }
        self.vehicles = vehicles;
        self.page = 1;
    }

    /// Merge a partial update into the current specification.
    pub fn set_filters(&mut self, patch: FilterPatch) {
        patch.apply_to(&mut self.spec);
        self.touch();
    }

    /// Adopt a whole specification, e.g. one applied from a saved search.
    pub fn replace(&mut self, spec: FilterSpecification) {
        self.spec = spec;
        self.touch();
    }

    /// Back to the identity filter.
    pub fn clear(&mut self) {
        self.replace(FilterSpecification::default());
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        self.page = 1;
    }

    /// The vehicles matching the current specification, in collection order.
    pub fn filtered(&mut self) -> Arc<Vec<Vehicle>> {
        if let Some(memo) = &self.memo {
            if memo.revision == self.revision && Arc::ptr_eq(&memo.vehicles, &self.vehicles) {
                return Arc::clone(&memo.view);
            }
        }

        let view = Arc::new(apply(&self.vehicles, &self.spec));
        self.computations += 1;
        tracing::debug!(
            total = self.vehicles.len(),
            matched = view.len(),
            active_clauses = self.spec.active_clause_count(),
            "recomputed filtered vehicle view"
        );

        self.memo = Some(Memo {
            vehicles: Arc::clone(&self.vehicles),
            revision: self.revision,
            view: Arc::clone(&view),
        });
        view
    }

    /// How many times the view has been computed.
    pub fn computations(&self) -> u64 {
        self.computations
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&mut self) -> usize {
        let total = self.filtered().len();
        total.div_ceil(self.page_size).max(1)
    }

    /// Move to a 1-based page, clamped to the available range.
    pub fn set_page(&mut self, page: usize) {
        let last = self.page_count();
        self.page = page.clamp(1, last);
    }

    pub fn current_page(&mut self) -> Page<Vehicle> {
        let view = self.filtered();
        let total_pages = view.len().div_ceil(self.page_size).max(1);
        let page = self.page.min(total_pages);
        let items = view
            .iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .cloned()
            .collect();

        Page {
            items,
            page,
            per_page: self.page_size,
            total_items: view.len(),
            total_pages,
        }
    }
}

/// Error for [`SharedFilterState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    LockPoisoned(&'static str),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::LockPoisoned(operation) => {
                write!(f, "filter state lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StateError {}

/// [`FilterState`] behind one mutex. Each call is a single critical section,
/// so a write followed by a read in [`SharedFilterState::set_and_read`] sees
/// its own write.
///
/// Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct SharedFilterState {
    inner: Arc<Mutex<FilterState>>,
}

impl SharedFilterState {
    pub fn new(state: FilterState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Run `f` with exclusive access to the state.
    pub fn with<R>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut FilterState) -> R,
    ) -> Result<R, StateError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| StateError::LockPoisoned(operation))?;
        Ok(f(&mut state))
    }

    pub fn set_filters(&self, patch: FilterPatch) -> Result<(), StateError> {
        self.with("set filters", |state| state.set_filters(patch))
    }

    pub fn replace(&self, spec: FilterSpecification) -> Result<(), StateError> {
        self.with("replace filters", |state| state.replace(spec))
    }

    pub fn set_vehicles(&self, vehicles: Arc<Vec<Vehicle>>) -> Result<(), StateError> {
        self.with("set vehicles", |state| state.set_vehicles(vehicles))
    }

    pub fn filters(&self) -> Result<FilterSpecification, StateError> {
        self.with("read filters", |state| state.filters().clone())
    }

    pub fn filtered(&self) -> Result<Arc<Vec<Vehicle>>, StateError> {
        self.with("read view", |state| state.filtered())
    }

    /// Apply `patch` and return the resulting view under one lock.
    pub fn set_and_read(&self, patch: FilterPatch) -> Result<Arc<Vec<Vehicle>>, StateError> {
        self.with("set and read", |state| {
            state.set_filters(patch);
            state.filtered()
        })
    }
}
