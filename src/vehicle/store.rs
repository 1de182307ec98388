//! VehicleStore - Port to whatever backing store holds the vehicle rows.

use super::{Vehicle, VehicleStoreError};

/// One page of vehicles plus the total row count of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct VehiclePage {
    pub vehicles: Vec<Vehicle>,
    /// 1-based page number this page was fetched for.
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}

impl VehiclePage {
    /// True when no page follows this one.
    pub fn is_last(&self) -> bool {
        self.page.saturating_mul(self.per_page) >= self.total
    }
}

/// Fetch, paginate and update vehicle rows.
///
/// The search core only reads through this trait; `update` exists so hosts can
/// write status changes back through the same handle they filter from.
pub trait VehicleStore: Send + Sync {
    /// Fetch a 1-based page in the store's natural (newest-first) order.
    fn fetch_page(&self, page: usize, per_page: usize) -> Result<VehiclePage, VehicleStoreError>;

    /// Get one vehicle by id. Returns None if not found.
    fn get(&self, id: &str) -> Result<Option<Vehicle>, VehicleStoreError>;

    /// Replace an existing vehicle. Fails with `NotFound` when the id is unknown.
    fn update(&self, vehicle: &Vehicle) -> Result<(), VehicleStoreError>;
}

/// Page through the whole store and collect every vehicle, preserving order.
pub fn load_all<S: VehicleStore + ?Sized>(
    store: &S,
    per_page: usize,
) -> Result<Vec<Vehicle>, VehicleStoreError> {
    let per_page = per_page.max(1);
    let mut vehicles = Vec::new();
    let mut page = 1;

    loop {
        let fetched = store.fetch_page(page, per_page)?;
        let done = fetched.is_last() || fetched.vehicles.is_empty();
        vehicles.extend(fetched.vehicles);
        if done {
            break;
        }
        page += 1;
    }

    tracing::debug!(count = vehicles.len(), pages = page, "loaded vehicle collection");
    Ok(vehicles)
}
