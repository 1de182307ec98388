//! InMemoryVehicleStore - Vec-backed vehicle store for testing and development.

use std::sync::{Arc, RwLock};

use super::{Vehicle, VehiclePage, VehicleStore, VehicleStoreError};

/// In-memory vehicle store. Rows keep insertion order, newest first.
///
/// Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryVehicleStore {
    rows: Arc<RwLock<Vec<Vehicle>>>,
}

impl InMemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from rows already in display order.
    pub fn with_vehicles(vehicles: Vec<Vehicle>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(vehicles)),
        }
    }

    /// Add a vehicle at the front, as intake does for new arrivals.
    pub fn insert(&self, vehicle: Vehicle) -> Result<(), VehicleStoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| VehicleStoreError::LockPoisoned("insert"))?;
        rows.insert(0, vehicle);
        Ok(())
    }

    pub fn len(&self) -> Result<usize, VehicleStoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| VehicleStoreError::LockPoisoned("len"))?;
        Ok(rows.len())
    }

    pub fn is_empty(&self) -> Result<bool, VehicleStoreError> {
        Ok(self.len()? == 0)
    }
}

impl VehicleStore for InMemoryVehicleStore {
    fn fetch_page(&self, page: usize, per_page: usize) -> Result<VehiclePage, VehicleStoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| VehicleStoreError::LockPoisoned("fetch page"))?;

        let page = page.max(1);
        let per_page = per_page.max(1);
        let vehicles = rows
            .iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .cloned()
            .collect();

        Ok(VehiclePage {
            vehicles,
            page,
            per_page,
            total: rows.len(),
        })
    }

    fn get(&self, id: &str) -> Result<Option<Vehicle>, VehicleStoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| VehicleStoreError::LockPoisoned("get"))?;
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    fn update(&self, vehicle: &Vehicle) -> Result<(), VehicleStoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| VehicleStoreError::LockPoisoned("update"))?;

        let row = rows
            .iter_mut()
            .find(|row| row.id == vehicle.id)
            .ok_or_else(|| VehicleStoreError::NotFound {
                id: vehicle.id.clone(),
            })?;
        *row = vehicle.clone();
        Ok(())
    }
}
