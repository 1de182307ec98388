//! Inventory search core for a used-vehicle yard.
//!
//! Vehicle records are narrowed by a [`FilterSpecification`], held live in a
//! [`FilterState`] with a memoized, paged view, snapshotted into named
//! [`SavedSearch`]es behind a storage port, and summarized by [`stats`].

pub mod filter;
mod parse;
mod saved_search;
pub mod stats;
mod vehicle;

pub use filter::{
    DateRange, FilterPatch, FilterSpecification, FilterState, Page, PaperworkFilter, PriceRange,
    SharedFilterState, StateError, StatusFilter, UnknownStatus,
};
pub use parse::ParseWarning;
#[cfg(feature = "file-store")]
pub use saved_search::JsonFileSavedSearchStore;
pub use saved_search::{
    InMemorySavedSearchStore, RegistryError, SavedSearch, SavedSearchRegistry, SavedSearchStore,
    StorageError,
};
pub use stats::{DashboardStats, StatusCounts};
pub use vehicle::{
    load_all, InMemoryVehicleStore, Vehicle, VehicleDocument, VehiclePage, VehicleStatus,
    VehicleStore, VehicleStoreError,
};
