//! Vehicle records - the inventory rows the search core reads from.
//!
//! Records come from the backing store behind the [`VehicleStore`] port and
//! are consumed read-mostly. Optional fields are genuinely optional: a sold
//! vehicle without buyer or sale data is incomplete, not invalid.
//!
//! ## Example
//!
//! ```ignore
//! use yard_search::{load_all, InMemoryVehicleStore, Vehicle, VehicleStatus};
//!
//! let store = InMemoryVehicleStore::new();
//! store.insert(Vehicle::new("v-1", VehicleStatus::Yard))?;
//! let vehicles = load_all(&store, 100)?;
//! ```

mod in_memory;
mod store;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parse;

/// Lifecycle status of a vehicle. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleStatus {
    Yard,
    Sold,
    PickYourPart,
    SaRecycling,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 4] = [
        VehicleStatus::Yard,
        VehicleStatus::Sold,
        VehicleStatus::PickYourPart,
        VehicleStatus::SaRecycling,
    ];

    /// Wire name, e.g. `"pick-your-part"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Yard => "yard",
            VehicleStatus::Sold => "sold",
            VehicleStatus::PickYourPart => "pick-your-part",
            VehicleStatus::SaRecycling => "sa-recycling",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document (title scan, bill of sale, ...) attached to a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDocument {
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub license_plate: Option<String>,
    pub status: VehicleStatus,
    /// `None` when the row never recorded whether a title is on hand.
    #[serde(default)]
    pub title_present: Option<bool>,
    #[serde(default)]
    pub paperwork: Option<String>,
    #[serde(default)]
    pub purchase_price: Option<String>,
    #[serde(default)]
    pub sale_price: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub sale_date: Option<String>,
    #[serde(default)]
    pub buyer_first_name: Option<String>,
    #[serde(default)]
    pub buyer_last_name: Option<String>,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub car_images: Vec<String>,
    #[serde(default)]
    pub documents: Vec<VehicleDocument>,
}

impl Vehicle {
    /// A bare record with only identity and status set.
    pub fn new(id: impl Into<String>, status: VehicleStatus) -> Self {
        Self {
            id: id.into(),
            year: None,
            make: None,
            model: None,
            vehicle_id: None,
            license_plate: None,
            status,
            title_present: None,
            paperwork: None,
            purchase_price: None,
            sale_price: None,
            created_at: None,
            purchase_date: None,
            sale_date: None,
            buyer_first_name: None,
            buyer_last_name: None,
            seller_name: None,
            car_images: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Buyer's full name, `None` when neither part is recorded.
    pub fn buyer_name(&self) -> Option<String> {
        let first = self.buyer_first_name.as_deref().unwrap_or("").trim();
        let last = self.buyer_last_name.as_deref().unwrap_or("").trim();
        let full = format!("{} {}", first, last);
        let full = full.trim();
        if full.is_empty() {
            None
        } else {
            Some(full.to_string())
        }
    }

    /// Lower-cased text the free-text search matches against.
    pub fn searchable_text(&self) -> String {
        let year = self.year.map(|year| year.to_string());
        let buyer = self.buyer_name();
        let parts = [
            self.make.as_deref(),
            self.model.as_deref(),
            year.as_deref(),
            self.vehicle_id.as_deref(),
            self.license_plate.as_deref(),
            buyer.as_deref(),
            self.seller_name.as_deref(),
        ];

        parts
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Sale price when recorded, else purchase price, else zero.
    ///
    /// Blank strings count as unrecorded. Unparsable values read as zero.
    pub fn effective_price(&self) -> f64 {
        let raw = non_blank(&self.sale_price).or_else(|| non_blank(&self.purchase_price));
        match raw {
            Some(raw) => parse::price_or_zero(raw),
            None => 0.0,
        }
    }

    /// Sale price, if one is recorded.
    pub fn sale_amount(&self) -> Option<f64> {
        non_blank(&self.sale_price).map(parse::price_or_zero)
    }

    /// Title explicitly recorded as missing.
    pub fn title_missing(&self) -> bool {
        self.title_present == Some(false)
    }

    /// No title confirmed on hand: missing or never recorded.
    pub fn title_unconfirmed(&self) -> bool {
        self.title_present != Some(true)
    }

    pub fn has_images(&self) -> bool {
        !self.car_images.is_empty()
    }

    pub fn has_documents(&self) -> bool {
        !self.documents.is_empty()
    }
}

pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|raw| !raw.trim().is_empty())
}

/// Error type for vehicle store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleStoreError {
    /// Lock poisoned during the named operation.
    LockPoisoned(&'static str),
    /// No vehicle with this id.
    NotFound { id: String },
    /// The backing store rejected or failed the request.
    Backend(String),
}

impl fmt::Display for VehicleStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleStoreError::LockPoisoned(operation) => {
                write!(f, "vehicle store lock poisoned during {}", operation)
            }
            VehicleStoreError::NotFound { id } => write!(f, "vehicle not found: {}", id),
            VehicleStoreError::Backend(msg) => write!(f, "vehicle store backend error: {}", msg),
        }
    }
}

impl std::error::Error for VehicleStoreError {}

pub use in_memory::InMemoryVehicleStore;
pub use store::{load_all, VehiclePage, VehicleStore};
