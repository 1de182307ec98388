//! Filter specifications and the predicate engine that applies them.
//!
//! A [`FilterSpecification`] is a plain, serializable value: the UI edits it,
//! [`FilterState`] holds the live one, and saved searches store snapshots of
//! it. The default specification matches every vehicle.
//!
//! ## Example
//!
//! ```ignore
//! use yard_search::{filter, FilterPatch, FilterSpecification, StatusFilter, VehicleStatus};
//!
//! let mut spec = FilterSpecification::default();
//! FilterPatch::new()
//!     .search_term("civic")
//!     .status(StatusFilter::Only(VehicleStatus::Yard))
//!     .apply_to(&mut spec);
//!
//! let matching = filter::apply(&vehicles, &spec);
//! ```

mod engine;
pub mod state;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vehicle::VehicleStatus;

pub use engine::{apply, apply_refs, matches};

const ALL: &str = "all";
const NO_TITLE: &str = "no-title";

/// Status clause: any status, or exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(VehicleStatus),
}

impl From<StatusFilter> for String {
    fn from(value: StatusFilter) -> Self {
        match value {
            StatusFilter::All => ALL.to_string(),
            StatusFilter::Only(status) => status.as_str().to_string(),
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == ALL {
            return Ok(StatusFilter::All);
        }
        VehicleStatus::from_wire(&value)
            .map(StatusFilter::Only)
            .ok_or(UnknownStatus(value))
    }
}

/// A status filter value that is neither `all` nor a known vehicle status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown vehicle status filter: {:?}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

/// Paperwork clause.
///
/// `NoTitle` selects vehicles whose title is missing, whatever their
/// paperwork string says.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaperworkFilter {
    #[default]
    All,
    NoTitle,
    Status(String),
}

impl From<PaperworkFilter> for String {
    fn from(value: PaperworkFilter) -> Self {
        match value {
            PaperworkFilter::All => ALL.to_string(),
            PaperworkFilter::NoTitle => NO_TITLE.to_string(),
            PaperworkFilter::Status(status) => status,
        }
    }
}

impl From<String> for PaperworkFilter {
    fn from(value: String) -> Self {
        match value.as_str() {
            ALL => PaperworkFilter::All,
            NO_TITLE => PaperworkFilter::NoTitle,
            _ => PaperworkFilter::Status(value),
        }
    }
}

/// Inclusive price bounds as typed by the user. Blank means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceRange {
    pub min: String,
    pub max: String,
}

impl PriceRange {
    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.min.trim().is_empty() || !self.max.trim().is_empty()
    }
}

/// Inclusive `createdAt` bounds. The end date covers its whole day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl DateRange {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.start_date.trim().is_empty() || !self.end_date.trim().is_empty()
    }
}

/// Declarative description of which vehicles to show.
///
/// `has_images` / `has_documents` are tri-state: `None` places no constraint
/// and serializes as `null`, distinct from `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpecification {
    pub search_term: String,
    pub status: StatusFilter,
    pub paperwork: PaperworkFilter,
    pub price_range: PriceRange,
    pub date_range: DateRange,
    pub has_images: Option<bool>,
    pub has_documents: Option<bool>,
}

impl FilterSpecification {
    /// True when no clause constrains anything.
    pub fn is_default(&self) -> bool {
        self.active_clause_count() == 0
    }

    /// Number of clauses that would narrow the result.
    pub fn active_clause_count(&self) -> usize {
        [
            !self.search_term.trim().is_empty(),
            self.status != StatusFilter::All,
            self.paperwork != PaperworkFilter::All,
            self.price_range.is_active(),
            self.date_range.is_active(),
            self.has_images.is_some(),
            self.has_documents.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Partial update to a [`FilterSpecification`]. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub search_term: Option<String>,
    pub status: Option<StatusFilter>,
    pub paperwork: Option<PaperworkFilter>,
    pub price_range: Option<PriceRange>,
    pub date_range: Option<DateRange>,
    /// `Some(None)` clears the constraint.
    pub has_images: Option<Option<bool>>,
    /// `Some(None)` clears the constraint.
    pub has_documents: Option<Option<bool>>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paperwork(mut self, paperwork: PaperworkFilter) -> Self {
        self.paperwork = Some(paperwork);
        self
    }

    pub fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn has_images(mut self, wanted: Option<bool>) -> Self {
        self.has_images = Some(wanted);
        self
    }

    pub fn has_documents(mut self, wanted: Option<bool>) -> Self {
        self.has_documents = Some(wanted);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write every set field into `spec`.
    pub fn apply_to(self, spec: &mut FilterSpecification) {
        if let Some(term) = self.search_term {
            spec.search_term = term;
        }
        if let Some(status) = self.status {
            spec.status = status;
        }
        if let Some(paperwork) = self.paperwork {
            spec.paperwork = paperwork;
        }
        if let Some(range) = self.price_range {
            spec.price_range = range;
        }
        if let Some(range) = self.date_range {
            spec.date_range = range;
        }
        if let Some(wanted) = self.has_images {
            spec.has_images = wanted;
        }
        if let Some(wanted) = self.has_documents {
            spec.has_documents = wanted;
        }
    }
}

impl From<FilterSpecification> for FilterPatch {
    fn from(spec: FilterSpecification) -> Self {
        Self {
            search_term: Some(spec.search_term),
            status: Some(spec.status),
            paperwork: Some(spec.paperwork),
            price_range: Some(spec.price_range),
            date_range: Some(spec.date_range),
            has_images: Some(spec.has_images),
            has_documents: Some(spec.has_documents),
        }
    }
}

pub use state::{FilterState, Page, SharedFilterState, StateError};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_is_identity_and_counts_nothing() {
        let spec = FilterSpecification::default();
        assert!(spec.is_default());
        assert_eq!(spec.active_clause_count(), 0);
    }

    #[test]
    fn blank_search_term_is_inactive() {
        let spec = FilterSpecification {
            search_term: "   ".into(),
            ..Default::default()
        };
        assert!(spec.is_default());
    }

    #[test]
    fn counts_each_active_clause() {
        let spec = FilterSpecification {
            search_term: "civic".into(),
            status: StatusFilter::Only(VehicleStatus::Sold),
            paperwork: PaperworkFilter::NoTitle,
            price_range: PriceRange::new("", "500"),
            date_range: DateRange::new("2024-01-01", ""),
            has_images: Some(false),
            has_documents: Some(true),
        };
        assert_eq!(spec.active_clause_count(), 7);
    }

    #[test]
    fn wire_format_matches_ui_shape() {
        let spec = FilterSpecification {
            status: StatusFilter::Only(VehicleStatus::SaRecycling),
            paperwork: PaperworkFilter::NoTitle,
            has_documents: Some(false),
            ..Default::default()
        };

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            value,
            json!({
                "searchTerm": "",
                "status": "sa-recycling",
                "paperwork": "no-title",
                "priceRange": { "min": "", "max": "" },
                "dateRange": { "startDate": "", "endDate": "" },
                "hasImages": null,
                "hasDocuments": false
            })
        );
    }

    #[test]
    fn json_round_trip_keeps_null_versus_false() {
        let spec = FilterSpecification {
            paperwork: PaperworkFilter::Status("lien".into()),
            has_images: None,
            has_documents: Some(false),
            ..Default::default()
        };

        let text = serde_json::to_string(&spec).unwrap();
        let back: FilterSpecification = serde_json::from_str(&text).unwrap();
        assert_eq!(back, spec);
        assert_eq!(back.has_images, None);
        assert_eq!(back.has_documents, Some(false));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let spec: FilterSpecification =
            serde_json::from_str(r#"{ "searchTerm": "ford", "status": "yard" }"#).unwrap();
        assert_eq!(spec.search_term, "ford");
        assert_eq!(spec.status, StatusFilter::Only(VehicleStatus::Yard));
        assert_eq!(spec.paperwork, PaperworkFilter::All);
        assert_eq!(spec.has_images, None);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = serde_json::from_str::<FilterSpecification>(r#"{ "status": "crushed" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn patch_only_touches_set_fields() {
        let mut spec = FilterSpecification {
            search_term: "civic".into(),
            has_images: Some(true),
            ..Default::default()
        };

        FilterPatch::new()
            .status(StatusFilter::Only(VehicleStatus::Yard))
            .apply_to(&mut spec);
        assert_eq!(spec.search_term, "civic");
        assert_eq!(spec.has_images, Some(true));
        assert_eq!(spec.status, StatusFilter::Only(VehicleStatus::Yard));

        FilterPatch::new().has_images(None).apply_to(&mut spec);
        assert_eq!(spec.has_images, None);
    }

    #[test]
    fn full_patch_replaces_everything() {
        let target = FilterSpecification {
            search_term: "x".into(),
            price_range: PriceRange::new("1", "2"),
            ..Default::default()
        };
        let mut spec = FilterSpecification {
            has_documents: Some(true),
            ..Default::default()
        };
        FilterPatch::from(target.clone()).apply_to(&mut spec);
        assert_eq!(spec, target);
        assert!(FilterPatch::new().is_empty());
    }
}
