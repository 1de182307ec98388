//! Predicate engine: a conjunction of independent clauses over one vehicle.

use chrono::{DateTime, Days, NaiveTime, TimeZone, Utc};

use super::{DateRange, FilterSpecification, PaperworkFilter, PriceRange, StatusFilter};
use crate::parse;
use crate::vehicle::Vehicle;

/// Vehicles matching `spec`, in input order.
pub fn apply(vehicles: &[Vehicle], spec: &FilterSpecification) -> Vec<Vehicle> {
    apply_refs(vehicles, spec).into_iter().cloned().collect()
}

/// Borrowed form of [`apply`].
pub fn apply_refs<'a>(vehicles: &'a [Vehicle], spec: &FilterSpecification) -> Vec<&'a Vehicle> {
    if spec.is_default() {
        return vehicles.iter().collect();
    }

    let compiled = Compiled::new(spec);
    vehicles
        .iter()
        .filter(|vehicle| compiled.matches(vehicle))
        .collect()
}

/// Whether a single vehicle satisfies every active clause of `spec`.
pub fn matches(vehicle: &Vehicle, spec: &FilterSpecification) -> bool {
    Compiled::new(spec).matches(vehicle)
}

/// A specification with its bounds parsed once per pass.
struct Compiled<'s> {
    search: Option<String>,
    status: &'s StatusFilter,
    paperwork: &'s PaperworkFilter,
    price: Option<(f64, f64)>,
    created: Option<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)>,
    has_images: Option<bool>,
    has_documents: Option<bool>,
}

impl<'s> Compiled<'s> {
    fn new(spec: &'s FilterSpecification) -> Self {
        let term = spec.search_term.trim();
        Self {
            search: (!term.is_empty()).then(|| term.to_lowercase()),
            status: &spec.status,
            paperwork: &spec.paperwork,
            price: price_bounds(&spec.price_range),
            created: date_bounds(&spec.date_range),
            has_images: spec.has_images,
            has_documents: spec.has_documents,
        }
    }

    fn matches(&self, vehicle: &Vehicle) -> bool {
        self.matches_search(vehicle)
            && self.matches_status(vehicle)
            && self.matches_paperwork(vehicle)
            && self.matches_price(vehicle)
            && self.matches_created(vehicle)
            && self.has_images.map_or(true, |wanted| vehicle.has_images() == wanted)
            && self
                .has_documents
                .map_or(true, |wanted| vehicle.has_documents() == wanted)
    }

    fn matches_search(&self, vehicle: &Vehicle) -> bool {
        match &self.search {
            Some(term) => vehicle.searchable_text().contains(term.as_str()),
            None => true,
        }
    }

    fn matches_status(&self, vehicle: &Vehicle) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => vehicle.status == *status,
        }
    }

    fn matches_paperwork(&self, vehicle: &Vehicle) -> bool {
        match self.paperwork {
            PaperworkFilter::All => true,
            PaperworkFilter::NoTitle => vehicle.title_missing(),
            PaperworkFilter::Status(wanted) => vehicle.paperwork.as_deref() == Some(wanted.as_str()),
        }
    }

    fn matches_price(&self, vehicle: &Vehicle) -> bool {
        match self.price {
            Some((min, max)) => {
                let price = vehicle.effective_price();
                price >= min && price <= max
            }
            None => true,
        }
    }

    fn matches_created(&self, vehicle: &Vehicle) -> bool {
        let Some((start, end)) = self.created else {
            return true;
        };

        let created = parse::timestamp_or_epoch(vehicle.created_at.as_deref().unwrap_or(""));
        start.map_or(true, |start| created >= start) && end.map_or(true, |end| created <= end)
    }
}

fn price_bounds(range: &PriceRange) -> Option<(f64, f64)> {
    if !range.is_active() {
        return None;
    }
    let min = bound(&range.min, "min price", parse::try_price).unwrap_or(0.0);
    let max = bound(&range.max, "max price", parse::try_price).unwrap_or(f64::INFINITY);
    Some((min, max))
}

fn date_bounds(range: &DateRange) -> Option<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
    if !range.is_active() {
        return None;
    }
    let start = bound(&range.start_date, "start date", parse::try_timestamp);
    let end = bound(&range.end_date, "end date", parse::try_timestamp).map(end_of_day);
    Some((start, end))
}

/// Parse one side of a range. Blank is unbounded; garbage is unbounded too,
/// but logged.
fn bound<T>(raw: &str, label: &str, read: impl Fn(&str) -> Option<T>) -> Option<T> {
    if raw.trim().is_empty() {
        return None;
    }
    let parsed = read(raw);
    if parsed.is_none() {
        tracing::warn!(bound = label, raw, "ignoring unparsable filter bound");
    }
    parsed
}

/// 23:59:59 of the same calendar day.
fn end_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    let day = at.date_naive();
    day.checked_add_days(Days::new(1))
        .map(|next| {
            Utc.from_utc_datetime(&next.and_time(NaiveTime::MIN)) - chrono::Duration::seconds(1)
        })
        .unwrap_or(at)
}
