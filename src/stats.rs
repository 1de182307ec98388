//! Dashboard statistics over any vehicle collection, whole or filtered.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;

use crate::parse;
use crate::vehicle::{non_blank, Vehicle, VehicleStatus};

const MILLIS_PER_DAY: i64 = 86_400_000;

pub fn total_count(vehicles: &[Vehicle]) -> usize {
    vehicles.len()
}

/// Sum of recorded sale prices. Vehicles without one contribute nothing.
pub fn total_revenue(vehicles: &[Vehicle]) -> f64 {
    vehicles.iter().filter_map(Vehicle::sale_amount).sum()
}

/// Vehicles still in the yard without a title.
pub fn pending_paperwork_count(vehicles: &[Vehicle]) -> usize {
    vehicles
        .iter()
        .filter(|v| v.title_unconfirmed() && v.status == VehicleStatus::Yard)
        .count()
}

/// Vehicles whose `createdAt` falls on today's local calendar date.
pub fn added_today_count(vehicles: &[Vehicle]) -> usize {
    added_on(vehicles, Local::now().date_naive())
}

/// Vehicles whose `createdAt` falls on `day` in local time.
pub fn added_on(vehicles: &[Vehicle], day: NaiveDate) -> usize {
    vehicles
        .iter()
        .filter_map(|v| non_blank(&v.created_at))
        .map(parse::timestamp_or_epoch)
        .filter(|created| local_date(*created) == day)
        .count()
}

fn local_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

/// Mean whole days from purchase to sale over sold vehicles that have both
/// dates, rounded half up. Zero when no vehicle qualifies.
pub fn average_days_to_sell(vehicles: &[Vehicle]) -> i64 {
    let days: Vec<i64> = vehicles
        .iter()
        .filter(|v| v.status == VehicleStatus::Sold)
        .filter_map(|v| Some((non_blank(&v.purchase_date)?, non_blank(&v.sale_date)?)))
        .map(|(purchased, sold)| {
            let held = parse::timestamp_or_epoch(sold) - parse::timestamp_or_epoch(purchased);
            held.num_milliseconds().div_euclid(MILLIS_PER_DAY)
        })
        .collect();

    if days.is_empty() {
        return 0;
    }
    let mean = days.iter().sum::<i64>() as f64 / days.len() as f64;
    (mean + 0.5).floor() as i64
}

/// Vehicle count per lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub yard: usize,
    pub sold: usize,
    pub pick_your_part: usize,
    pub sa_recycling: usize,
}

impl StatusCounts {
    pub fn get(&self, status: VehicleStatus) -> usize {
        match status {
            VehicleStatus::Yard => self.yard,
            VehicleStatus::Sold => self.sold,
            VehicleStatus::PickYourPart => self.pick_your_part,
            VehicleStatus::SaRecycling => self.sa_recycling,
        }
    }
}

pub fn status_counts(vehicles: &[Vehicle]) -> StatusCounts {
    vehicles
        .iter()
        .fold(StatusCounts::default(), |mut counts, v| {
            match v.status {
                VehicleStatus::Yard => counts.yard += 1,
                VehicleStatus::Sold => counts.sold += 1,
                VehicleStatus::PickYourPart => counts.pick_your_part += 1,
                VehicleStatus::SaRecycling => counts.sa_recycling += 1,
            }
            counts
        })
}

/// Every dashboard figure for one collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_count: usize,
    pub total_revenue: f64,
    pub pending_paperwork: usize,
    pub added_today: usize,
    pub average_days_to_sell: i64,
    pub by_status: StatusCounts,
}

impl DashboardStats {
    pub fn compute(vehicles: &[Vehicle]) -> Self {
        Self::compute_for_day(vehicles, Local::now().date_naive())
    }

    /// As [`DashboardStats::compute`], with "today" fixed to `today`.
    pub fn compute_for_day(vehicles: &[Vehicle], today: NaiveDate) -> Self {
        Self {
            total_count: total_count(vehicles),
            total_revenue: total_revenue(vehicles),
            pending_paperwork: pending_paperwork_count(vehicles),
            added_today: added_on(vehicles, today),
            average_days_to_sell: average_days_to_sell(vehicles),
            by_status: status_counts(vehicles),
        }
    }
}
