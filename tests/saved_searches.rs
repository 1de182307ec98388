mod support;

use std::sync::Arc;

use support::{ids, yard};
use yard_search::{
    DashboardStats, FilterPatch, FilterSpecification, FilterState, InMemorySavedSearchStore,
    PaperworkFilter, SavedSearchRegistry, StatusFilter, VehicleStatus,
};

#[test]
fn save_apply_round_trip_through_filter_state() {
    let mut state = FilterState::new(Arc::new(yard()));
    let mut registry = SavedSearchRegistry::open(InMemorySavedSearchStore::new());

    state.set_filters(
        FilterPatch::new()
            .status(StatusFilter::Only(VehicleStatus::Yard))
            .paperwork(PaperworkFilter::NoTitle),
    );
    assert!(state.has_active_filters());
    let saved = registry.save("Yard, needs title", state.filters()).unwrap();
    let saved_view = state.filtered();

    state.set_filters(FilterPatch::new().search_term("toyota").has_images(Some(false)));
    assert_ne!(state.filtered(), saved_view);

    state.replace(registry.apply(&saved.id).unwrap());
    assert_eq!(state.filters(), &saved.filters);
    assert_eq!(ids(&state.filtered()), vec!["civic"]);
}

#[test]
fn saved_snapshot_ignores_later_live_edits() {
    let mut state = FilterState::new(Arc::new(yard()));
    let mut registry = SavedSearchRegistry::open(InMemorySavedSearchStore::new());

    state.set_filters(FilterPatch::new().search_term("honda"));
    let saved = registry.save("Hondas", state.filters()).unwrap();
    let expected = state.filters().clone();

    state.set_filters(FilterPatch::new().search_term("ford"));
    state.clear();

    assert_eq!(registry.apply(&saved.id).unwrap(), expected);
}

#[test]
fn remove_missing_id_leaves_list_alone() {
    let mut registry = SavedSearchRegistry::open(InMemorySavedSearchStore::new());
    registry.save("one", &FilterSpecification::default()).unwrap();
    let before = registry.list().to_vec();

    assert!(registry.remove("0").is_ok());
    assert_eq!(registry.list(), before.as_slice());
}

#[test]
fn stats_agree_on_full_and_filtered_views() {
    let vehicles = yard();
    let mut state = FilterState::new(Arc::new(vehicles.clone()));
    state.set_filters(FilterPatch::new().status(StatusFilter::Only(VehicleStatus::Sold)));

    let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let all = DashboardStats::compute_for_day(&vehicles, today);
    let sold = DashboardStats::compute_for_day(&state.filtered(), today);

    assert_eq!(all.total_count, 6);
    assert_eq!(all.total_revenue, 1500.0);
    assert_eq!(all.pending_paperwork, 1);
    assert_eq!(all.by_status.yard, 2);

    // accord held 14 days, camry 7: mean 10.5 rounds to 11
    assert_eq!(all.average_days_to_sell, 11);
    assert_eq!(sold.average_days_to_sell, 11);
    assert_eq!(sold.total_count, 2);
    assert_eq!(sold.total_revenue, all.total_revenue);
    assert_eq!(sold.pending_paperwork, 0);
}
