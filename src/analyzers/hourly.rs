use crate::analyzers::types::{HourlyMode, HourlyPoint, HourlySeries, HourlyView};
use crate::filter::RiderSelection;
use crate::record::{Dataset, RiderType};
use std::collections::BTreeMap;

pub const HOURS_PER_DAY: u8 = 24;

fn counts_by_hour(dataset: &Dataset, rider_type: Option<RiderType>) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for r in dataset.iter() {
        if rider_type.is_some_and(|t| t != r.rider_type) {
            continue;
        }
        *counts.entry(r.hour_of_day).or_insert(0) += 1;
    }
    counts
}

fn series(rider_type: Option<RiderType>, points: Vec<HourlyPoint>) -> HourlySeries {
    let has_gap = points.iter().any(|p| p.ride_count == 0);
    HourlySeries {
        rider_type,
        points,
        has_gap,
    }
}

/// Hours that have rides only, ascending.
fn sparse_series(dataset: &Dataset, rider_type: Option<RiderType>) -> HourlySeries {
    let points = counts_by_hour(dataset, rider_type)
        .into_iter()
        .map(|(hour, ride_count)| HourlyPoint { hour, ride_count })
        .collect();
    series(rider_type, points)
}

/// All 24 hours, zero-filled.
fn full_day_series(dataset: &Dataset, rider_type: RiderType) -> HourlySeries {
    let counts = counts_by_hour(dataset, Some(rider_type));
    let points = (0..HOURS_PER_DAY)
        .map(|hour| HourlyPoint {
            hour,
            ride_count: counts.get(&hour).copied().unwrap_or(0),
        })
        .collect();
    series(Some(rider_type), points)
}

/// Rides per hour of day, split according to `selection`.
pub fn hourly_view(dataset: &Dataset, selection: RiderSelection) -> HourlyView {
    match selection {
        RiderSelection::All => HourlyView {
            mode: HourlyMode::Combined,
            series: vec![sparse_series(dataset, None)],
        },
        RiderSelection::CompareBoth => HourlyView {
            mode: HourlyMode::CompareRiders,
            series: RiderType::ALL
                .iter()
                .map(|&t| full_day_series(dataset, t))
                .collect(),
        },
        RiderSelection::Casual | RiderSelection::Member => HourlyView {
            mode: HourlyMode::SingleRider,
            series: vec![sparse_series(dataset, selection.rider_type())],
        },
    }
}
