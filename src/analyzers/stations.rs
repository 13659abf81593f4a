use crate::analyzers::geo::station_markers;
use crate::analyzers::types::{BusiestStations, RiderCount, StationRanking};
use crate::analyzers::utility::value_counts;
use crate::filter::RiderSelection;
use crate::record::{Dataset, RiderType};
use std::collections::HashSet;

pub const TOP_STATIONS: usize = 10;
pub const BUSIEST_STATIONS: usize = 5;

/// The `limit` stations with the most rides; ties keep first-seen order.
/// Records without a station name are not counted.
fn rank_stations(dataset: &Dataset, limit: usize) -> Vec<StationRanking> {
    value_counts(dataset.iter().filter_map(|r| r.station_name.as_deref()))
        .into_iter()
        .take(limit)
        .map(|(name, ride_count)| StationRanking {
            station_name: name.to_string(),
            ride_count,
            by_rider: Vec::new(),
        })
        .collect()
}

fn rider_breakdown(dataset: &Dataset, station: &str) -> Vec<RiderCount> {
    RiderType::ALL
        .iter()
        .map(|&rider_type| RiderCount {
            rider_type,
            ride_count: dataset
                .iter()
                .filter(|r| r.rider_type == rider_type && r.station_name.as_deref() == Some(station))
                .count(),
        })
        .filter(|c| c.ride_count > 0)
        .collect()
}

/// Top 10 stations by ride count.
///
/// Any selection other than [`RiderSelection::All`] also splits each
/// station's count by rider type.
pub fn top_stations(dataset: &Dataset, selection: RiderSelection) -> Vec<StationRanking> {
    let ranked = rank_stations(dataset, TOP_STATIONS);
    if selection == RiderSelection::All {
        return ranked;
    }

    ranked
        .into_iter()
        .map(|mut station| {
            station.by_rider = rider_breakdown(dataset, &station.station_name);
            station
        })
        .collect()
}

/// Top 5 stations and a marker for every ride starting at one of them.
///
/// Expects a dataset filtered by day only, so the result does not depend on
/// the rider-type selection.
pub fn busiest_stations(dataset: &Dataset) -> BusiestStations {
    let stations = rank_stations(dataset, BUSIEST_STATIONS);

    let names: HashSet<&str> = stations.iter().map(|s| s.station_name.as_str()).collect();
    let markers = station_markers(
        dataset
            .iter()
            .filter(|r| r.station_name.as_deref().is_some_and(|n| names.contains(n))),
    );

    BusiestStations { stations, markers }
}
