//! Data types produced by the aggregation views.
//!
//! Every type here is a plain serializable structure a chart or map widget
//! can consume directly.

use crate::filter::FilterCriteria;
use crate::record::RiderType;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Headline metrics for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total_rides: usize,
    /// Minutes; `None` when no selected ride has a usable length.
    pub average_ride_length: Option<f64>,
    pub most_active_day: Option<String>,
}

/// Ride count for one rider type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCount {
    pub rider_type: RiderType,
    pub ride_count: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HourlyMode {
    /// One series, no rider split.
    Combined,
    /// One full-day series per rider type.
    CompareRiders,
    /// One series for the selected rider type.
    SingleRider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlyPoint {
    pub hour: u8,
    pub ride_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySeries {
    /// `None` for the combined series.
    pub rider_type: Option<RiderType>,
    pub points: Vec<HourlyPoint>,
    /// Set when any point has zero rides.
    pub has_gap: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyView {
    pub mode: HourlyMode,
    pub series: Vec<HourlySeries>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiderCount {
    pub rider_type: RiderType,
    pub ride_count: usize,
}

/// A station and its ride count, optionally split by rider type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRanking {
    pub station_name: String,
    pub ride_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_rider: Vec<RiderCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMarker {
    pub position: GeoPoint,
    pub station_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatPoint {
    pub position: GeoPoint,
    pub weight: f64,
}

/// Directed segment from a trip's start point to its end point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSegment {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

/// Items for one map plus the point the map should be centered on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayer<T> {
    /// Mean of the layer's points; `None` for an empty layer.
    pub center: Option<GeoPoint>,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusiestStations {
    pub stations: Vec<StationRanking>,
    pub markers: MapLayer<StationMarker>,
}

/// Every view derived from one filtered dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    pub summary: SummaryMetrics,
    pub type_counts: Vec<TypeCount>,
    pub hourly: HourlyView,
    pub top_stations: Vec<StationRanking>,
    pub busiest_stations: BusiestStations,
    pub start_locations: MapLayer<StationMarker>,
    pub heat_points: MapLayer<HeatPoint>,
    pub routes: MapLayer<RouteSegment>,
}

/// Document handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub criteria: FilterCriteria,
    pub views: DashboardViews,
}
