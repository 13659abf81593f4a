use crate::analyzers::geo::{heat_points, routes, start_locations};
use crate::analyzers::hourly::hourly_view;
use crate::analyzers::stations::{busiest_stations, top_stations};
use crate::analyzers::summary::{summarize, type_counts};
use crate::analyzers::types::DashboardViews;
use crate::filter::RiderSelection;
use crate::record::Dataset;
use tracing::debug;

/// Computes every dashboard view.
///
/// `filtered` is the dataset after day and rider filtering; `day_filtered`
/// is filtered by day only and feeds the busiest-stations view.
pub fn aggregate_views(
    filtered: &Dataset,
    day_filtered: &Dataset,
    selection: RiderSelection,
) -> DashboardViews {
    let views = DashboardViews {
        summary: summarize(filtered),
        type_counts: type_counts(filtered),
        hourly: hourly_view(filtered, selection),
        top_stations: top_stations(filtered, selection),
        busiest_stations: busiest_stations(day_filtered),
        start_locations: start_locations(filtered),
        heat_points: heat_points(filtered),
        routes: routes(filtered),
    };

    debug!(
        total_rides = views.summary.total_rides,
        top_stations = views.top_stations.len(),
        routes = views.routes.items.len(),
        heat_points = views.heat_points.items.len(),
        "Aggregated dashboard views"
    );

    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RiderType;
    use crate::record::tests::ride;

    #[test]
    fn test_aggregate_empty_dataset_degrades_gracefully() {
        let empty = Dataset::default();

        let views = aggregate_views(&empty, &empty, RiderSelection::All);

        assert_eq!(views.summary.total_rides, 0);
        assert_eq!(views.summary.average_ride_length, None);
        assert!(views.type_counts.is_empty());
        assert!(views.top_stations.is_empty());
        assert!(views.busiest_stations.stations.is_empty());
        assert!(views.routes.is_empty());
        assert!(views.heat_points.is_empty());
        assert!(views.start_locations.is_empty());
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let dataset = Dataset::new(vec![
            ride(RiderType::Casual, "1", 8, "A"),
            ride(RiderType::Member, "2", 9, "B"),
            ride(RiderType::Member, "2", 9, "A"),
        ]);

        let first = aggregate_views(&dataset, &dataset, RiderSelection::CompareBoth);
        let second = aggregate_views(&dataset, &dataset, RiderSelection::CompareBoth);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_empty_views_serialize_with_null_average() {
        let empty = Dataset::default();
        let views = aggregate_views(&empty, &empty, RiderSelection::All);

        let json = serde_json::to_value(&views).unwrap();

        assert!(json["summary"]["average_ride_length"].is_null());
        assert_eq!(json["summary"]["total_rides"], 0);
    }
}
