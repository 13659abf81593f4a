//! Map layers: station markers, heat points and route segments.
//!
//! Records missing a coordinate the layer needs are left out of that layer.

use crate::analyzers::types::{GeoPoint, HeatPoint, MapLayer, RouteSegment, StationMarker};
use crate::analyzers::utility::mean;
use crate::record::{Dataset, RideRecord};

impl<T> MapLayer<T> {
    /// Builds a layer centered on the mean of each item's anchor point.
    pub fn new(items: Vec<T>, anchor: impl Fn(&T) -> GeoPoint) -> Self {
        let (lats, lngs): (Vec<f64>, Vec<f64>) = items
            .iter()
            .map(|item| {
                let p = anchor(item);
                (p.lat, p.lng)
            })
            .unzip();

        let center = match (mean(&lats), mean(&lngs)) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        };

        MapLayer { center, items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn point((lat, lng): (f64, f64)) -> GeoPoint {
    GeoPoint { lat, lng }
}

/// One marker per record with a location, labelled with its station.
pub fn station_markers<'a, I>(records: I) -> MapLayer<StationMarker>
where
    I: IntoIterator<Item = &'a RideRecord>,
{
    let markers = records
        .into_iter()
        .filter_map(|r| {
            Some(StationMarker {
                position: point(r.location()?),
                station_name: r.station_name.clone(),
            })
        })
        .collect();

    MapLayer::new(markers, |m| m.position)
}

pub fn start_locations(dataset: &Dataset) -> MapLayer<StationMarker> {
    station_markers(dataset.iter())
}

/// One unit-weight point per record with a location.
pub fn heat_points(dataset: &Dataset) -> MapLayer<HeatPoint> {
    let points = dataset
        .iter()
        .filter_map(RideRecord::location)
        .map(|loc| HeatPoint {
            position: point(loc),
            weight: 1.0,
        })
        .collect();

    MapLayer::new(points, |p| p.position)
}

/// One start-to-end segment per record with all four route coordinates.
pub fn routes(dataset: &Dataset) -> MapLayer<RouteSegment> {
    let segments = dataset
        .iter()
        .filter_map(RideRecord::route)
        .map(|(start, end)| RouteSegment {
            start: point(start),
            end: point(end),
        })
        .collect();

    MapLayer::new(segments, |s| s.start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RiderType;
    use crate::record::tests::ride;

    #[test]
    fn test_routes_exclude_missing_endpoints() {
        let complete = ride(RiderType::Casual, "1", 8, "A");
        let mut no_end = ride(RiderType::Casual, "1", 8, "A");
        no_end.end_lat = None;
        let other = ride(RiderType::Member, "1", 9, "B");

        let layer = routes(&Dataset::new(vec![complete, no_end, other]));

        assert_eq!(layer.items.len(), 2);
        assert_eq!(
            layer.items[0],
            RouteSegment {
                start: GeoPoint { lat: 41.88, lng: -87.63 },
                end: GeoPoint { lat: 41.89, lng: -87.62 },
            }
        );
    }

    #[test]
    fn test_heat_points_drop_missing_coordinates() {
        let a = ride(RiderType::Casual, "1", 8, "A");
        let mut b = ride(RiderType::Casual, "1", 8, "A");
        b.longitude = None;

        let layer = heat_points(&Dataset::new(vec![a, b]));

        assert_eq!(layer.items.len(), 1);
        assert_eq!(layer.items[0].weight, 1.0);
    }

    #[test]
    fn test_layer_center_is_mean_of_points() {
        let mut a = ride(RiderType::Casual, "1", 8, "A");
        a.latitude = Some(40.0);
        a.longitude = Some(-80.0);
        let mut b = ride(RiderType::Casual, "1", 8, "B");
        b.latitude = Some(42.0);
        b.longitude = Some(-90.0);

        let layer = start_locations(&Dataset::new(vec![a, b]));

        assert_eq!(layer.center, Some(GeoPoint { lat: 41.0, lng: -85.0 }));
        assert_eq!(layer.items[1].station_name.as_deref(), Some("B"));
    }

    #[test]
    fn test_empty_layers_have_no_center() {
        let empty = Dataset::default();

        assert!(routes(&empty).is_empty());
        assert_eq!(routes(&empty).center, None);
        assert_eq!(heat_points(&empty).center, None);
        assert_eq!(start_locations(&empty).center, None);
    }
}
