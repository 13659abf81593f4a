use crate::analyzers::types::{SummaryMetrics, TypeCount};
use crate::analyzers::utility::{mean, pct, value_counts};
use crate::record::{Dataset, RiderType};

/// Total rides, mean ride length and the busiest day label.
///
/// An empty dataset reports zero rides and `None` for the other two metrics.
pub fn summarize(dataset: &Dataset) -> SummaryMetrics {
    let lengths: Vec<f64> = dataset.iter().filter_map(|r| r.ride_length).collect();

    let most_active_day = value_counts(dataset.iter().map(|r| r.day_of_week.as_str()))
        .into_iter()
        .next()
        .map(|(day, _)| day.to_string());

    SummaryMetrics {
        total_rides: dataset.len(),
        average_ride_length: mean(&lengths),
        most_active_day,
    }
}

/// Ride counts for the rider types present, casual first.
pub fn type_counts(dataset: &Dataset) -> Vec<TypeCount> {
    let total = dataset.len();

    RiderType::ALL
        .iter()
        .map(|&rider_type| {
            let ride_count = dataset.iter().filter(|r| r.rider_type == rider_type).count();
            TypeCount {
                rider_type,
                ride_count,
                share_pct: pct(ride_count, total),
            }
        })
        .filter(|c| c.ride_count > 0)
        .collect()
}
