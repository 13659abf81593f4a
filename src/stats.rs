//! Summary snapshot rows appended to the CSV history file.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::types::SummaryMetrics;
use crate::filter::FilterCriteria;

/// One row of the summary history CSV.
#[derive(Debug, Default, Serialize)]
pub struct SummaryRecord {
    pub timestamp: DateTime<Utc>,
    pub source: Option<String>,

    // selection
    pub rider: String,
    pub days: String,

    // metrics
    pub total_rides: usize,
    pub average_ride_length: Option<f64>,
    pub most_active_day: Option<String>,
}

impl SummaryRecord {
    pub fn from_summary(summary: &SummaryMetrics, criteria: &FilterCriteria) -> Self {
        SummaryRecord {
            timestamp: Utc::now(),
            source: None,
            rider: criteria.rider.to_string(),
            days: criteria
                .days
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(";"),
            total_rides: summary.total_rides,
            average_ride_length: summary.average_ride_length,
            most_active_day: summary.most_active_day.clone(),
        }
    }

    /// Set the data source the summary was computed from.
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }
}
