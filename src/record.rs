//! Ride records and the immutable dataset they live in.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Rider classification of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiderType {
    Casual,
    Member,
}

impl RiderType {
    /// Both variants in display order.
    pub const ALL: [RiderType; 2] = [RiderType::Casual, RiderType::Member];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiderType::Casual => "casual",
            RiderType::Member => "member",
        }
    }
}

impl fmt::Display for RiderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiderType {
    type Err = String;

    /// Case-insensitive match against `casual` / `member`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "casual" => Ok(RiderType::Casual),
            "member" => Ok(RiderType::Member),
            other => Err(other.to_string()),
        }
    }
}

/// A single normalized trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RideRecord {
    pub rider_type: RiderType,
    pub day_of_week: String,
    pub hour_of_day: u8,
    /// Minutes.
    pub ride_length: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    pub end_lat: Option<f64>,
    pub end_lng: Option<f64>,
    pub station_name: Option<String>,
}

impl RideRecord {
    /// `(latitude, longitude)` when both are present.
    pub fn location(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Start and end points when all four route coordinates are present.
    pub fn route(&self) -> Option<((f64, f64), (f64, f64))> {
        Some((
            (self.start_lat?, self.start_lng?),
            (self.end_lat?, self.end_lng?),
        ))
    }
}

/// Ordered, immutable sequence of ride records.
///
/// Subsetting always produces a new `Dataset`; the source is never modified.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    records: Vec<RideRecord>,
}

impl Dataset {
    pub fn new(records: Vec<RideRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RideRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &RideRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct day labels in first-appearance order.
    pub fn day_labels(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.day_of_week.as_str()))
            .map(|r| r.day_of_week.clone())
            .collect()
    }

    pub(crate) fn subset<F>(&self, mut keep: F) -> Dataset
    where
        F: FnMut(&RideRecord) -> bool,
    {
        Dataset::new(self.records.iter().filter(|&r| keep(r)).cloned().collect())
    }
}
