//! Rider-type and day-of-week filtering.

use crate::error::DashboardError;
use crate::record::{Dataset, RideRecord, RiderType};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The rider-type selector.
///
/// `All` and `CompareBoth` keep every rider type; they differ only in how the
/// hourly and station views split their series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiderSelection {
    #[default]
    All,
    Casual,
    Member,
    CompareBoth,
}

impl RiderSelection {
    /// The single rider type this selection narrows to, if any.
    pub fn rider_type(&self) -> Option<RiderType> {
        match self {
            RiderSelection::Casual => Some(RiderType::Casual),
            RiderSelection::Member => Some(RiderType::Member),
            RiderSelection::All | RiderSelection::CompareBoth => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiderSelection::All => "all",
            RiderSelection::Casual => "casual",
            RiderSelection::Member => "member",
            RiderSelection::CompareBoth => "compare-both",
        }
    }
}

impl fmt::Display for RiderSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiderSelection {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();

        match key.as_str() {
            "all" => Ok(RiderSelection::All),
            "casual" => Ok(RiderSelection::Casual),
            "member" => Ok(RiderSelection::Member),
            "compareboth" => Ok(RiderSelection::CompareBoth),
            _ => Err(DashboardError::UnknownRiderSelection(s.to_string())),
        }
    }
}

/// Current rider-type and day-of-week selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterCriteria {
    pub rider: RiderSelection,
    pub days: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new<I, S>(rider: RiderSelection, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rider,
            days: days.into_iter().map(Into::into).collect(),
        }
    }

    /// Every day label present in `dataset` selected.
    pub fn all_days(dataset: &Dataset, rider: RiderSelection) -> Self {
        Self::new(rider, dataset.day_labels())
    }

    /// Same day selection with no rider-type narrowing.
    pub fn days_only(&self) -> Self {
        Self {
            rider: RiderSelection::All,
            days: self.days.clone(),
        }
    }

    pub fn matches(&self, record: &RideRecord) -> bool {
        if !self.days.contains(&record.day_of_week) {
            return false;
        }

        match self.rider.rider_type() {
            Some(rider_type) => record.rider_type == rider_type,
            None => true,
        }
    }
}

/// Returns the records of `dataset` matching `criteria`, in source order.
///
/// An empty day set yields an empty dataset.
pub fn apply(dataset: &Dataset, criteria: &FilterCriteria) -> Dataset {
    let filtered = dataset.subset(|r| criteria.matches(r));
    debug!(
        rider = %criteria.rider,
        days = criteria.days.len(),
        input = dataset.len(),
        output = filtered.len(),
        "Applied filter"
    );
    filtered
}
