//! The dashboard pipeline: one normalized dataset plus the current filter.
//!
//! Every call to [`Pipeline::filter`] or [`Pipeline::aggregate`] recomputes
//! from the dataset; nothing is cached between calls.

use crate::analyzers::aggregate::aggregate_views;
use crate::analyzers::types::{DashboardReport, DashboardViews};
use crate::error::Result;
use crate::filter::{self, FilterCriteria, RiderSelection};
use crate::normalize::{NormalizeOptions, NormalizeReport, load_path, normalize_reader};
use crate::record::Dataset;
use chrono::Utc;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Pipeline {
    dataset: Dataset,
    criteria: FilterCriteria,
}

impl Pipeline {
    /// Wraps `dataset` with the default selection: every day, all riders.
    pub fn new(dataset: Dataset) -> Self {
        let criteria = FilterCriteria::all_days(&dataset, RiderSelection::All);
        Self { dataset, criteria }
    }

    /// Loads and normalizes the ride data file at `path`.
    pub fn load(path: &Path, options: &NormalizeOptions) -> Result<(Self, NormalizeReport)> {
        let (dataset, report) = load_path(path, options)?;
        Ok((Self::new(dataset), report))
    }

    pub fn from_reader<R: Read>(
        reader: R,
        options: &NormalizeOptions,
    ) -> Result<(Self, NormalizeReport)> {
        let (dataset, report) = normalize_reader(reader, options)?;
        Ok((Self::new(dataset), report))
    }

    /// Replaces the current selection.
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Day labels offered by the day selector, in first-appearance order.
    pub fn day_options(&self) -> Vec<String> {
        self.dataset.day_labels()
    }

    pub fn filter(&self) -> Dataset {
        filter::apply(&self.dataset, &self.criteria)
    }

    pub fn aggregate(&self) -> DashboardViews {
        let filtered = self.filter();
        let day_filtered = filter::apply(&self.dataset, &self.criteria.days_only());
        aggregate_views(&filtered, &day_filtered, self.criteria.rider)
    }

    /// Aggregates and wraps the views with a timestamp and the selection.
    pub fn report(&self, source: &str) -> DashboardReport {
        DashboardReport {
            generated_at: Utc::now(),
            source: source.to_string(),
            criteria: self.criteria.clone(),
            views: self.aggregate(),
        }
    }
}
