//! Aggregation views over a filtered ride dataset.
//!
//! Each view is a pure function of its input dataset: summary metrics, rider
//! type counts, hourly series, station rankings and map layers. Rendering is
//! left to whatever consumes the serialized [`types::DashboardViews`].

pub mod aggregate;
pub mod geo;
pub mod hourly;
pub mod stations;
pub mod summary;
pub mod types;
pub mod utility;
