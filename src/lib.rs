pub mod analyzers;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod source;
pub mod stats;

pub use error::{DashboardError, Result};
pub use filter::{FilterCriteria, RiderSelection};
pub use pipeline::Pipeline;
pub use record::{Dataset, RideRecord, RiderType};
