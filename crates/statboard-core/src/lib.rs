pub mod aggregate;
pub mod classify;
pub mod config;
pub mod errors;
pub mod fingerprint;
pub mod model;
pub mod normalize;
pub mod reasons;
pub mod report;
pub mod section;
pub mod table;
pub mod validate;

pub use aggregate::{get_all_metrics, load_metrics, try_load_metrics, MetricsAggregator};
pub use config::Config;
pub use model::{MetricBucket, MetricsResult};
pub use table::Table;
