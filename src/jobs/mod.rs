pub mod filter;
pub mod metrics;
pub mod types;

// Re-export from submodules
pub use filter::{JobQuery, filter_jobs};
pub use metrics::DashboardMetrics;
pub use types::{Job, JobStatus, Stats};
