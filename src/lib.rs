pub mod api;
pub mod config;
pub mod error;
pub mod jobs;
pub mod scan;

// Re-export main types and functions for easier access
pub use scan::{ScanCoordinator, ScanOutcome, ScanSchedule, ScanState, ScanStatus};
pub use scan::{NullSubscriber, ProgressBarSubscriber, ScanSubscriber};

pub use api::{ApiClient, FakeApi, ScanApi, TrackerApi};
pub use config::TrackerConfig;
pub use error::{ApiError, ScanError};
pub use jobs::{DashboardMetrics, Job, JobQuery, JobStatus, Stats, filter_jobs};
