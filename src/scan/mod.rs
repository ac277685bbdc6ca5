pub mod coordinator;
pub mod progress;
pub mod subscriber;
pub mod types;

// Re-export from submodules
pub use coordinator::{ScanCoordinator, ScanSchedule};
pub use progress::ProgressBarSubscriber;
pub use subscriber::{NullSubscriber, ScanSubscriber};
pub use types::{ALLOWED_LOOKBACK_DAYS, ScanOutcome, ScanRequest, ScanState, ScanStatus};
