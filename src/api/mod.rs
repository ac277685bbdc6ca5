pub mod client;
pub mod fake;

// Re-export from submodules
pub use client::{ApiClient, ScanApi, TrackerApi};
pub use fake::FakeApi;
