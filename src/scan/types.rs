use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Lookback windows the backend accepts, in days
pub const ALLOWED_LOOKBACK_DAYS: [u32; 4] = [5, 30, 60, 90];

/// Lifecycle state of one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No scan in flight; initial state and the state re-entered after completion
    Idle,

    /// Start request accepted locally, start call in flight
    Starting,

    /// Start call succeeded, status polling underway
    Polling,

    /// The backend reported the scan finished
    Succeeded,

    /// The start call or a status poll failed
    Failed,
}

impl ScanState {
    /// Whether a scan is currently active (a new start must be rejected)
    pub fn is_active(&self) -> bool {
        matches!(self, ScanState::Starting | ScanState::Polling)
    }

    /// Whether the state is terminal for the current scan
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanState::Succeeded | ScanState::Failed)
    }
}

/// Request to start a scan over a lookback window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Number of days back from today to search
    pub days_back: u32,
}

impl ScanRequest {
    /// Create a request, rejecting lookback values the backend does not accept
    pub fn new(days_back: u32) -> Result<Self, ScanError> {
        if !ALLOWED_LOOKBACK_DAYS.contains(&days_back) {
            return Err(ScanError::InvalidArgument(format!(
                "lookback must be one of {:?} days, got {}",
                ALLOWED_LOOKBACK_DAYS, days_back
            )));
        }

        Ok(Self { days_back })
    }
}

/// Status snapshot reported by the backend while a scan runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStatus {
    /// Whether the backend scan job is still running
    #[serde(default)]
    pub running: bool,

    /// Completion percentage, 0-100
    #[serde(default)]
    pub progress: u8,

    /// Human-readable description of the current phase
    #[serde(default)]
    pub message: String,
}

/// Terminal outcome of one scan, computed once polling stops
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The backend finished the scan
    Succeeded,

    /// The scan failed before completion, with a display-ready reason
    Failed(String),
}
