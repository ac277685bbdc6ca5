use thiserror::Error;

/// Errors surfaced by the scan coordinator
#[derive(Debug, Error)]
pub enum ScanError {
    /// The lookback value is not allowed, or a scan is already active
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The start call was rejected or failed on the network
    #[error("could not start scan: {0}")]
    StartFailed(String),

    /// A status poll was rejected or failed on the network
    #[error("could not check scan status: {0}")]
    PollFailed(String),

    /// The scan was aborted by the user before it finished
    #[error("scan cancelled")]
    Cancelled,
}

/// Errors from the backend HTTP binding
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure (connect, timeout, body decode)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success response from the backend
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code of the response
        status: reqwest::StatusCode,

        /// Response body, verbatim
        body: String,
    },
}

impl ApiError {
    /// Build a status error from a response code and body
    pub fn status(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}
