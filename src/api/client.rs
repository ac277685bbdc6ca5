use async_trait::async_trait;
use log::debug;
use serde::Serialize;

use crate::error::ApiError;
use crate::jobs::{Job, Stats};
use crate::scan::ScanStatus;

/// The two backend operations the scan coordinator needs
#[async_trait]
pub trait ScanApi: Send + Sync {
    /// Ask the backend to start scanning the mailbox over a lookback window.
    /// The backend rejects this while a scan is already running.
    async fn start_scan(&self, days_back: u32) -> Result<(), ApiError>;

    /// Fetch the current status of the running (or just-finished) scan
    async fn scan_status(&self) -> Result<ScanStatus, ApiError>;
}

/// The full backend contract consumed by the dashboard
#[async_trait]
pub trait TrackerApi: ScanApi {
    /// Fetch all tracked job applications
    async fn fetch_jobs(&self) -> Result<Vec<Job>, ApiError>;

    /// Fetch aggregate counts
    async fn fetch_stats(&self) -> Result<Stats, ApiError>;

    /// Persist a note on one application
    async fn save_note(&self, id: i64, notes: &str) -> Result<(), ApiError>;
}

#[derive(Serialize)]
struct StartScanBody {
    days_back: u32,
}

#[derive(Serialize)]
struct NoteBody<'a> {
    id: i64,
    notes: &'a str,
}

/// HTTP binding of the backend contract
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base URL of the backend, without a trailing slash
    base_url: String,

    /// Shared reqwest client
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent("job-tracker")
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { base_url, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Pass successful responses through, turn everything else into a status
/// error carrying the response body
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if resp.status().is_success() {
        return Ok(resp);
    }

    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::status(status, body))
}

#[async_trait]
impl ScanApi for ApiClient {
    async fn start_scan(&self, days_back: u32) -> Result<(), ApiError> {
        debug!("POST /api/scan days_back={}", days_back);
        let resp = self
            .client
            .post(self.url("/api/scan"))
            .json(&StartScanBody { days_back })
            .send()
            .await?;

        check(resp).await?;
        Ok(())
    }

    async fn scan_status(&self) -> Result<ScanStatus, ApiError> {
        let resp = self.client.get(self.url("/api/scan/status")).send().await?;
        let status = check(resp).await?.json::<ScanStatus>().await?;
        Ok(status)
    }
}

#[async_trait]
impl TrackerApi for ApiClient {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let resp = self.client.get(self.url("/api/jobs")).send().await?;
        let jobs = check(resp).await?.json::<Vec<Job>>().await?;
        debug!("Fetched {} jobs", jobs.len());
        Ok(jobs)
    }

    async fn fetch_stats(&self) -> Result<Stats, ApiError> {
        let resp = self.client.get(self.url("/api/stats")).send().await?;
        let stats = check(resp).await?.json::<Stats>().await?;
        Ok(stats)
    }

    async fn save_note(&self, id: i64, notes: &str) -> Result<(), ApiError> {
        debug!("POST /api/note id={}", id);
        let resp = self
            .client
            .post(self.url("/api/note"))
            .json(&NoteBody { id, notes })
            .send()
            .await?;

        check(resp).await?;
        Ok(())
    }
}
