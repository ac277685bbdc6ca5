use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;

use crate::error::ApiError;
use crate::jobs::{Job, JobStatus, Stats};
use crate::scan::ScanStatus;

use super::client::{ScanApi, TrackerApi};

/// One scripted answer to a status poll
pub type PollScript = Result<ScanStatus, String>;

struct FakeState {
    jobs: Vec<Job>,
    running: bool,
    script: VecDeque<PollScript>,
    fail_start: bool,
    start_calls: usize,
    status_calls: usize,
}

/// In-memory fake of the backend contract.
///
/// Replaces the globally patched development mock with an explicit,
/// constructible implementation that tests and offline runs inject. Status
/// polls answer from a script; when the script runs out (or the scripted
/// status reports `running: false`) the scan completes and one new job is
/// appended, the way the development dataset behaved.
pub struct FakeApi {
    inner: Mutex<FakeState>,
}

impl FakeApi {
    /// Create a fake seeded with the development dataset and a short
    /// realistic status progression
    pub fn new() -> Self {
        let fake = Self::empty();
        {
            let mut state = fake.lock();
            state.jobs = seed_jobs();
            state.script = default_script();
        }
        fake
    }

    /// Create a fake with no jobs and an empty status script (the first
    /// poll completes the scan immediately)
    pub fn empty() -> Self {
        Self {
            inner: Mutex::new(FakeState {
                jobs: Vec::new(),
                running: false,
                script: VecDeque::new(),
                fail_start: false,
                start_calls: 0,
                status_calls: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Replace the status script; each poll consumes one entry in order
    pub fn set_script(&self, script: Vec<PollScript>) {
        self.lock().script = script.into();
    }

    /// Append a successful status response to the script
    pub fn push_status(&self, running: bool, progress: u8, message: &str) {
        self.lock().script.push_back(Ok(ScanStatus {
            running,
            progress,
            message: message.to_string(),
        }));
    }

    /// Append a failing status response to the script
    pub fn push_poll_error(&self, message: &str) {
        self.lock().script.push_back(Err(message.to_string()));
    }

    /// Make the next start calls fail
    pub fn fail_start(&self, fail: bool) {
        self.lock().fail_start = fail;
    }

    /// Number of start calls received
    pub fn start_calls(&self) -> usize {
        self.lock().start_calls
    }

    /// Number of status polls received
    pub fn status_calls(&self) -> usize {
        self.lock().status_calls
    }

    /// Snapshot of the job list
    pub fn jobs(&self) -> Vec<Job> {
        self.lock().jobs.clone()
    }
}

impl Default for FakeApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScanApi for FakeApi {
    async fn start_scan(&self, days_back: u32) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.start_calls += 1;

        if state.fail_start {
            return Err(ApiError::status(
                StatusCode::INTERNAL_SERVER_ERROR,
                "injected start failure",
            ));
        }

        if state.running {
            return Err(ApiError::status(
                StatusCode::BAD_REQUEST,
                r#"{"error": "Scan already running"}"#,
            ));
        }

        state.running = true;
        Ok(())
    }

    async fn scan_status(&self) -> Result<ScanStatus, ApiError> {
        let mut state = self.lock();
        state.status_calls += 1;

        match state.script.pop_front() {
            Some(Ok(status)) => {
                if !status.running {
                    finish_scan(&mut state);
                }
                Ok(status)
            }
            Some(Err(message)) => {
                state.running = false;
                Err(ApiError::status(StatusCode::INTERNAL_SERVER_ERROR, message))
            }
            None => {
                // Script exhausted: report completion
                finish_scan(&mut state);
                Ok(ScanStatus {
                    running: false,
                    progress: 100,
                    message: "Complete! Found 1 jobs, added 1 new".to_string(),
                })
            }
        }
    }
}

#[async_trait]
impl TrackerApi for FakeApi {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, ApiError> {
        Ok(self.lock().jobs.clone())
    }

    async fn fetch_stats(&self) -> Result<Stats, ApiError> {
        let state = self.lock();
        let mut stats = Stats {
            total: state.jobs.len() as u32,
            ..Stats::default()
        };
        for job in &state.jobs {
            *stats
                .status_counts
                .entry(job.status.as_str().to_string())
                .or_insert(0) += 1;
        }
        Ok(stats)
    }

    async fn save_note(&self, id: i64, notes: &str) -> Result<(), ApiError> {
        let mut state = self.lock();
        match state.jobs.iter_mut().find(|job| job.id == id) {
            Some(job) => {
                job.notes = notes.to_string();
                Ok(())
            }
            None => Err(ApiError::status(
                StatusCode::NOT_FOUND,
                format!(r#"{{"error": "No job with id {}"}}"#, id),
            )),
        }
    }
}

/// Mark the scan finished and append the job it "found"
fn finish_scan(state: &mut FakeState) {
    if !state.running {
        return;
    }
    state.running = false;

    let next_id = state.jobs.iter().map(|job| job.id).max().unwrap_or(0) + 1;
    state.jobs.insert(
        0,
        Job {
            id: next_id,
            company: "Synth Systems".to_string(),
            role: "QA Engineer".to_string(),
            status: JobStatus::Applied,
            date_applied: Utc::now().to_rfc3339(),
            email_subject: "New Application".to_string(),
            notes: String::new(),
        },
    );
}

/// The development dataset
fn seed_jobs() -> Vec<Job> {
    vec![
        Job {
            id: 1,
            company: "Acme Inc".to_string(),
            role: "Frontend Engineer".to_string(),
            status: JobStatus::Applied,
            date_applied: "2025-11-01".to_string(),
            email_subject: "Application - Frontend Engineer".to_string(),
            notes: "Referred by Alice".to_string(),
        },
        Job {
            id: 2,
            company: "Nimbus".to_string(),
            role: "Data Analyst".to_string(),
            status: JobStatus::Interview,
            date_applied: "2025-10-20".to_string(),
            email_subject: "Interview Invite".to_string(),
            notes: String::new(),
        },
        Job {
            id: 3,
            company: "Helix".to_string(),
            role: "ML Engineer".to_string(),
            status: JobStatus::Offer,
            date_applied: "2025-09-15".to_string(),
            email_subject: "Offer Letter".to_string(),
            notes: "Negotiation in progress".to_string(),
        },
    ]
}

/// Status progression resembling a real backend scan
fn default_script() -> VecDeque<PollScript> {
    [
        (true, 10, "Fetching emails from Gmail..."),
        (true, 30, "Fetching emails from Gmail..."),
        (true, 40, "Analyzing 12 emails with AI..."),
        (true, 65, "Analyzing email 6/12 with AI..."),
        (true, 90, "Saving to database..."),
        (false, 100, "Complete! Found 2 jobs, added 1 new"),
    ]
    .into_iter()
    .map(|(running, progress, message)| {
        Ok(ScanStatus {
            running,
            progress,
            message: message.to_string(),
        })
    })
    .collect()
}
