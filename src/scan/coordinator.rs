use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, warn};
use tokio::task::JoinHandle;

use crate::api::ScanApi;
use crate::error::ScanError;

use super::subscriber::ScanSubscriber;
use super::types::{ScanOutcome, ScanRequest, ScanState};

/// Timing knobs for the polling loop
#[derive(Debug, Clone)]
pub struct ScanSchedule {
    /// Delay between consecutive status polls
    pub poll_interval: Duration,

    /// How long the completion message stays visible before it is cleared
    pub completion_display: Duration,
}

impl Default for ScanSchedule {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            completion_display: Duration::from_secs(3),
        }
    }
}

/// State shared between the coordinator and its polling task
struct Shared {
    /// Current lifecycle state of the scan
    state: ScanState,

    /// Terminal outcome of the most recent scan, if it reached one
    outcome: Option<ScanOutcome>,
}

// Lock acquisition never races a panic here; if the mutex is somehow
// poisoned, the state inside is still the last value written.
fn lock_shared(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    match shared.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Drives one scan from request to terminal outcome.
///
/// The coordinator owns the lifecycle of a single scan: it issues the start
/// request, polls the backend for status on a fixed cadence, forwards
/// progress to a [`ScanSubscriber`], and stops on completion or the first
/// failure. At most one scan is active per coordinator; a second `start`
/// while one is running is rejected rather than queued.
///
/// The polling loop lives in one owned tokio task whose handle the
/// coordinator keeps, so cancellation and teardown abort exactly that task
/// and no timer can leak. Polls are issued sequentially; a new poll is never
/// started while the previous one is in flight.
pub struct ScanCoordinator {
    /// Backend scan operations
    api: Arc<dyn ScanApi>,

    /// Receiver of progress and lifecycle events
    subscriber: Arc<dyn ScanSubscriber>,

    /// Poll cadence and completion display window
    schedule: ScanSchedule,

    /// State shared with the polling task
    shared: Arc<Mutex<Shared>>,

    /// Handle of the active polling task, if any
    poll_task: Option<JoinHandle<()>>,
}

impl ScanCoordinator {
    /// Create a coordinator with the given timing schedule
    pub fn new(
        api: Arc<dyn ScanApi>,
        subscriber: Arc<dyn ScanSubscriber>,
        schedule: ScanSchedule,
    ) -> Self {
        Self {
            api,
            subscriber,
            schedule,
            shared: Arc::new(Mutex::new(Shared {
                state: ScanState::Idle,
                outcome: None,
            })),
            poll_task: None,
        }
    }

    /// Create a coordinator with the default schedule (1s polls, 3s display)
    pub fn with_defaults(api: Arc<dyn ScanApi>, subscriber: Arc<dyn ScanSubscriber>) -> Self {
        Self::new(api, subscriber, ScanSchedule::default())
    }

    /// Current lifecycle state
    pub fn state(&self) -> ScanState {
        lock_shared(&self.shared).state
    }

    /// Terminal outcome of the most recent scan, if it reached one
    pub fn outcome(&self) -> Option<ScanOutcome> {
        lock_shared(&self.shared).outcome.clone()
    }

    /// Start a scan over the given lookback window.
    ///
    /// Rejects with [`ScanError::InvalidArgument`] if `days_back` is not an
    /// allowed lookback value or a scan is already active. On acceptance the
    /// start call is issued; if it fails the machine goes to `Failed`, the
    /// subscriber is notified, no poll is ever issued, and
    /// [`ScanError::StartFailed`] is returned. Otherwise polling begins.
    pub async fn start(&mut self, days_back: u32) -> Result<(), ScanError> {
        let request = ScanRequest::new(days_back)?;

        {
            let mut shared = lock_shared(&self.shared);
            if shared.state.is_active() {
                return Err(ScanError::InvalidArgument(
                    "a scan is already running".to_string(),
                ));
            }

            // Drop any task left over from the previous scan, e.g. a
            // completion message still waiting out its display window.
            if let Some(task) = self.poll_task.take() {
                task.abort();
            }

            shared.state = ScanState::Starting;
            shared.outcome = None;
        }

        debug!("Starting scan over the last {} days", request.days_back);
        self.subscriber.scan_progress(0, "Starting scan...");

        if let Err(err) = self.api.start_scan(request.days_back).await {
            warn!("Scan start call failed: {}", err);
            let reason = "Scan failed. Please try again.";
            {
                let mut shared = lock_shared(&self.shared);
                shared.state = ScanState::Failed;
                shared.outcome = Some(ScanOutcome::Failed(reason.to_string()));
            }
            self.subscriber.scan_failed(reason);
            return Err(ScanError::StartFailed(err.to_string()));
        }

        {
            let mut shared = lock_shared(&self.shared);
            shared.state = ScanState::Polling;
        }
        self.subscriber.scan_progress(0, "Scanning emails...");

        let api = Arc::clone(&self.api);
        let subscriber = Arc::clone(&self.subscriber);
        let shared = Arc::clone(&self.shared);
        let schedule = self.schedule.clone();
        self.poll_task = Some(tokio::spawn(poll_loop(api, subscriber, shared, schedule)));

        Ok(())
    }

    /// Abort the active scan, if any.
    ///
    /// Stops the polling task before any further poll fires and returns the
    /// machine to `Idle`. No completion notification is emitted; the result
    /// of an in-flight status call is discarded. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(task) = self.poll_task.take() {
            task.abort();
        }

        let mut shared = lock_shared(&self.shared);
        if shared.state != ScanState::Idle {
            debug!("Scan cancelled from state {:?}", shared.state);
            shared.state = ScanState::Idle;
            shared.outcome = None;
        }
    }

    /// Wait for the active scan to reach a terminal outcome.
    ///
    /// Returns [`ScanError::Cancelled`] if the scan was cancelled (or never
    /// produced an outcome).
    pub async fn wait(&mut self) -> Result<ScanOutcome, ScanError> {
        if let Some(task) = self.poll_task.take() {
            // The only join error here is an abort, which the outcome check
            // below reports as Cancelled.
            let _ = task.await;
        }

        match lock_shared(&self.shared).outcome.clone() {
            Some(outcome) => Ok(outcome),
            None => Err(ScanError::Cancelled),
        }
    }
}

impl Drop for ScanCoordinator {
    fn drop(&mut self) {
        // No timer outlives the coordinator.
        if let Some(task) = self.poll_task.take() {
            task.abort();
        }
    }
}

/// Body of the owned polling task.
///
/// Sleeps one interval, polls, forwards the response, and repeats until the
/// backend reports `running: false` or a poll fails. There is no retry and
/// no backoff; the first poll failure is terminal for the scan.
async fn poll_loop(
    api: Arc<dyn ScanApi>,
    subscriber: Arc<dyn ScanSubscriber>,
    shared: Arc<Mutex<Shared>>,
    schedule: ScanSchedule,
) {
    loop {
        tokio::time::sleep(schedule.poll_interval).await;

        match api.scan_status().await {
            Ok(status) => {
                let progress = status.progress.min(100);
                subscriber.scan_progress(progress, &status.message);

                if !status.running {
                    debug!("Scan finished: {}", status.message);
                    {
                        let mut shared = lock_shared(&shared);
                        shared.state = ScanState::Succeeded;
                        shared.outcome = Some(ScanOutcome::Succeeded);
                    }
                    subscriber.scan_completed();

                    // Keep the completion message visible for the display
                    // window, then clear it and return to Idle.
                    tokio::time::sleep(schedule.completion_display).await;
                    subscriber.message_cleared();

                    let mut shared = lock_shared(&shared);
                    if shared.state == ScanState::Succeeded {
                        shared.state = ScanState::Idle;
                    }
                    break;
                }
            }
            Err(err) => {
                warn!("Scan status poll failed: {}", err);
                let reason = "Error checking scan status";
                {
                    let mut shared = lock_shared(&shared);
                    shared.state = ScanState::Failed;
                    shared.outcome = Some(ScanOutcome::Failed(reason.to_string()));
                }
                subscriber.scan_failed(reason);
                break;
            }
        }
    }
}
