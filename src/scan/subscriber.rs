/// Port through which the coordinator reports scan lifecycle events.
///
/// The UI (or any other consumer) implements this to mirror scan state into
/// display state. Methods take `&self`; implementations that need mutation
/// use interior mutability. The coordinator never awaits the subscriber.
pub trait ScanSubscriber: Send + Sync {
    /// A status poll resolved; forward progress and phase message
    fn scan_progress(&self, progress: u8, message: &str);

    /// The backend reported the scan finished; dependent data (jobs, stats)
    /// should be refreshed
    fn scan_completed(&self);

    /// The scan failed with a display-ready reason
    fn scan_failed(&self, reason: &str);

    /// The transient completion message expired and should be removed
    fn message_cleared(&self);
}

/// Subscriber that drops every event, for callers that only need the outcome
#[derive(Debug, Default)]
pub struct NullSubscriber;

impl ScanSubscriber for NullSubscriber {
    fn scan_progress(&self, _progress: u8, _message: &str) {}

    fn scan_completed(&self) {}

    fn scan_failed(&self, _reason: &str) {}

    fn message_cleared(&self) {}
}
