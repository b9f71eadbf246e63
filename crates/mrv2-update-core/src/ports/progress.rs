//! Progress reporting port.
//!
//! The orchestrator reports download and install progress here. Hosts draw a
//! progress bar, update a widget, or ignore it (`NoopProgress`). Calls arrive
//! from worker threads, hence `Send + Sync`.

/// Receiver of progress updates during long-running update stages.
pub trait ProgressReporter: Send + Sync {
    /// Called when a stage starts.
    ///
    /// # Arguments
    /// * `message` - Description of the stage (e.g., "Downloading mrv2 v1.2.0")
    /// * `total` - Total bytes if known
    fn start(&self, message: &str, total: Option<u64>);

    /// Called after each received chunk.
    fn update(&self, current: u64, total: Option<u64>);

    /// Called to show a line of text without ending the stage.
    fn message(&self, msg: &str);

    /// Called when the stage completes successfully.
    fn finish(&self, message: &str);

    /// Called when the stage fails.
    fn finish_with_error(&self, message: &str);
}

/// A progress reporter that ignores all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn start(&self, _message: &str, _total: Option<u64>) {}
    fn update(&self, _current: u64, _total: Option<u64>) {}
    fn message(&self, _msg: &str) {}
    fn finish(&self, _message: &str) {}
    fn finish_with_error(&self, _message: &str) {}
}
