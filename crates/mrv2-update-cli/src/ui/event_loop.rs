//! Terminal stand-in for a GUI run loop.

use std::sync::Arc;
use std::time::Duration;

use mrv2_update_core::ports::EventLoop;

use super::CliProgress;

/// Keeps the spinner moving while a worker runs.
pub struct TerminalEventLoop {
    progress: Arc<CliProgress>,
}

impl TerminalEventLoop {
    pub const fn new(progress: Arc<CliProgress>) -> Self {
        Self { progress }
    }
}

impl EventLoop for TerminalEventLoop {
    fn pump(&mut self) {
        self.progress.tick();
    }

    fn wait(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }
}
