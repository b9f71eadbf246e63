//! Host event loop port.
//!
//! The orchestrator never blocks the host's UI thread on I/O. While a worker
//! is busy it hands control back through this trait once per tick, the way a
//! GUI toolkit timer callback would re-arm itself.

use std::time::Duration;

/// Cooperative, single-threaded run loop owned by the host.
pub trait EventLoop {
    /// Dispatch pending UI events without blocking.
    fn pump(&mut self);

    /// Yield until the next tick, at most `interval`.
    fn wait(&mut self, interval: Duration);
}

/// Event loop for hosts without a UI: nothing to pump, sleeps between ticks.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockingEventLoop;

impl EventLoop for BlockingEventLoop {
    fn pump(&mut self) {}

    fn wait(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }
}
