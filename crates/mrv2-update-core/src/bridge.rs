//! Completion bridge between background workers and the UI thread.
//!
//! A worker thread runs one slow operation (HTTP request, install command,
//! unlock retry loop) and publishes its output into a single-slot channel.
//! The UI thread polls the slot once per tick and never blocks on the work
//! itself. The slot belongs to the bridge instance, so separate update
//! cycles never share it.

use std::future::Future;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, trace};

use crate::error::BridgeError;
use crate::ports::EventLoop;

/// Result of polling a [`CompletionBridge`].
#[derive(Debug, PartialEq, Eq)]
pub enum Tick<T> {
    /// The worker is still running; re-arm the tick.
    Pending,
    /// The worker finished. Delivered exactly once.
    Ready(Result<T, BridgeError>),
}

/// Single-producer, single-consumer hand-off of one background result.
pub struct CompletionBridge<T> {
    label: &'static str,
    slot: Receiver<Result<T, BridgeError>>,
    worker: Option<JoinHandle<()>>,
    consumed: bool,
}

impl<T: Send + 'static> CompletionBridge<T> {
    /// Run `work` on a fresh worker thread.
    pub fn spawn<F>(label: &'static str, work: F) -> Result<Self, BridgeError>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self::spawn_fallible(label, move || Ok(work()))
    }

    /// Run an async operation on a fresh worker thread with its own
    /// current-thread tokio runtime.
    ///
    /// `make` is called on the worker, so the future itself need not be `Send`.
    pub fn spawn_async<F, Fut>(label: &'static str, make: F) -> Result<Self, BridgeError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T>,
    {
        Self::spawn_fallible(label, move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| BridgeError::WorkerLost(format!("tokio runtime: {e}")))?;
            Ok(runtime.block_on(make()))
        })
    }

    fn spawn_fallible<F>(label: &'static str, work: F) -> Result<Self, BridgeError>
    where
        F: FnOnce() -> Result<T, BridgeError> + Send + 'static,
    {
        // Capacity 1: the worker never waits on the consumer.
        let (publish, slot) = mpsc::sync_channel(1);
        let worker = thread::Builder::new()
            .name(format!("mrv2-update-{label}"))
            .spawn(move || {
                // A closed slot means the cycle was abandoned; nothing to do.
                let _ = publish.send(work());
            })
            .map_err(|e| BridgeError::WorkerLost(format!("{label}: {e}")))?;

        debug!(worker = label, "background worker started");
        Ok(Self {
            label,
            slot,
            worker: Some(worker),
            consumed: false,
        })
    }
}

impl<T> CompletionBridge<T> {
    /// Non-blocking check of the result slot.
    pub fn poll(&mut self) -> Tick<T> {
        if self.consumed {
            return Tick::Ready(Err(BridgeError::Consumed));
        }

        let outcome = match self.slot.try_recv() {
            Err(TryRecvError::Empty) => return Tick::Pending,
            Ok(result) => result,
            Err(TryRecvError::Disconnected) => Err(BridgeError::WorkerLost(format!(
                "{} worker terminated abnormally",
                self.label
            ))),
        };

        self.consumed = true;
        if let Some(worker) = self.worker.take() {
            // The worker has published or died, so this does not block on work.
            let _ = worker.join();
        }
        debug!(worker = self.label, ok = outcome.is_ok(), "background worker finished");
        Tick::Ready(outcome)
    }

    /// Drive `event_loop` until the worker publishes.
    ///
    /// Each tick polls the slot; while it is empty the host loop is pumped
    /// and the next tick is awaited. The result is returned on the calling
    /// thread.
    pub fn wait_on(
        &mut self,
        event_loop: &mut dyn EventLoop,
        interval: Duration,
    ) -> Result<T, BridgeError> {
        let mut ticks: u64 = 0;
        loop {
            match self.poll() {
                Tick::Ready(result) => return result,
                Tick::Pending => {
                    ticks += 1;
                    trace!(worker = self.label, ticks, "waiting for background worker");
                    event_loop.pump();
                    event_loop.wait(interval);
                }
            }
        }
    }
}
