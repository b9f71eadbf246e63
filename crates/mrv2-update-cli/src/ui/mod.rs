//! Terminal implementations of the host-facing ports.

mod event_loop;
mod progress;
mod prompt;

pub use event_loop::TerminalEventLoop;
pub use progress::CliProgress;
pub use prompt::{CliPrompt, parse_confirmation};
