//! Update services built on the ports.

mod decision;
mod orchestrator;
mod unlock;

pub use decision::decide;
pub use orchestrator::{UpdateDeps, UpdateOrchestrator, UpdateOutcome, SESSION_FILE_NAME};
pub use unlock::wait_for_unlock;
