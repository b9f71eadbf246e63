//! `mrv2-update update`

use mrv2_update_core::{CheckTrigger, UpdateOutcome};
use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Run one full cycle. The prompt has already shown the closing notice.
pub fn execute(ctx: &CliContext, startup: bool) -> Result<(), CliError> {
    let trigger = if startup {
        CheckTrigger::Startup
    } else {
        CheckTrigger::Manual
    };
    outcome_to_result(ctx.orchestrator().run(trigger))
}

pub fn outcome_to_result(outcome: UpdateOutcome) -> Result<(), CliError> {
    debug!(?outcome, "update cycle finished");
    match outcome {
        UpdateOutcome::Skipped => {
            println!("Startup update checks are disabled.");
            Ok(())
        }
        UpdateOutcome::UpToDate
        | UpdateOutcome::Declined(_)
        | UpdateOutcome::Relaunched { .. } => Ok(()),
        UpdateOutcome::Undetermined(e) | UpdateOutcome::Failed(e) => Err(e.into()),
    }
}
