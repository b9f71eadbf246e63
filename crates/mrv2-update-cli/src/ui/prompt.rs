//! Interactive prompt on the controlling terminal.

use std::io;

use console::Term;
use mrv2_update_core::ports::UpdatePrompt;
use mrv2_update_core::{Decision, Notice, PasswordReply, Secret, UpdateOffer};
use tracing::warn;

/// [`UpdatePrompt`] reading answers from the terminal.
///
/// Questions go to stderr so stdout stays clean for scripting.
pub struct CliPrompt {
    term: Term,
    /// `--yes`: accept offers without asking and never ask for a password.
    assume_yes: bool,
}

impl Default for CliPrompt {
    fn default() -> Self {
        Self {
            term: Term::stderr(),
            assume_yes: false,
        }
    }
}

impl CliPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assume_yes() -> Self {
        Self {
            assume_yes: true,
            ..Self::default()
        }
    }
}

/// `y`/`yes` accepts; anything else, including an empty line, ignores.
pub fn parse_confirmation(input: &str) -> Decision {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Decision::Accept,
        _ => Decision::Ignore,
    }
}

/// An empty line dismisses the request. A terminal that cannot be read
/// leaves nobody to answer.
pub fn password_reply(read: io::Result<String>) -> PasswordReply {
    match read {
        Ok(password) if !password.is_empty() => PasswordReply::Entered(Secret::new(password)),
        Ok(_) => PasswordReply::Dismissed,
        Err(e) => {
            warn!(error = %e, "could not read password");
            PasswordReply::Unavailable
        }
    }
}

impl UpdatePrompt for CliPrompt {
    fn offer(&self, offer: &UpdateOffer) -> Decision {
        if self.assume_yes {
            if let Err(e) = self.term.write_line(&format!("{offer} {}.", offer.kind.label())) {
                warn!(error = %e, "could not write to terminal");
            }
            return Decision::Accept;
        }
        let question = format!("{offer}\n{}? [y/N] ", offer.kind.label());
        if let Err(e) = self.term.write_str(&question) {
            warn!(error = %e, "could not write to terminal");
            return Decision::Ignore;
        }
        match self.term.read_line() {
            Ok(answer) => parse_confirmation(&answer),
            Err(e) => {
                warn!(error = %e, "could not read answer");
                Decision::Ignore
            }
        }
    }

    fn ask_password(&self, command: &str) -> PasswordReply {
        if self.assume_yes {
            warn!(%command, "--yes given; running installer without sudo");
            return PasswordReply::Unavailable;
        }
        let asked = self
            .term
            .write_line(&format!("Administrator rights are needed to run:\n  {command}"))
            .and_then(|()| self.term.write_str("Password: "));
        if let Err(e) = asked {
            warn!(error = %e, "could not write to terminal");
            return PasswordReply::Unavailable;
        }
        password_reply(self.term.read_secure_line())
    }

    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::UpToDate { .. } | Notice::Installed { .. } => println!("{notice}"),
            Notice::Undetermined { .. } | Notice::Failed { .. } => eprintln!("{notice}"),
        }
    }
}
