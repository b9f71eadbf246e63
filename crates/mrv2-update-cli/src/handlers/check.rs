//! `mrv2-update check`

use mrv2_update_core::{CheckTrigger, UpdateOffer};

use crate::bootstrap::CliContext;
use crate::error::CliError;

pub fn execute(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let offer = ctx.orchestrator().check(CheckTrigger::Manual)?;
    println!("{}", render(offer.as_ref(), &ctx.config.current_version, json)?);
    Ok(())
}

/// Text printed for the outcome of a manual check.
pub fn render(offer: Option<&UpdateOffer>, current: &str, json: bool) -> Result<String, CliError> {
    Ok(match (offer, json) {
        (Some(offer), true) => serde_json::to_string_pretty(offer)?,
        (Some(offer), false) => format!(
            "{offer}\n{}: {} ({})",
            offer.kind.label(),
            offer.release.asset_name,
            offer.release.download_url
        ),
        (None, true) => "null".to_string(),
        (None, false) => format!("mrv2 {current} is up to date."),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrv2_update_core::{OfferKind, ReleaseInfo, Version};

    fn offer(kind: OfferKind) -> UpdateOffer {
        UpdateOffer {
            kind,
            current: Version::new(1, 3, 0),
            latest: Version::new(1, 3, 0),
            release: ReleaseInfo {
                name: "v1.3.0".to_string(),
                tag_name: "v1.3.0".to_string(),
                published_at: None,
                download_url: "https://github.com/ggarra13/mrv2/releases/download/v1.3.0/mrv2.deb"
                    .to_string(),
                asset_name: "mrv2.deb".to_string(),
            },
        }
    }

    #[test]
    fn test_reinstall_is_labelled() {
        let text = render(Some(&offer(OfferKind::Reinstall)), "1.3.0", false).unwrap();
        assert!(text.starts_with("You are already running the latest release v1.3.0."));
        assert!(text.contains("Update anyway: mrv2.deb"));
    }

    #[test]
    fn test_json_output() {
        let text = render(Some(&offer(OfferKind::Upgrade)), "1.2.0", true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["release"]["asset_name"], "mrv2.deb");
        assert_eq!(render(None, "1.2.0", true).unwrap(), "null");
    }
}
