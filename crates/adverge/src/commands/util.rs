//! Shared helpers for command handlers.

use adverge_core::model::SelectorType;

use crate::cli::SelectorArg;
use crate::error::CliError;

/// Map the clap selector flag onto the core selector type.
pub fn selector(arg: SelectorArg) -> SelectorType {
    match arg {
        SelectorArg::AdId => SelectorType::AdId,
        SelectorArg::AdLabel => SelectorType::AdLabel,
        SelectorArg::AdGroupId => SelectorType::AdGroupId,
        SelectorArg::AdGroupLabel => SelectorType::AdGroupLabel,
        SelectorArg::CampaignId => SelectorType::CampaignId,
        SelectorArg::CampaignLabel => SelectorType::CampaignLabel,
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
