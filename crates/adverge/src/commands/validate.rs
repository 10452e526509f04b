//! Validate command handler: read-only status check.

use owo_colors::OwoColorize;

use adverge_core::{RuleAgent, RuleRequest, model::RuleAction};

use crate::cli::{GlobalOpts, ValidateArgs};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

pub async fn handle(
    agent: &RuleAgent,
    customer_id: &str,
    args: ValidateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let request = RuleRequest {
        customer_id: customer_id.to_owned(),
        identifier: args.identifier,
        selector: util::selector(args.selector),
        action: RuleAction::Toggle,
        evaluation: args.on,
        conversion_weight: None,
        geo: None,
    };

    let mismatches = agent.validate(&request).await?;
    if mismatches.is_empty() {
        output::Renderer::new(global).line("All targets match the expected status.");
        return Ok(());
    }

    let color = output::use_color(&global.color);
    for line in &mismatches {
        if color {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
    Err(CliError::StatusMismatch {
        count: mismatches.len(),
    })
}
