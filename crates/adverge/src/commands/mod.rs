//! Command dispatch: bridges CLI args -> core agent -> output formatting.

pub mod config_cmd;
pub mod cvr;
pub mod toggle;
pub mod util;
pub mod validate;

use adverge_core::RuleAgent;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an agent-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    agent: &RuleAgent,
    customer_id: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Toggle(args) => toggle::handle(agent, customer_id, args, global).await,
        Command::Cvr(args) => cvr::handle(agent, customer_id, args, global).await,
        Command::Validate(args) => validate::handle(agent, customer_id, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
