//! Conversion-value-rule command handlers.

use serde::Serialize;
use tabled::Tabled;

use adverge_core::{
    BatchReport, ExecutionReport, RuleAgent, RuleChange, RuleRequest, model::RuleAction,
};

use crate::cli::{CvrArgs, CvrCommand, GlobalOpts, SelectorArg};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct CvrRecord {
    campaign: String,
    outcome: String,
    ok: bool,
}

#[derive(Tabled)]
struct CvrRow {
    #[tabled(rename = "CAMPAIGN")]
    campaign: String,
    #[tabled(rename = "OUTCOME")]
    outcome: String,
}

pub async fn handle(
    agent: &RuleAgent,
    customer_id: &str,
    args: CvrArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CvrCommand::Apply {
            identifier,
            selector,
            weight,
            geo,
        } => {
            let request = manage_request(customer_id, identifier, selector, true);
            let request = RuleRequest {
                conversion_weight: Some(weight),
                geo: Some(geo),
                ..request
            };
            run(agent, &request, global).await
        }

        CvrCommand::Disable {
            identifier,
            selector,
        } => {
            if !util::confirm(
                "Pause all conversion value rules for the selected campaigns?",
                global.yes,
            )? {
                return Err(CliError::Aborted {
                    action: "cvr disable".into(),
                });
            }
            let request = manage_request(customer_id, identifier, selector, false);
            run(agent, &request, global).await
        }
    }
}

fn manage_request(
    customer_id: &str,
    identifier: String,
    selector: SelectorArg,
    evaluation: bool,
) -> RuleRequest {
    RuleRequest {
        customer_id: customer_id.to_owned(),
        identifier,
        selector: util::selector(selector),
        action: RuleAction::ManageConvValueRule,
        evaluation,
        conversion_weight: None,
        geo: None,
    }
}

async fn run(
    agent: &RuleAgent,
    request: &RuleRequest,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let report = agent.execute(request).await?;
    let ExecutionReport::ValueRules(batch) = report else {
        return Err(CliError::ApiError {
            message: "unexpected report shape for value rules".into(),
            status: None,
        });
    };

    render_report(&batch, global);

    if batch.has_failures() {
        return Err(CliError::PartialFailure {
            failed: batch.failed(),
            total: batch.outcomes.len(),
        });
    }
    Ok(())
}

fn render_report(batch: &BatchReport, global: &GlobalOpts) {
    let records: Vec<CvrRecord> = batch
        .outcomes
        .iter()
        .map(|o| CvrRecord {
            campaign: o.campaign.clone(),
            outcome: match &o.result {
                Ok(change) => describe_change(change),
                Err(err) => format!("failed: {err}"),
            },
            ok: o.result.is_ok(),
        })
        .collect();

    output::Renderer::new(global).list(
        &records,
        |r| CvrRow {
            campaign: r.campaign.clone(),
            outcome: r.outcome.clone(),
        },
        |r| r.campaign.clone(),
    );
}

fn describe_change(change: &RuleChange) -> String {
    match change {
        RuleChange::CreatedRuleSet { rule, rule_set } => {
            format!("created rule {rule} in new set {rule_set}")
        }
        RuleChange::AddedRuleToSet { rule, rule_set } => {
            format!("added rule {rule} to set {rule_set}")
        }
        RuleChange::UpdatedRule {
            rule,
            previous,
            value,
        } => format!("updated rule {rule}: {previous} -> {value}"),
        RuleChange::Unchanged { rule } => format!("unchanged ({rule})"),
        RuleChange::PausedRules { count } => format!("paused {count} rules"),
    }
}
