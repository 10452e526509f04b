//! Toggle command handler.

use serde::Serialize;
use tabled::Tabled;

use adverge_core::{Entity, ExecutionReport, RuleAgent, RuleRequest, model::RuleAction};

use crate::cli::{GlobalOpts, ToggleArgs};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct ToggleRecord {
    entity: String,
    kind: String,
    status: String,
}

#[derive(Tabled)]
struct ToggleRow {
    #[tabled(rename = "ENTITY")]
    entity: String,
    #[tabled(rename = "KIND")]
    kind: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

pub async fn handle(
    agent: &RuleAgent,
    customer_id: &str,
    args: ToggleArgs,
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

    let report = agent.execute(&request).await?;
    let ExecutionReport::Toggled { entities, status } = report else {
        return Err(CliError::ApiError {
            message: "unexpected report shape for toggle".into(),
            status: None,
        });
    };

    let records: Vec<ToggleRecord> = entities.iter().map(|e| record(e, status)).collect();
    output::Renderer::new(global).list(
        &records,
        |r| ToggleRow {
            entity: r.entity.clone(),
            kind: r.kind.clone(),
            status: r.status.clone(),
        },
        |r| r.entity.clone(),
    );
    Ok(())
}

fn record(entity: &Entity, status: adverge_core::EntityStatus) -> ToggleRecord {
    ToggleRecord {
        entity: entity.resource_name.clone(),
        kind: entity.kind.to_string(),
        status: status.to_string(),
    }
}
