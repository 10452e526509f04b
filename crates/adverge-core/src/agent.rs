// Target agent facade.
//
// Single dispatch step over two terminal actions: TOGGLE flips the
// serving status of resolved entities, MANAGE_CONV_VALUE_RULE hands the
// resolved campaigns to the reconciliation engine. Parameter validation
// happens before the first network call.

use tracing::{debug, info};

use adverge_api::AdsClient;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{Entity, EntityStatus, RuleAction, SelectorType};
use crate::reconcile::{BatchReport, Reconciler};

// ── Request / report shapes ─────────────────────────────────────────

/// One inbound rule evaluation, as delivered by the rule storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleRequest {
    /// Account the targets live under.
    pub customer_id: String,
    /// Entity identifier: semicolon-separated numeric ids for ID-based
    /// selectors, a label name for label-based ones.
    pub identifier: String,
    pub selector: SelectorType,
    pub action: RuleAction,
    /// The rule's boolean evaluation result.
    pub evaluation: bool,
    /// Required for MANAGE_CONV_VALUE_RULE.
    pub conversion_weight: Option<f64>,
    /// Geo (city) name; required for MANAGE_CONV_VALUE_RULE.
    pub geo: Option<String>,
}

/// What an execution did, for reporting upstream.
#[derive(Debug)]
pub enum ExecutionReport {
    /// Entities whose status was set, and the status applied.
    Toggled {
        entities: Vec<Entity>,
        status: EntityStatus,
    },
    /// Per-campaign reconciliation outcomes.
    ValueRules(BatchReport),
}

// ── Facade ──────────────────────────────────────────────────────────

/// Dispatches rule evaluations against one API client instance.
pub struct RuleAgent {
    api: AdsClient,
}

impl RuleAgent {
    pub fn new(api: AdsClient) -> Self {
        Self { api }
    }

    /// The underlying client (for cache control between runs).
    pub fn api(&self) -> &AdsClient {
        &self.api
    }

    /// Execute a rule evaluation.
    pub async fn execute(&self, request: &RuleRequest) -> Result<ExecutionReport, CoreError> {
        match request.action {
            RuleAction::Toggle => self.toggle(request).await,
            RuleAction::ManageConvValueRule => self.manage_value_rules(request).await,
        }
    }

    // ── TOGGLE ───────────────────────────────────────────────────────

    async fn toggle(&self, request: &RuleRequest) -> Result<ExecutionReport, CoreError> {
        let entities = self.resolve_targets(request).await?;
        let status = status_for_evaluation(request.evaluation);
        info!(
            count = entities.len(),
            %status,
            selector = %request.selector,
            "toggling entities"
        );

        for entity in &entities {
            self.api
                .set_entity_status(
                    &request.customer_id,
                    entity.kind,
                    &entity.resource_name,
                    status,
                )
                .await?;
        }
        Ok(ExecutionReport::Toggled { entities, status })
    }

    // ── MANAGE_CONV_VALUE_RULE ───────────────────────────────────────

    async fn manage_value_rules(
        &self,
        request: &RuleRequest,
    ) -> Result<ExecutionReport, CoreError> {
        // Fail fast on missing parameters, before any network call.
        let weight = request
            .conversion_weight
            .ok_or_else(|| CoreError::MissingParameter {
                field: "conversionWeight".into(),
            })?;
        if !weight.is_finite() {
            return Err(CoreError::ValidationFailed {
                message: format!("conversionWeight must be a finite number, got {weight}"),
            });
        }
        let geo = request
            .geo
            .as_deref()
            .ok_or_else(|| CoreError::MissingParameter {
                field: "geo".into(),
            })?;

        if request.selector.kind() != adverge_api::EntityKind::Campaign {
            return Err(CoreError::ValidationFailed {
                message: format!(
                    "MANAGE_CONV_VALUE_RULE requires a campaign selector, got {}",
                    request.selector
                ),
            });
        }

        let campaigns: Vec<String> = self
            .resolve_targets(request)
            .await?
            .into_iter()
            .map(|e| e.resource_name)
            .collect();

        let reconciler = Reconciler::new(&self.api);
        let report = if request.evaluation {
            reconciler
                .apply(&request.customer_id, &campaigns, weight, geo)
                .await?
        } else {
            reconciler.disable(&request.customer_id, &campaigns).await?
        };
        Ok(ExecutionReport::ValueRules(report))
    }

    // ── validate ─────────────────────────────────────────────────────

    /// Read-only check: report every resolved entity whose live status
    /// disagrees with the status the evaluation implies. Empty when all
    /// match. Only ad and ad-group selectors are supported.
    pub async fn validate(&self, request: &RuleRequest) -> Result<Vec<String>, CoreError> {
        if request.selector.kind() == adverge_api::EntityKind::Campaign {
            return Err(CoreError::Unsupported {
                operation: "validate".into(),
                reason: format!("selector {} is not validated", request.selector),
            });
        }

        let entities = self.resolve_targets(request).await?;
        let expected = status_for_evaluation(request.evaluation);

        let mismatches = entities
            .iter()
            .filter(|e| e.status != Some(expected))
            .map(|e| {
                let actual = e
                    .status
                    .map_or_else(|| "UNKNOWN".to_owned(), |s| s.to_string());
                format!(
                    "Status for {} ({}) should be {} but is {}",
                    e.resource_name, e.kind, expected, actual
                )
            })
            .collect();
        Ok(mismatches)
    }

    // ── Target resolution ────────────────────────────────────────────

    /// Resolve the request identifier into concrete entities via the
    /// selector's lookup path.
    async fn resolve_targets(&self, request: &RuleRequest) -> Result<Vec<Entity>, CoreError> {
        let kind = request.selector.kind();
        let rows = if request.selector.by_label() {
            self.api
                .entities_by_label(&request.customer_id, kind, &request.identifier)
                .await?
        } else {
            let ids = parse_id_list(&request.identifier)?;
            debug!(?ids, %kind, "resolving entities by id");
            self.api
                .entities_by_id(&request.customer_id, kind, &ids)
                .await?
        };
        Ok(rows
            .into_iter()
            .map(|row| Entity::from_row(row, kind))
            .collect())
    }
}

fn status_for_evaluation(evaluation: bool) -> EntityStatus {
    if evaluation {
        EntityStatus::Enabled
    } else {
        EntityStatus::Paused
    }
}

/// Split a semicolon-separated identifier into numeric ids.
fn parse_id_list(identifier: &str) -> Result<Vec<u64>, CoreError> {
    identifier
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>().map_err(|_| CoreError::ValidationFailed {
                message: format!("invalid numeric id '{s}'"),
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn id_list_splits_on_semicolons() {
        assert_eq!(parse_id_list("1234;2345").unwrap(), vec![1234, 2345]);
        assert_eq!(parse_id_list(" 77 ; 88 ;").unwrap(), vec![77, 88]);
    }

    #[test]
    fn id_list_rejects_garbage() {
        let err = parse_id_list("1234;abc").unwrap_err();
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn evaluation_maps_to_status() {
        assert_eq!(status_for_evaluation(true), EntityStatus::Enabled);
        assert_eq!(status_for_evaluation(false), EntityStatus::Paused);
    }
}
