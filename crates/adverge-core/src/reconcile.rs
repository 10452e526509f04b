// CVR reconciliation engine.
//
// Converges the platform's conversion-value-rule state toward a desired
// (campaign set, geo, multiplier) target with the minimal set of
// create/update calls. Campaigns are processed sequentially -- rule-set
// updates are read-modify-write over a shared remote list, so there is
// no parallel fan-out within a run.

use tracing::{info, warn};

use adverge_api::AdsClient;
use serde::Serialize;

use crate::error::CoreError;
use crate::model::{multiplier_for_weight, values_equal};

// ── Outcomes ────────────────────────────────────────────────────────

/// What one campaign's reconciliation actually changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "change")]
pub enum RuleChange {
    /// No set existed: one rule and one set referencing it were created.
    CreatedRuleSet { rule: String, rule_set: String },
    /// A set existed without a rule for this geo: a rule was created and
    /// appended to the preserved membership list.
    AddedRuleToSet { rule: String, rule_set: String },
    /// The geo's rule existed with a different value: updated in place.
    UpdatedRule {
        rule: String,
        previous: f64,
        value: f64,
    },
    /// Remote state already matched: zero mutations issued.
    Unchanged { rule: String },
    /// Disable path: every member rule of the set was paused.
    PausedRules { count: usize },
}

/// Per-campaign result. A failure here never aborts sibling campaigns.
#[derive(Debug)]
pub struct CampaignOutcome {
    pub campaign: String,
    pub result: Result<RuleChange, CoreError>,
}

/// Aggregated outcomes of one reconciliation batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<CampaignOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

// ── Engine ──────────────────────────────────────────────────────────

/// Reconciles desired conversion-value adjustments against remote state.
pub struct Reconciler<'a> {
    api: &'a AdsClient,
}

impl<'a> Reconciler<'a> {
    pub fn new(api: &'a AdsClient) -> Self {
        Self { api }
    }

    /// Converge every target campaign toward a geo-scoped multiplier of
    /// `1 + clamp(raw_weight, -0.5, 10.0)`.
    ///
    /// The geo name is resolved once; failure to resolve it is fatal to
    /// the whole batch since no campaign could proceed. Per-campaign
    /// failures are captured in the report instead of aborting siblings.
    pub async fn apply(
        &self,
        customer_id: &str,
        campaigns: &[String],
        raw_weight: f64,
        geo_name: &str,
    ) -> Result<BatchReport, CoreError> {
        let multiplier = multiplier_for_weight(raw_weight);
        let geo = self.api.geo_target_by_name(customer_id, geo_name).await?;
        info!(geo = %geo.resource_name, multiplier, "reconciling value rules");

        let mut report = BatchReport::default();
        for campaign in campaigns {
            let result = self
                .reconcile_campaign(customer_id, campaign, &geo.resource_name, multiplier)
                .await;
            match &result {
                Ok(change) => info!(campaign, ?change, "campaign reconciled"),
                Err(err) => warn!(campaign, %err, "campaign reconciliation failed"),
            }
            report.outcomes.push(CampaignOutcome {
                campaign: campaign.clone(),
                result,
            });
        }
        Ok(report)
    }

    /// Converge a single campaign. Partial existence is handled case by
    /// case; already-issued mutations are never rolled back on failure.
    async fn reconcile_campaign(
        &self,
        customer_id: &str,
        campaign: &str,
        geo_resource: &str,
        multiplier: f64,
    ) -> Result<RuleChange, CoreError> {
        let existing_set = self
            .api
            .value_rule_set_for_campaign(customer_id, campaign)
            .await?;

        let Some(set) = existing_set else {
            // Neither set nor rule exists: create both, rule first.
            let rule = self
                .api
                .create_value_rule(customer_id, geo_resource, multiplier)
                .await?;
            let rule_set = self
                .api
                .create_value_rule_set(customer_id, campaign, std::slice::from_ref(&rule))
                .await?;
            return Ok(RuleChange::CreatedRuleSet { rule, rule_set });
        };

        // The set exists: look for the member scoped to our geo.
        for member in &set.conversion_value_rules {
            // A member listed in the set whose rule row is gone is
            // skipped for matching but preserved in membership updates.
            let Some(rule) = self.api.value_rule(customer_id, member).await? else {
                warn!(member, "rule listed in set but not found");
                continue;
            };
            if !rule.matches_geo(geo_resource) {
                continue;
            }
            if values_equal(rule.action.value, multiplier) {
                return Ok(RuleChange::Unchanged {
                    rule: rule.resource_name,
                });
            }
            let updated = self
                .api
                .update_value_rule(customer_id, &rule.resource_name, multiplier)
                .await?;
            return Ok(RuleChange::UpdatedRule {
                rule: updated,
                previous: rule.action.value,
                value: multiplier,
            });
        }

        // Set exists but holds no rule for this geo: create one and
        // replace the membership list with existing members plus it.
        let rule = self
            .api
            .create_value_rule(customer_id, geo_resource, multiplier)
            .await?;
        let mut members = set.conversion_value_rules.clone();
        members.push(rule.clone());
        let rule_set = self
            .api
            .update_value_rule_set(customer_id, &set.resource_name, &members)
            .await?;
        Ok(RuleChange::AddedRuleToSet { rule, rule_set })
    }

    /// Coarse disable path: pause every member rule of each campaign's
    /// set. Not the per-geo algorithm -- rules are paused, not removed,
    /// so a later re-enable reconciliation finds them in place.
    pub async fn disable(
        &self,
        customer_id: &str,
        campaigns: &[String],
    ) -> Result<BatchReport, CoreError> {
        let mut report = BatchReport::default();
        for campaign in campaigns {
            let result = self.disable_campaign(customer_id, campaign).await;
            match &result {
                Ok(change) => info!(campaign, ?change, "campaign rules paused"),
                Err(err) => warn!(campaign, %err, "campaign disable failed"),
            }
            report.outcomes.push(CampaignOutcome {
                campaign: campaign.clone(),
                result,
            });
        }
        Ok(report)
    }

    async fn disable_campaign(
        &self,
        customer_id: &str,
        campaign: &str,
    ) -> Result<RuleChange, CoreError> {
        let Some(set) = self
            .api
            .value_rule_set_for_campaign(customer_id, campaign)
            .await?
        else {
            return Ok(RuleChange::PausedRules { count: 0 });
        };

        let mut count = 0;
        for member in &set.conversion_value_rules {
            let Some(rule) = self.api.value_rule(customer_id, member).await? else {
                continue;
            };
            if rule.status == Some(adverge_api::EntityStatus::Paused) {
                continue;
            }
            self.api
                .set_value_rule_status(
                    customer_id,
                    &rule.resource_name,
                    adverge_api::EntityStatus::Paused,
                )
                .await?;
            count += 1;
        }
        Ok(RuleChange::PausedRules { count })
    }
}
