// Entity mutation layer.
//
// Four idempotent-in-intent operations plus the status mutations, each
// a single mutate call. Updates are scoped with an update mask so only
// the named field is touched; rule-set membership is a full replacement
// list at this level, so callers must pass the complete desired list.

use serde_json::json;

use crate::client::AdsClient;
use crate::error::Error;
use crate::rows::{EntityKind, EntityStatus};

const CONVERSION_VALUE_RULES: &str = "conversionValueRules";
const CONVERSION_VALUE_RULE_SETS: &str = "conversionValueRuleSets";

impl AdsClient {
    /// Set the serving status of an entity via an update-mask mutation
    /// scoped to the `status` field only.
    pub async fn set_entity_status(
        &self,
        customer_id: &str,
        kind: EntityKind,
        resource_name: &str,
        status: EntityStatus,
    ) -> Result<String, Error> {
        let operations = json!([{
            "update": {
                "resourceName": resource_name,
                "status": status,
            },
            "updateMask": "status",
        }]);
        let resp = self
            .mutate(customer_id, kind.mutate_segment(), operations)
            .await?;
        Self::first_resource(resp, "set_entity_status")
    }

    /// Create a conversion value rule multiplying by `multiplier` when
    /// the user is located in the given geo target.
    pub async fn create_value_rule(
        &self,
        customer_id: &str,
        geo_resource: &str,
        multiplier: f64,
    ) -> Result<String, Error> {
        let operations = json!([{
            "create": {
                "action": {
                    "operation": "MULTIPLY",
                    "value": multiplier,
                },
                "geoLocationCondition": {
                    "geoTargetConstants": [geo_resource],
                    "geoMatchType": "LOCATION_OF_PRESENCE",
                },
            },
        }]);
        let resp = self
            .mutate(customer_id, CONVERSION_VALUE_RULES, operations)
            .await?;
        Self::first_resource(resp, "create_value_rule")
    }

    /// Update a rule's multiplier in place (mask: `action.value`).
    pub async fn update_value_rule(
        &self,
        customer_id: &str,
        resource_name: &str,
        multiplier: f64,
    ) -> Result<String, Error> {
        let operations = json!([{
            "update": {
                "resourceName": resource_name,
                "action": {
                    "operation": "MULTIPLY",
                    "value": multiplier,
                },
            },
            "updateMask": "action.value",
        }]);
        let resp = self
            .mutate(customer_id, CONVERSION_VALUE_RULES, operations)
            .await?;
        Self::first_resource(resp, "update_value_rule")
    }

    /// Pause or re-enable a rule without touching its value.
    pub async fn set_value_rule_status(
        &self,
        customer_id: &str,
        resource_name: &str,
        status: EntityStatus,
    ) -> Result<String, Error> {
        let operations = json!([{
            "update": {
                "resourceName": resource_name,
                "status": status,
            },
            "updateMask": "status",
        }]);
        let resp = self
            .mutate(customer_id, CONVERSION_VALUE_RULES, operations)
            .await?;
        Self::first_resource(resp, "set_value_rule_status")
    }

    /// Create a geo-dimensioned rule set attached to `campaign_resource`.
    pub async fn create_value_rule_set(
        &self,
        customer_id: &str,
        campaign_resource: &str,
        rule_resources: &[String],
    ) -> Result<String, Error> {
        let operations = json!([{
            "create": {
                "campaign": campaign_resource,
                "attachmentType": "CAMPAIGN",
                "conversionValueRules": rule_resources,
                "dimensions": ["GEO_LOCATION"],
            },
        }]);
        let resp = self
            .mutate(customer_id, CONVERSION_VALUE_RULE_SETS, operations)
            .await?;
        Self::first_resource(resp, "create_value_rule_set")
    }

    /// Replace a rule set's membership list (mask: `conversion_value_rules`).
    ///
    /// Not additive: `rule_resources` is the complete desired list.
    pub async fn update_value_rule_set(
        &self,
        customer_id: &str,
        resource_name: &str,
        rule_resources: &[String],
    ) -> Result<String, Error> {
        let operations = json!([{
            "update": {
                "resourceName": resource_name,
                "conversionValueRules": rule_resources,
            },
            "updateMask": "conversion_value_rules",
        }]);
        let resp = self
            .mutate(customer_id, CONVERSION_VALUE_RULE_SETS, operations)
            .await?;
        Self::first_resource(resp, "update_value_rule_set")
    }
}
