// Entity query layer: specialized lookups over the search primitive.
//
// Every method issues one structured query (two for label resolution)
// and decodes the named block out of each row. Zero rows from the
// value-rule lookups mean "does not exist yet", not an error.

use tracing::debug;

use crate::client::AdsClient;
use crate::error::Error;
use crate::gaql;
use crate::rows::{EntityKind, EntityRow, GeoTargetRow, LabelRow, ValueRuleRow, ValueRuleSetRow};

impl AdsClient {
    /// Entities of `kind` matching the given numeric ids.
    pub async fn entities_by_id(
        &self,
        customer_id: &str,
        kind: EntityKind,
        ids: &[u64],
    ) -> Result<Vec<EntityRow>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = self
            .search(customer_id, &gaql::entities_by_id(kind, ids))
            .await?;
        rows.iter()
            .map(|row| row.entity(kind).cloned())
            .collect()
    }

    /// Resolve a label name to its row. First match wins on duplicates.
    pub async fn label_by_name(
        &self,
        customer_id: &str,
        name: &str,
    ) -> Result<Option<LabelRow>, Error> {
        let rows = self
            .search(customer_id, &gaql::label_by_name(name))
            .await?;
        Ok(rows.into_iter().find_map(|row| row.label))
    }

    /// Entities of `kind` carrying the label with the given name.
    ///
    /// Two-step: the label name resolves to its resource name first,
    /// failing with `LabelNotFound` if the label doesn't exist.
    pub async fn entities_by_label(
        &self,
        customer_id: &str,
        kind: EntityKind,
        label: &str,
    ) -> Result<Vec<EntityRow>, Error> {
        let label_row = self
            .label_by_name(customer_id, label)
            .await?
            .ok_or_else(|| Error::LabelNotFound {
                label: label.to_owned(),
            })?;
        debug!(label, resource = %label_row.resource_name, "resolved label");

        let rows = self
            .search(
                customer_id,
                &gaql::entities_by_label(kind, &label_row.resource_name),
            )
            .await?;
        rows.iter()
            .map(|row| row.entity(kind).cloned())
            .collect()
    }

    /// Resolve a city name to its geo target constant.
    ///
    /// Target type is fixed to City; the first match wins if the name
    /// is ambiguous.
    pub async fn geo_target_by_name(
        &self,
        customer_id: &str,
        city: &str,
    ) -> Result<GeoTargetRow, Error> {
        let rows = self
            .search(customer_id, &gaql::geo_target_by_name(city))
            .await?;
        rows.into_iter()
            .find_map(|row| row.geo_target_constant)
            .ok_or_else(|| Error::GeoTargetNotFound {
                name: city.to_owned(),
            })
    }

    /// Fetch a conversion value rule by resource name, if it exists.
    pub async fn value_rule(
        &self,
        customer_id: &str,
        resource_name: &str,
    ) -> Result<Option<ValueRuleRow>, Error> {
        let rows = self
            .search(customer_id, &gaql::value_rule(resource_name))
            .await?;
        Ok(rows.into_iter().find_map(|row| row.conversion_value_rule))
    }

    /// Conversion value rules scoped to the given geo target.
    pub async fn value_rules_for_geo(
        &self,
        customer_id: &str,
        geo_resource: &str,
    ) -> Result<Vec<ValueRuleRow>, Error> {
        let rows = self
            .search(customer_id, &gaql::value_rules_for_geo(geo_resource))
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.conversion_value_rule)
            .collect())
    }

    /// The value rule set attached to `campaign_resource`, if any.
    ///
    /// The platform allows one set per (campaign, dimension); this
    /// client assumes at most one per campaign and takes the first row.
    pub async fn value_rule_set_for_campaign(
        &self,
        customer_id: &str,
        campaign_resource: &str,
    ) -> Result<Option<ValueRuleSetRow>, Error> {
        let rows = self
            .search(
                customer_id,
                &gaql::value_rule_set_for_campaign(campaign_resource),
            )
            .await?;
        Ok(rows
            .into_iter()
            .find_map(|row| row.conversion_value_rule_set))
    }
}
