// Typed search-result rows.
//
// The search endpoint returns one row per matched resource, with a block
// per selected table. Each block is decoded into a dedicated struct up
// front; a query that selected a block the row doesn't carry is a decode
// error (`Error::RowShape`), never a latent field-access failure.

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ── Entity kinds ────────────────────────────────────────────────────

/// The three mutable entity kinds this client addresses.
///
/// Ads are addressed through their ad-group-ad wrapper, which is where
/// the platform hangs their serving status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Ad,
    AdGroup,
    Campaign,
}

impl EntityKind {
    /// Query-language table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Ad => "ad_group_ad",
            Self::AdGroup => "ad_group",
            Self::Campaign => "campaign",
        }
    }

    /// Field holding the numeric entity id.
    pub fn id_field(self) -> &'static str {
        match self {
            Self::Ad => "ad_group_ad.ad.id",
            Self::AdGroup => "ad_group.id",
            Self::Campaign => "campaign.id",
        }
    }

    /// Field holding the entity's label membership list.
    pub fn label_field(self) -> &'static str {
        match self {
            Self::Ad => "ad_group_ad.labels",
            Self::AdGroup => "ad_group.labels",
            Self::Campaign => "campaign.labels",
        }
    }

    /// Mutate endpoint segment (`customers/{id}/{segment}:mutate`).
    pub fn mutate_segment(self) -> &'static str {
        match self {
            Self::Ad => "adGroupAds",
            Self::AdGroup => "adGroups",
            Self::Campaign => "campaigns",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ad => "ad",
            Self::AdGroup => "ad group",
            Self::Campaign => "campaign",
        };
        write!(f, "{name}")
    }
}

// ── Serving status ──────────────────────────────────────────────────

/// Serving status carried by mutable entities and value rules.
///
/// Only re-read from the platform, never inferred locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    Enabled,
    Paused,
    Removed,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Enabled => "ENABLED",
            Self::Paused => "PAUSED",
            Self::Removed => "REMOVED",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{name}")
    }
}

// ── Row blocks ──────────────────────────────────────────────────────

/// Common shape of the ad / ad-group / campaign blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRow {
    pub resource_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRow {
    pub resource_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoTargetRow {
    pub resource_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRuleAction {
    pub operation: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocationCondition {
    #[serde(default)]
    pub geo_target_constants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_match_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRuleRow {
    pub resource_name: String,
    pub action: ValueRuleAction,
    #[serde(default)]
    pub geo_location_condition: GeoLocationCondition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
}

impl ValueRuleRow {
    /// Whether this rule is scoped to exactly the given geo target.
    pub fn matches_geo(&self, geo_resource: &str) -> bool {
        self.geo_location_condition
            .geo_target_constants
            .iter()
            .any(|g| g == geo_resource)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRuleSetRow {
    pub resource_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(default)]
    pub conversion_value_rules: Vec<String>,
}

// ── The row itself ──────────────────────────────────────────────────

/// One search result row. Carries a block per table the query selected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<EntityRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_group: Option<EntityRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_group_ad: Option<EntityRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_target_constant: Option<GeoTargetRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_value_rule: Option<ValueRuleRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_value_rule_set: Option<ValueRuleSetRow>,
}

impl SearchRow {
    /// The entity block for `kind`, or a shape error naming the table.
    pub fn entity(&self, kind: EntityKind) -> Result<&EntityRow, Error> {
        let block = match kind {
            EntityKind::Ad => &self.ad_group_ad,
            EntityKind::AdGroup => &self.ad_group,
            EntityKind::Campaign => &self.campaign,
        };
        block.as_ref().ok_or_else(|| Error::RowShape {
            expected: kind.table(),
            context: format!("{self:?}"),
        })
    }
}
