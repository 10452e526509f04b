// ── Core domain types ──
//
// A resolved target entity plus the selector and action vocabulary the
// facade dispatches on. Selector strings use the rule storage's
// SCREAMING_SNAKE_CASE spelling so inbound payloads parse directly.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use adverge_api::{EntityKind, EntityRow, EntityStatus};

/// A platform entity resolved from a selector, with the kind it was
/// resolved as. Status is absent for kinds that don't carry one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub resource_name: String,
    pub status: Option<EntityStatus>,
    #[serde(skip)]
    pub kind: EntityKind,
}

impl Entity {
    /// Build from a decoded search row block.
    pub fn from_row(row: EntityRow, kind: EntityKind) -> Self {
        Self {
            resource_name: row.resource_name,
            status: row.status,
            kind,
        }
    }
}

/// Which lookup path resolves an identifier into target entities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectorType {
    AdId,
    AdLabel,
    AdGroupId,
    AdGroupLabel,
    CampaignId,
    CampaignLabel,
}

impl SelectorType {
    /// The entity kind this selector resolves to.
    pub fn kind(self) -> EntityKind {
        match self {
            Self::AdId | Self::AdLabel => EntityKind::Ad,
            Self::AdGroupId | Self::AdGroupLabel => EntityKind::AdGroup,
            Self::CampaignId | Self::CampaignLabel => EntityKind::Campaign,
        }
    }

    /// Whether the identifier is a label name rather than numeric ids.
    pub fn by_label(self) -> bool {
        matches!(self, Self::AdLabel | Self::AdGroupLabel | Self::CampaignLabel)
    }
}

/// The two terminal actions a rule evaluation can trigger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleAction {
    Toggle,
    ManageConvValueRule,
}
