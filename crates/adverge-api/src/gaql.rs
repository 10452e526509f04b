// Query-string builders for the platform's structured read language.
//
// Kept in one place so every SELECT the client issues is visible at a
// glance and string escaping is applied uniformly.

use crate::rows::EntityKind;

/// Quote a literal for use inside a query string.
///
/// Single quotes are the only character with meaning inside a quoted
/// literal; backslash-escape them and the backslash itself.
pub(crate) fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Entities of `kind` whose numeric id is in `ids`.
pub(crate) fn entities_by_id(kind: EntityKind, ids: &[u64]) -> String {
    let id_list = ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "SELECT {table}.resource_name, {table}.status FROM {table} WHERE {id_field} IN ({id_list})",
        table = kind.table(),
        id_field = kind.id_field(),
    )
}

/// Entities of `kind` carrying the given label resource.
pub(crate) fn entities_by_label(kind: EntityKind, label_resource: &str) -> String {
    format!(
        "SELECT {table}.resource_name, {table}.status FROM {table} \
         WHERE {label_field} CONTAINS ANY ({label})",
        table = kind.table(),
        label_field = kind.label_field(),
        label = quote(label_resource),
    )
}

/// Label row by exact name.
pub(crate) fn label_by_name(name: &str) -> String {
    format!(
        "SELECT label.resource_name, label.name FROM label WHERE label.name = {}",
        quote(name)
    )
}

/// Geo target constant by name, fixed to the City target type.
pub(crate) fn geo_target_by_name(name: &str) -> String {
    format!(
        "SELECT geo_target_constant.resource_name, geo_target_constant.name, \
         geo_target_constant.country_code, geo_target_constant.target_type \
         FROM geo_target_constant \
         WHERE geo_target_constant.name = {} AND geo_target_constant.target_type = 'City'",
        quote(name)
    )
}

const VALUE_RULE_FIELDS: &str = "conversion_value_rule.resource_name, \
     conversion_value_rule.action.operation, conversion_value_rule.action.value, \
     conversion_value_rule.geo_location_condition.geo_target_constants, \
     conversion_value_rule.geo_location_condition.geo_match_type, \
     conversion_value_rule.status";

/// A conversion value rule by resource name.
pub(crate) fn value_rule(resource_name: &str) -> String {
    format!(
        "SELECT {VALUE_RULE_FIELDS} FROM conversion_value_rule \
         WHERE conversion_value_rule.resource_name = {}",
        quote(resource_name)
    )
}

/// Conversion value rules scoped to the given geo target.
pub(crate) fn value_rules_for_geo(geo_resource: &str) -> String {
    format!(
        "SELECT {VALUE_RULE_FIELDS} FROM conversion_value_rule \
         WHERE conversion_value_rule.geo_location_condition.geo_target_constants \
         CONTAINS ANY ({})",
        quote(geo_resource)
    )
}

/// The value rule set attached to the given campaign.
pub(crate) fn value_rule_set_for_campaign(campaign_resource: &str) -> String {
    format!(
        "SELECT conversion_value_rule_set.resource_name, \
         conversion_value_rule_set.campaign, \
         conversion_value_rule_set.conversion_value_rules \
         FROM conversion_value_rule_set \
         WHERE conversion_value_rule_set.campaign = {}",
        quote(campaign_resource)
    )
}
