pub mod entity;
pub mod multiplier;

pub use entity::{Entity, RuleAction, SelectorType};
pub use multiplier::{MAX_WEIGHT, MIN_WEIGHT, multiplier_for_weight, values_equal};

// Platform-level kinds and statuses are defined by the API crate and
// re-exported here so consumers only need one import path.
pub use adverge_api::{EntityKind, EntityStatus};
