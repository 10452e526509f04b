// adverge-core: rule dispatch and CVR reconciliation on top of adverge-api.

pub mod agent;
pub mod config;
pub mod error;
pub mod model;
pub mod reconcile;

// ── Primary re-exports ──────────────────────────────────────────────
pub use agent::{ExecutionReport, RuleAgent, RuleRequest};
pub use config::PlatformConfig;
pub use error::CoreError;
pub use reconcile::{BatchReport, CampaignOutcome, Reconciler, RuleChange};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Entity, EntityKind, EntityStatus, MAX_WEIGHT, MIN_WEIGHT, RuleAction, SelectorType,
    multiplier_for_weight,
};
