// adverge-api: Async Rust client for the ads platform REST API
// (search + mutate surfaces, scoped to what the rule engine needs).

pub mod cache;
pub mod client;
pub mod error;
mod gaql;
pub mod mutate;
pub mod rows;
pub mod search;
pub mod transport;

pub use cache::ResponseCache;
pub use client::{AdsClient, DEFAULT_ENDPOINT};
pub use error::Error;
pub use rows::{
    EntityKind, EntityRow, EntityStatus, GeoTargetRow, LabelRow, SearchRow, ValueRuleRow,
    ValueRuleSetRow,
};
pub use transport::{Credentials, TransportConfig};
