// Connection configuration for one ads account.

use std::time::Duration;

use url::Url;

use adverge_api::{AdsClient, Credentials, ResponseCache, TransportConfig};

use crate::agent::RuleAgent;
use crate::error::CoreError;

/// Everything needed to talk to the platform for one account.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// API endpoint root (normally [`adverge_api::DEFAULT_ENDPOINT`]).
    pub endpoint: Url,
    pub credentials: Credentials,
    pub timeout: Duration,
    /// Read-cache TTL; `None` caches for the client's lifetime.
    pub cache_ttl: Option<Duration>,
}

impl PlatformConfig {
    /// Build an API client from this config.
    pub fn build_client(&self) -> Result<AdsClient, CoreError> {
        let transport = TransportConfig {
            timeout: self.timeout,
        };
        let cache = ResponseCache::new(self.cache_ttl);
        Ok(AdsClient::new(
            self.endpoint.as_str(),
            &self.credentials,
            &transport,
            cache,
        )?)
    }

    /// Build a rule agent backed by a fresh client instance.
    pub fn build_agent(&self) -> Result<RuleAgent, CoreError> {
        Ok(RuleAgent::new(self.build_client()?))
    }
}
