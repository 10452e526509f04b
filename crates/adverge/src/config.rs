//! GlobalOpts-aware configuration resolution on top of `adverge-config`.

use std::time::Duration;

use secrecy::SecretString;

use adverge_api::{Credentials, DEFAULT_ENDPOINT};
use adverge_core::PlatformConfig;
use adverge_config as cfg;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Fully resolved connection settings for one invocation.
pub struct Resolved {
    pub platform: PlatformConfig,
    pub customer_id: String,
}

/// The profile name in effect: flag, then config default, then "default".
pub fn active_profile_name(global: &GlobalOpts, config: &cfg::Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve the platform config from the config file, profile, and CLI
/// flag overrides. Falls back to flags/env alone when no profile exists.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let config = cfg::load_config_or_default();
    let profile_name = active_profile_name(global, &config);

    if let Some(profile) = config.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, &config.defaults, global);
    }

    // No profile found -- build from CLI flags / env vars alone.
    resolve_from_flags(global, &profile_name)
}

fn resolve_profile(
    profile: &cfg::Profile,
    profile_name: &str,
    defaults: &cfg::Defaults,
    global: &GlobalOpts,
) -> Result<Resolved, CliError> {
    let mut platform = cfg::profile_to_platform_config(profile, profile_name, defaults)?;

    if let Some(ref endpoint) = global.endpoint {
        platform.endpoint = parse_endpoint(endpoint)?;
    }
    if let Some(ref token) = global.developer_token {
        platform.credentials.developer_token = SecretString::from(token.clone());
    }
    if let Some(ref token) = global.access_token {
        platform.credentials.access_token = SecretString::from(token.clone());
    }
    if let Some(ref login) = global.login_customer {
        platform.credentials.login_customer_id = Some(login.clone());
    }
    platform.timeout = Duration::from_secs(global.timeout);

    let customer_id = global
        .customer
        .clone()
        .unwrap_or_else(|| profile.customer_id.clone());

    Ok(Resolved {
        platform,
        customer_id,
    })
}

fn resolve_from_flags(global: &GlobalOpts, profile_name: &str) -> Result<Resolved, CliError> {
    let customer_id = global.customer.clone().ok_or_else(|| CliError::NoConfig {
        path: cfg::config_path().display().to_string(),
    })?;

    let (Some(developer_token), Some(access_token)) =
        (global.developer_token.as_ref(), global.access_token.as_ref())
    else {
        return Err(CliError::NoCredentials {
            profile: profile_name.to_owned(),
        });
    };

    let endpoint = parse_endpoint(global.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT))?;

    Ok(Resolved {
        platform: PlatformConfig {
            endpoint,
            credentials: Credentials {
                developer_token: SecretString::from(developer_token.clone()),
                access_token: SecretString::from(access_token.clone()),
                login_customer_id: global.login_customer.clone(),
            },
            timeout: Duration::from_secs(global.timeout),
            cache_ttl: None,
        },
        customer_id,
    })
}

fn parse_endpoint(endpoint: &str) -> Result<url::Url, CliError> {
    endpoint.parse().map_err(|_| CliError::Validation {
        field: "endpoint".into(),
        reason: format!("invalid URL: {endpoint}"),
    })
}
