// Shared transport configuration for building reqwest::Client instances.
//
// The ads API authenticates every request with three headers: a bearer
// token, a developer token, and (for manager-account access) an optional
// login-customer-id. All of them are injected as default headers so the
// endpoint methods never touch credential material.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Credential material for the ads platform.
///
/// The bearer token is whatever the caller's auth provider produced;
/// token exchange itself is outside this crate.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub developer_token: SecretString,
    pub access_token: SecretString,
    pub login_customer_id: Option<String>,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with the given default headers.
    pub fn build_client_with_headers(
        &self,
        headers: HeaderMap,
    ) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("adverge/0.1.0")
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }

    /// Build a client carrying the ads API auth headers on every request.
    pub fn build_authenticated_client(
        &self,
        credentials: &Credentials,
    ) -> Result<reqwest::Client, Error> {
        let headers = auth_headers(credentials)?;
        self.build_client_with_headers(headers)
    }
}

/// Assemble the default header map from credentials.
///
/// Both secret-bearing headers are marked sensitive so they never show
/// up in debug output of the request.
fn auth_headers(credentials: &Credentials) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();

    let bearer = format!("Bearer {}", credentials.access_token.expose_secret());
    let mut auth_value = HeaderValue::from_str(&bearer).map_err(|e| Error::Authentication {
        message: format!("invalid access token header value: {e}"),
    })?;
    auth_value.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth_value);

    let mut dev_value = HeaderValue::from_str(credentials.developer_token.expose_secret())
        .map_err(|e| Error::Authentication {
            message: format!("invalid developer token header value: {e}"),
        })?;
    dev_value.set_sensitive(true);
    headers.insert("developer-token", dev_value);

    if let Some(ref login_id) = credentials.login_customer_id {
        let value = HeaderValue::from_str(login_id).map_err(|e| Error::Authentication {
            message: format!("invalid login-customer-id header value: {e}"),
        })?;
        headers.insert("login-customer-id", value);
    }

    Ok(headers)
}
