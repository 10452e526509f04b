// Ads API HTTP client
//
// Wraps `reqwest::Client` with customer-scoped URL construction, the
// search/mutate request shapes, error-body surfacing, and read-call
// caching. The query and mutation layers (search.rs, mutate.rs) are
// implemented as inherent methods via separate files to keep this
// module focused on transport mechanics.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::cache::ResponseCache;
use crate::error::Error;
use crate::rows::SearchRow;
use crate::transport::{Credentials, TransportConfig};

/// Default REST endpoint of the ads platform.
pub const DEFAULT_ENDPOINT: &str = "https://googleads.googleapis.com/v17/";

// ── Wire shapes ─────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_token: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchRow>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateResult {
    pub resource_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateResponse {
    #[serde(default)]
    pub results: Vec<MutateResult>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ──────────────────────────────────────────────────────────

/// Async client for the ads platform's REST surface.
///
/// One instance per reconciliation run: the read cache is scoped to the
/// instance and carries no cross-run invalidation.
pub struct AdsClient {
    http: reqwest::Client,
    base_url: Url,
    cache: ResponseCache,
}

impl AdsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build an authenticated client against `base_url`.
    pub fn new(
        base_url: &str,
        credentials: &Credentials,
        transport: &TransportConfig,
        cache: ResponseCache,
    ) -> Result<Self, Error> {
        let http = transport.build_authenticated_client(credentials)?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            cache,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    ///
    /// Used by tests pointing at a mock server; the cache has no TTL.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            cache: ResponseCache::new(None),
        })
    }

    /// The read-call cache, for explicit invalidation between runs.
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Read path ────────────────────────────────────────────────────

    /// Run a structured query, following pagination, and return every
    /// result row. The aggregated rows are memoized per (url, query).
    pub async fn search(&self, customer_id: &str, query: &str) -> Result<Vec<SearchRow>, Error> {
        let url = self.url(&format!("customers/{customer_id}/googleAds:search"))?;
        let cache_key = ResponseCache::key(url.as_str(), query);

        if let Some(cached) = self.cache.get(&cache_key) {
            debug!("search cache hit for {url}");
            return serde_json::from_value(cached).map_err(|e| Error::Deserialization {
                message: format!("corrupt cache entry: {e}"),
                body: String::new(),
            });
        }

        let mut rows = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            debug!("POST {url}");
            let body = SearchRequest {
                query,
                page_token: page_token.as_deref(),
            };
            let resp = self.http.post(url.clone()).json(&body).send().await?;
            let page: SearchResponse = self.handle_response(resp).await?;

            rows.extend(page.results);
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        if let Ok(value) = serde_json::to_value(&rows) {
            self.cache.insert(cache_key, value);
        }
        Ok(rows)
    }

    // ── Write path ───────────────────────────────────────────────────

    /// Issue a mutate call against `customers/{id}/{segment}:mutate`.
    ///
    /// Never cached. A non-2xx response is terminal for the caller.
    pub async fn mutate(
        &self,
        customer_id: &str,
        segment: &str,
        operations: Value,
    ) -> Result<MutateResponse, Error> {
        let url = self.url(&format!("customers/{customer_id}/{segment}:mutate"))?;
        debug!("POST {url}");

        let body = serde_json::json!({ "operations": operations });
        let resp = self.http.post(url).json(&body).send().await?;
        self.handle_response(resp).await
    }

    /// First mutated resource name out of a mutate response.
    pub(crate) fn first_resource(
        response: MutateResponse,
        operation: &'static str,
    ) -> Result<String, Error> {
        response
            .results
            .into_iter()
            .next()
            .map(|r| r.resource_name)
            .ok_or(Error::MissingResult { operation })
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if !(status.is_success() || status == reqwest::StatusCode::NO_CONTENT) {
            return Err(parse_error(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| {
            let preview = body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}

/// At most 200 bytes of the body, truncated on a char boundary so a
/// multibyte character at the cutoff can't panic the slice.
fn body_preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Ensure the base URL ends with a slash so relative joins work.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Surface a failed call with the raw body as diagnostic payload.
fn parse_error(status: u16, body: String) -> Error {
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|e| e.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| format!("HTTP {status}"));

    Error::Api {
        status,
        message,
        body,
    }
}
