use thiserror::Error;

/// Top-level error type for the `adverge-api` crate.
///
/// Covers every failure mode across the transport, query, and mutation
/// surfaces. `adverge-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credential material could not be turned into request headers.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Platform API ────────────────────────────────────────────────
    /// Non-2xx response from the ads platform. Carries the raw body
    /// as the diagnostic payload; no retry is ever attempted.
    #[error("Ads API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A search row was missing the block the query selected.
    ///
    /// Raised at decode time so shape mismatches never surface as a
    /// field access failure deep in the reconciliation engine.
    #[error("Search row missing expected '{expected}' block ({context})")]
    RowShape {
        expected: &'static str,
        context: String,
    },

    /// A mutate call succeeded but returned no result entry.
    #[error("Mutate response for {operation} contained no results")]
    MissingResult { operation: &'static str },

    // ── Lookups ─────────────────────────────────────────────────────
    /// Label name lookup returned zero rows.
    #[error("Label not found: {label}")]
    LabelNotFound { label: String },

    /// Geo target name lookup returned zero rows.
    #[error("Geo target not found: {name}")]
    GeoTargetNotFound { name: String },
}

impl Error {
    /// Returns `true` if this is a "not found" lookup error.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::LabelNotFound { .. } | Self::GeoTargetNotFound { .. }
        )
    }

    /// HTTP status of the underlying response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
