// ── Core error types ──
//
// User-facing errors from adverge-core. Consumers never see raw HTTP
// status codes or JSON parse failures directly. The
// `From<adverge_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Parameter errors (fail fast, before any network call) ───────
    #[error("Missing required parameter: {field}")]
    MissingParameter { field: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Label not found: {label}")]
    LabelNotFound { label: String },

    #[error("Geo target not found: {name}")]
    GeoTargetNotFound { name: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation not supported: {operation} ({reason})")]
    Unsupported { operation: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<adverge_api::Error> for CoreError {
    fn from(err: adverge_api::Error) -> Self {
        match err {
            adverge_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            adverge_api::Error::LabelNotFound { label } => CoreError::LabelNotFound { label },
            adverge_api::Error::GeoTargetNotFound { name } => {
                CoreError::GeoTargetNotFound { name }
            }
            adverge_api::Error::Api {
                status, message, ..
            } => CoreError::Api {
                message,
                status: Some(status),
            },
            adverge_api::Error::Transport(ref e) => CoreError::Api {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            adverge_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            adverge_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            adverge_api::Error::RowShape { expected, context } => CoreError::Internal(format!(
                "Search row missing expected '{expected}' block ({context})"
            )),
            adverge_api::Error::MissingResult { operation } => {
                CoreError::Internal(format!("Mutate response for {operation} had no results"))
            }
        }
    }
}
