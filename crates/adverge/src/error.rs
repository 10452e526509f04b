//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use adverge_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const PARTIAL: i32 = 6;
    pub const MISMATCH: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(adverge::auth_failed),
        help(
            "Verify the developer token and access token for the active profile.\n\
             Access tokens expire; refresh it and retry.\n\
             Run: adverge config init"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(adverge::no_credentials),
        help(
            "Configure credentials with: adverge config init\n\
             Or set ADVERGE_DEVELOPER_TOKEN and ADVERGE_ACCESS_TOKEN."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(adverge::not_found))]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(code(adverge::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Unsupported ──────────────────────────────────────────────────

    #[error("Operation '{operation}' is not supported: {reason}")]
    #[diagnostic(code(adverge::unsupported))]
    Unsupported { operation: String, reason: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(adverge::validation))]
    Validation { field: String, reason: String },

    #[error("Missing required parameter: {field}")]
    #[diagnostic(code(adverge::missing_parameter))]
    MissingParameter { field: String },

    // ── Outcomes ─────────────────────────────────────────────────────

    #[error("{failed} of {total} campaigns failed to reconcile")]
    #[diagnostic(
        code(adverge::partial_failure),
        help("Successful campaigns were applied; re-run to retry the failed ones.")
    )]
    PartialFailure { failed: usize, total: usize },

    #[error("{count} entities do not match the expected status")]
    #[diagnostic(code(adverge::status_mismatch))]
    StatusMismatch { count: usize },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(adverge::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: adverge config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(adverge::no_config),
        help(
            "Create one with: adverge config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(adverge::config))]
    Config(Box<figment::Error>),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Operation '{action}' requires confirmation")]
    #[diagnostic(
        code(adverge::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    Aborted { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    #[diagnostic(code(adverge::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::PartialFailure { .. } => exit_code::PARTIAL,
            Self::StatusMismatch { .. } => exit_code::MISMATCH,
            Self::Validation { .. } | Self::MissingParameter { .. } | Self::Aborted { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingParameter { field } => CliError::MissingParameter { field },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::LabelNotFound { label } => CliError::NotFound {
                resource_type: "label".into(),
                identifier: label,
            },

            CoreError::GeoTargetNotFound { name } => CliError::NotFound {
                resource_type: "geo target".into(),
                identifier: name,
            },

            CoreError::Unsupported { operation, reason } => {
                CliError::Unsupported { operation, reason }
            }

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                message,
                status: None,
            },
        }
    }
}

impl From<adverge_config::ConfigError> for CliError {
    fn from(err: adverge_config::ConfigError) -> Self {
        use adverge_config::ConfigError;
        match err {
            ConfigError::NoCredentials { profile, .. } => CliError::NoCredentials { profile },
            ConfigError::UnknownProfile(name) => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
            ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
        }
    }
}
