//! Clap derive structures for the `adverge` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// adverge -- drive ads automation rules from the command line
#[derive(Debug, Parser)]
#[command(
    name = "adverge",
    version,
    about = "Apply ads automation rules: toggle entities and manage conversion value rules",
    long_about = "Executes automation rule actions against an ads account.\n\n\
        TOGGLE flips the serving status of ads, ad groups, or campaigns;\n\
        conversion-value-rule commands converge campaigns toward a\n\
        geo-scoped conversion multiplier with the minimal set of mutations.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use
    #[arg(long, short = 'p', env = "ADVERGE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Customer id (overrides profile)
    #[arg(long, short = 'c', env = "ADVERGE_CUSTOMER", global = true)]
    pub customer: Option<String>,

    /// API endpoint root (overrides profile)
    #[arg(long, env = "ADVERGE_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Developer token
    #[arg(long, env = "ADVERGE_DEVELOPER_TOKEN", global = true, hide_env = true)]
    pub developer_token: Option<String>,

    /// OAuth access token
    #[arg(long, env = "ADVERGE_ACCESS_TOKEN", global = true, hide_env = true)]
    pub access_token: Option<String>,

    /// Manager account id, sent as login-customer-id
    #[arg(long, env = "ADVERGE_LOGIN_CUSTOMER", global = true)]
    pub login_customer: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ADVERGE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "ADVERGE_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Selectors ────────────────────────────────────────────────────────

/// How the identifier argument is interpreted.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SelectorArg {
    /// Semicolon-separated ad ids
    AdId,
    /// Ads carrying a label
    AdLabel,
    /// Semicolon-separated ad group ids
    AdGroupId,
    /// Ad groups carrying a label
    AdGroupLabel,
    /// Semicolon-separated campaign ids
    CampaignId,
    /// Campaigns carrying a label
    CampaignLabel,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Toggle the serving status of targeted entities
    #[command(alias = "t")]
    Toggle(ToggleArgs),

    /// Manage conversion value rules
    Cvr(CvrArgs),

    /// Check live entity status against an expected evaluation
    Validate(ValidateArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TOGGLE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ToggleArgs {
    /// Target identifier: ids ("123;456") or a label name
    pub identifier: String,

    /// How to interpret the identifier
    #[arg(long, short = 's', default_value = "ad-id", value_enum)]
    pub selector: SelectorArg,

    /// Enable (true) or pause (false) the targets
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    pub on: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONVERSION VALUE RULES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CvrArgs {
    #[command(subcommand)]
    pub command: CvrCommand,
}

#[derive(Debug, Subcommand)]
pub enum CvrCommand {
    /// Converge campaigns toward a geo-scoped conversion multiplier
    Apply {
        /// Campaign identifier: ids ("123;456") or a label name
        identifier: String,

        /// How to interpret the identifier
        #[arg(long, short = 's', default_value = "campaign-id", value_enum)]
        selector: SelectorArg,

        /// Raw conversion weight; the multiplier is 1 + clamp(weight, -0.5, 10)
        #[arg(long, short = 'w', required = true, allow_negative_numbers = true)]
        weight: f64,

        /// Geo (city) name scoping the rule
        #[arg(long, short = 'g', required = true)]
        geo: String,
    },

    /// Pause every value rule attached to the campaigns
    Disable {
        /// Campaign identifier: ids ("123;456") or a label name
        identifier: String,

        /// How to interpret the identifier
        #[arg(long, short = 's', default_value = "campaign-id", value_enum)]
        selector: SelectorArg,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VALIDATE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Target identifier: ids ("123;456") or a label name
    pub identifier: String,

    /// How to interpret the identifier (ad and ad-group selectors only)
    #[arg(long, short = 's', default_value = "ad-id", value_enum)]
    pub selector: SelectorArg,

    /// Expected evaluation: true means entities should be enabled
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    pub on: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration (secrets redacted)
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
