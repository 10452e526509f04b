//! Command output rendering.
//!
//! Handlers build small record structs and hand them to a [`Renderer`]
//! constructed from the global flags, so `--output`, `--quiet`, and the
//! `NO_COLOR` convention behave identically across commands.

use std::io::{self, IsTerminal, Write};

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};

/// Whether to emit color codes. Auto mode requires an interactive
/// stdout and no `NO_COLOR` in the environment.
pub fn use_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal(),
    }
}

/// Renders command results in the format selected by `--output`.
pub struct Renderer {
    format: OutputFormat,
    quiet: bool,
}

impl Renderer {
    pub fn new(global: &GlobalOpts) -> Self {
        Self {
            format: global.output.clone(),
            quiet: global.quiet,
        }
    }

    /// Print a list of records.
    ///
    /// Table output goes through the `Tabled` projection of each record;
    /// plain output emits one identifier per line for scripting; the
    /// structured formats serialize the records themselves.
    pub fn list<T, R>(
        &self,
        records: &[T],
        to_row: impl Fn(&T) -> R,
        id_of: impl Fn(&T) -> String,
    ) where
        T: Serialize,
        R: Tabled,
    {
        let text = match self.format {
            OutputFormat::Table => Table::new(records.iter().map(to_row))
                .with(Style::rounded())
                .to_string(),
            OutputFormat::Json => fallible(serde_json::to_string_pretty(records)),
            OutputFormat::JsonCompact => fallible(serde_json::to_string(records)),
            OutputFormat::Yaml => fallible(serde_yaml::to_string(records)),
            OutputFormat::Plain => records.iter().map(id_of).collect::<Vec<_>>().join("\n"),
        };
        self.line(&text);
    }

    /// Print a single value as YAML regardless of `--output`; used for
    /// configuration dumps where a table makes no sense.
    pub fn yaml<T: Serialize>(&self, value: &T) {
        self.line(fallible(serde_yaml::to_string(value)).trim_end());
    }

    /// Print one chunk of text, honoring `--quiet`.
    pub fn line(&self, text: &str) {
        if self.quiet || text.is_empty() {
            return;
        }
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{text}");
    }
}

fn fallible(result: Result<String, impl std::fmt::Display>) -> String {
    result.unwrap_or_else(|e| format!("serialization failed: {e}"))
}
