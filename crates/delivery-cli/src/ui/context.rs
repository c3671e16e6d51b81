//! UI context: output mode and colour decisions.

use std::io::IsTerminal;

use clap::ValueEnum;

/// Value of the `--format` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns with a header, even when piped
    Table,
    /// Tab-separated rows and `key=value` lines
    Plain,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    Json,
    #[default]
    Plain,
    Pretty,
}

impl OutputMode {
    /// `--json` wins, then an explicit `--format`. Without either, a TTY gets
    /// tables unless `TERM=dumb`.
    fn resolve(json: bool, format: Option<OutputFormat>, is_tty: bool, term_is_dumb: bool) -> Self {
        match (json, format) {
            (true, _) => Self::Json,
            (false, Some(OutputFormat::Table)) => Self::Pretty,
            (false, Some(OutputFormat::Plain)) => Self::Plain,
            (false, None) if is_tty && !term_is_dumb => Self::Pretty,
            (false, None) => Self::Plain,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    pub mode: OutputMode,
}

impl UiContext {
    /// Create context from environment and CLI flags.
    pub fn from_env(json: bool, format: Option<OutputFormat>) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();

        Self {
            color: is_tty && !no_color_env && !term_is_dumb,
            mode: OutputMode::resolve(json, format, is_tty, term_is_dumb),
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            color: false,
            mode: OutputMode::Plain,
        }
    }

    #[cfg(test)]
    pub fn pretty() -> Self {
        Self {
            color: false,
            mode: OutputMode::Pretty,
        }
    }
}
