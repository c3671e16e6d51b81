//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use delivery_core::LedgerError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, ledger, delivery record)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// Rejected by the ledger's owner policy
    Unauthorized(String),

    /// Ledger failed its integrity check
    IntegrityFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::InvalidInput(message)
            | CliError::Unauthorized(message)
            | CliError::IntegrityFailed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Unauthorized(_) => exit_codes::UNAUTHORIZED,
            CliError::IntegrityFailed(_) => exit_codes::INTEGRITY_FAILED,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

/// Translate ledger errors a user can act on into CLI errors with hints.
pub fn from_ledger_error(err: LedgerError) -> anyhow::Error {
    match err {
        LedgerError::NotFound(_) => CliError::not_found(
            err.to_string(),
            "Hint: Run `delivery list` to find package IDs.",
        )
        .into(),
        LedgerError::Unauthorized(message) => CliError::Unauthorized(message).into(),
        other => anyhow::Error::new(other),
    }
}
