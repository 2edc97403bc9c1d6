//! Shared types for CLI command handlers.

use crate::models::{Diagnostic, DiagnosticSummary, ScreenLayout};
use crate::registry::ComponentRegistry;
use crate::services::LayoutService;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Layout or input failed validation
    ValidationFailed = 1,
    /// File system or serialization failure
    IoError = 2,
    /// Invalid arguments or precondition not met
    Usage = 3,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands, printed to stderr by `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code for the process
    pub code: ExitCode,
    /// Human-readable message
    pub message: String,
}

impl CliError {
    /// Creates an error with an explicit exit code.
    pub fn new(code: ExitCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// File system or serialization failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ExitCode::IoError, message)
    }

    /// Validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ExitCode::ValidationFailed, message)
    }

    /// Invalid arguments or unmet precondition.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ExitCode::Usage, message)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// JSON body of `validate --json` and the web validate endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    /// No errors (and no warnings in strict mode)
    pub valid: bool,
    /// No errors
    pub can_save: bool,
    /// Counts per severity
    pub summary: DiagnosticSummary,
    /// All findings in rule order
    pub diagnostics: Vec<Diagnostic>,
}

/// Shared component registry, mapped to a CLI error.
pub fn registry() -> CliResult<&'static ComponentRegistry> {
    ComponentRegistry::builtin()
        .map_err(|e| CliError::io(format!("Failed to load component catalog: {e:#}")))
}

/// Loads a layout file, mapped to a CLI error.
pub fn load_layout(path: &Path) -> CliResult<ScreenLayout> {
    LayoutService::load(path).map_err(|e| CliError::io(format!("Failed to load layout: {e:#}")))
}

/// Saves a layout file, mapped to a CLI error.
pub fn save_layout(layout: &ScreenLayout, path: &Path) -> CliResult<()> {
    LayoutService::save(layout, path)
        .map_err(|e| CliError::io(format!("Failed to save layout: {e:#}")))
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
