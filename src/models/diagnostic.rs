//! Validation findings about an assembled layout.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks saving
    Error,
    /// Advisory, likely a mistake
    Warning,
    /// Advisory tip
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Stable key (e.g. "missing-ItemGrid", "dup-send-variant-kitchen")
    pub id: String,
    /// Severity
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Optional hint for fixing the issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Zones the finding is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_zones: Option<Vec<String>>,
    /// Component the finding is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic with the given severity.
    pub fn new(id: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            suggestion: None,
            affected_zones: None,
            component_id: None,
        }
    }

    /// Creates an error diagnostic.
    pub fn error(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Error, message)
    }

    /// Creates a warning diagnostic.
    pub fn warning(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Warning, message)
    }

    /// Creates an info diagnostic.
    pub fn info(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Info, message)
    }

    /// Sets a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Sets the affected zone IDs.
    #[must_use]
    pub fn with_zones(mut self, zones: Vec<String>) -> Self {
        self.affected_zones = Some(zones);
        self
    }

    /// Sets the related component.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component_id = Some(component.into());
        self
    }

    /// Whether this diagnostic blocks saving.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }
        Ok(())
    }
}

/// Diagnostic counts per severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticSummary {
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of infos
    pub infos: usize,
    /// Whether any error is present
    pub has_errors: bool,
}
