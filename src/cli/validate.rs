//! Validation command for layout files.

use crate::cli::common::{
    load_layout, print_json, registry, CliError, CliResult, ValidationResponse,
};
use crate::config::Config;
use crate::models::Severity;
use crate::validation;
use clap::Args;
use std::path::PathBuf;

/// Validate a layout file for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero); defaults to editor.strict_validation
    #[arg(long)]
    pub strict: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let layout = load_layout(&self.layout)?;
        let registry = registry()?;
        let strict = self.strict || Config::load().is_ok_and(|c| c.editor.strict_validation);

        let diagnostics = validation::validate(
            registry,
            layout.zones.zones(),
            layout.metadata.screen,
            layout.theme(),
        );
        let summary = validation::summarize(&diagnostics);
        let can_save = validation::can_save(&diagnostics);

        let response = ValidationResponse {
            valid: can_save && !(strict && summary.warnings > 0),
            can_save,
            summary,
            diagnostics,
        };

        if self.json {
            print_json(&response)?;
        } else {
            if response.valid {
                println!("✓ Validation passed");
            } else {
                println!("✗ Validation failed");
            }

            println!();
            println!(
                "{} error(s), {} warning(s), {} info(s)",
                summary.errors, summary.warnings, summary.infos
            );

            if !response.diagnostics.is_empty() {
                println!("\nIssues:");
                for diagnostic in &response.diagnostics {
                    let prefix = match diagnostic.severity {
                        Severity::Error => "  ✗",
                        Severity::Warning => "  ⚠",
                        Severity::Info => "  ℹ",
                    };
                    println!("{prefix} {}", diagnostic.message);
                    if let Some(suggestion) = &diagnostic.suggestion {
                        println!("      → {suggestion}");
                    }
                }
            }
        }

        if !can_save {
            return Err(CliError::validation("Validation failed"));
        }

        if !response.valid {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}
