//! Configuration management CLI commands.

use crate::branding::APP_DISPLAY_NAME;
use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::{LayoutMetadata, ScreenType};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default screen for new layouts (pos or kds)
    #[arg(long, value_name = "SCREEN")]
    screen: Option<ScreenType>,

    /// Default theme for new layouts (empty string clears it)
    #[arg(long, value_name = "ID")]
    theme: Option<String>,

    /// Layouts workspace directory
    #[arg(long, value_name = "DIR")]
    layouts_dir: Option<PathBuf>,

    /// Treat warnings as failures in `validate`
    #[arg(long, value_name = "BOOL")]
    strict: Option<bool>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    paths: PathsOutput,
    editor: EditorOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    layouts_dir: String,
}

#[derive(Serialize, Debug)]
struct EditorOutput {
    default_screen: ScreenType,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_theme: Option<String>,
    strict_validation: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let output = build_output(&config)?;

        if self.json {
            print_json(&output)?;
        } else {
            output_human_readable(&output);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.screen.is_none()
            && self.theme.is_none()
            && self.layouts_dir.is_none()
            && self.strict.is_none()
        {
            return Err(CliError::usage(
                "At least one configuration option must be specified: --screen, --theme, --layouts-dir, or --strict",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(screen) = self.screen {
            config.editor.default_screen = screen;
        }

        if let Some(theme) = &self.theme {
            if theme.is_empty() {
                config.editor.default_theme = None;
            } else {
                LayoutMetadata::validate_theme(theme)
                    .map_err(|e| CliError::validation(e.to_string()))?;
                config.editor.default_theme = Some(theme.clone());
            }
        }

        if let Some(path) = &self.layouts_dir {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create layouts directory {}: {e}",
                    path.display()
                ))
            })?;
            config.paths.layouts_dir = Some(path.clone());
        }

        if let Some(strict) = self.strict {
            config.editor.strict_validation = strict;
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn build_output(config: &Config) -> CliResult<ConfigOutput> {
    let config_file = Config::config_file_path()
        .map_err(|e| CliError::io(format!("Failed to resolve config path: {e}")))?;
    let layouts_dir = config
        .layouts_dir()
        .map_err(|e| CliError::io(format!("Failed to resolve layouts directory: {e}")))?;

    Ok(ConfigOutput {
        config_file: config_file.to_string_lossy().to_string(),
        paths: PathsOutput {
            layouts_dir: layouts_dir.to_string_lossy().to_string(),
        },
        editor: EditorOutput {
            default_screen: config.editor.default_screen,
            default_theme: config.editor.default_theme.clone(),
            strict_validation: config.editor.strict_validation,
        },
    })
}

/// Output configuration in human-readable format
fn output_human_readable(output: &ConfigOutput) {
    let title = format!("{APP_DISPLAY_NAME} Configuration");
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!();
    println!("Config file: {}", output.config_file);
    println!();

    println!("Paths:");
    println!("  Layouts Directory: {}", output.paths.layouts_dir);
    println!();

    println!("Editor:");
    println!("  Default Screen:    {}", output.editor.default_screen);
    println!(
        "  Default Theme:     {}",
        output.editor.default_theme.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Strict Validation: {}",
        output.editor.strict_validation
    );
    println!();
}
