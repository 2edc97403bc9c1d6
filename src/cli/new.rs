//! Create an empty layout file.

use crate::cli::common::{save_layout, CliError, CliResult};
use crate::config::Config;
use crate::models::{LayoutMetadata, ScreenLayout, ScreenType};
use crate::services::LayoutService;
use clap::Args;
use std::path::PathBuf;

/// Create a new, empty layout file
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Path of the layout file to create; defaults to `<layouts dir>/<name>.json`
    #[arg(short, long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Layout name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Screen type (pos or kds); defaults to editor.default_screen
    #[arg(long, value_name = "SCREEN")]
    pub screen: Option<ScreenType>,

    /// Theme ID (e.g. "express"); defaults to editor.default_theme
    #[arg(long, value_name = "ID")]
    pub theme: Option<String>,

    /// Layout description
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().unwrap_or_default();
        let path = match &self.layout {
            Some(path) => path.clone(),
            None => {
                let dir = config.layouts_dir().map_err(|e| {
                    CliError::io(format!("Failed to resolve layouts directory: {e:#}"))
                })?;
                LayoutService::path_for_name(&dir, &self.name)
            }
        };

        if path.exists() && !self.force {
            return Err(CliError::usage(format!(
                "Layout file already exists: {} (use --force to overwrite)",
                path.display()
            )));
        }

        let screen = self.screen.unwrap_or(config.editor.default_screen);

        let mut layout = ScreenLayout::new(&self.name, screen)
            .map_err(|e| CliError::validation(format!("Invalid layout: {e}")))?;

        if let Some(theme) = self.theme.as_ref().or(config.editor.default_theme.as_ref()) {
            LayoutMetadata::validate_theme(theme).map_err(|e| CliError::validation(e.to_string()))?;
            layout = layout.with_theme(theme.clone());
        }
        if let Some(description) = &self.description {
            layout.metadata.description.clone_from(description);
        }

        save_layout(&layout, &path)?;

        println!(
            "Created {} layout '{}' at {}",
            screen,
            layout.metadata.name,
            path.display()
        );
        Ok(())
    }
}
