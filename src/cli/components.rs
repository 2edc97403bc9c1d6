//! Component catalog commands.
//!
//! `components` lists the palette for a screen; `component` shows one definition.

use crate::cli::common::{print_json, registry, CliError, CliResult};
use crate::models::{ComponentCategory, ComponentDefinition, ScreenType};
use clap::Args;
use serde::Serialize;

/// List available components
#[derive(Debug, Clone, Args)]
pub struct ComponentsArgs {
    /// Only components for this screen (pos or kds)
    #[arg(long, value_name = "SCREEN")]
    pub screen: Option<ScreenType>,

    /// Only components in this category (layout, action, display, dialog)
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<ComponentCategory>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Show one component definition
#[derive(Debug, Clone, Args)]
pub struct ComponentArgs {
    /// Component ID (e.g. "SendButton")
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ComponentItem<'a> {
    id: &'a str,
    name: &'a str,
    screen: ScreenType,
    category: ComponentCategory,
    #[serde(rename = "defaultPosition")]
    default_position: String,
    #[serde(rename = "maxInstances")]
    max_instances: u32,
    required: bool,
}

impl<'a> From<&'a ComponentDefinition> for ComponentItem<'a> {
    fn from(definition: &'a ComponentDefinition) -> Self {
        Self {
            id: &definition.id,
            name: &definition.name,
            screen: definition.layout_type,
            category: definition.category,
            default_position: definition.default_position.to_string(),
            max_instances: definition.max_instances,
            required: definition.required,
        }
    }
}

#[derive(Debug, Serialize)]
struct ListComponentsResponse<'a> {
    components: Vec<ComponentItem<'a>>,
    count: usize,
}

impl ComponentsArgs {
    /// Execute the components command
    pub fn execute(&self) -> CliResult<()> {
        let registry = registry()?;

        let components: Vec<ComponentItem<'_>> = registry
            .definitions()
            .iter()
            .filter(|d| self.screen.is_none_or(|s| d.layout_type == s))
            .filter(|d| self.category.is_none_or(|c| d.category == c))
            .map(ComponentItem::from)
            .collect();

        if self.json {
            return print_json(&ListComponentsResponse {
                count: components.len(),
                components,
            });
        }

        if components.is_empty() {
            println!("No components match.");
            return Ok(());
        }

        println!("Components ({}):", components.len());
        println!();
        for item in &components {
            let required = if item.required { "required" } else { "" };
            println!(
                "  {:<16} {:<18} {:<4} {:<8} {:<7} max {:<3} {}",
                item.id,
                item.name,
                item.screen,
                item.category,
                item.default_position,
                item.max_instances,
                required
            );
        }
        Ok(())
    }
}

impl ComponentArgs {
    /// Execute the component command
    pub fn execute(&self) -> CliResult<()> {
        let registry = registry()?;
        let definition = registry
            .definition_by_id(&self.id)
            .ok_or_else(|| CliError::usage(format!("Unknown component '{}'", self.id)))?;

        if self.json {
            return print_json(definition);
        }

        println!("{} ({})", definition.name, definition.id);
        if !definition.description.is_empty() {
            println!("  {}", definition.description);
        }
        println!();
        println!("  Screen:           {}", definition.layout_type);
        println!("  Category:         {}", definition.category);
        println!("  Default position: {}", definition.default_position);
        println!("  Max instances:    {}", definition.max_instances);
        println!("  Required:         {}", if definition.required { "yes" } else { "no" });

        if let Some(variants) = &definition.variants {
            println!();
            println!("  Variants:");
            for variant in variants {
                println!("    {:<10} {}", variant.id, variant.label);
            }
        }

        if !definition.conflict_ids().is_empty() {
            println!();
            println!("  Conflicts with: {}", definition.conflict_ids().join(", "));
        }

        if !definition.config_schema.is_empty() {
            println!();
            println!("  Config:");
            for field in &definition.config_schema {
                println!(
                    "    {:<12} {:<8} {:<24} default: {}",
                    field.key,
                    format!("{:?}", field.field_type).to_lowercase(),
                    field.label,
                    field.default_value
                );
            }
        }

        Ok(())
    }
}
