//! Zone placement commands for layout files.
//!
//! Each mutating subcommand loads the layout, applies one placement operation
//! and saves the result atomically.

use crate::cli::common::{load_layout, print_json, registry, save_layout, CliError, CliResult};
use crate::models::{ConfigValue, Position, ScreenLayout, ZoneInstance, ZoneStore};
use crate::placement::{Direction, PlacementEngine};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Place and arrange zones in a layout
#[derive(Debug, Clone, Args)]
pub struct ZoneArgs {
    /// Zone subcommand
    #[command(subcommand)]
    pub command: ZoneCommand,
}

/// Zone subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ZoneCommand {
    /// List zones grouped by position
    List(ListZonesArgs),
    /// Add a zone from the component catalog
    Add(AddZoneArgs),
    /// Remove a zone
    Remove(ZoneIdArgs),
    /// Move a zone to the end of another position
    Move(MoveZoneArgs),
    /// Swap a zone with its neighbour in the same position
    Reorder(ReorderZoneArgs),
    /// Drop one zone onto another (drag and drop)
    Drop(DropZoneArgs),
    /// Clone a zone with its config
    Duplicate(ZoneIdArgs),
    /// Show or hide a zone
    Toggle(ZoneIdArgs),
    /// Set a config value
    Set(SetConfigArgs),
    /// Change or clear a zone's variant
    Variant(SetVariantArgs),
    /// Set or clear a zone's size overrides
    Resize(ResizeZoneArgs),
}

/// List zones in a layout
#[derive(Debug, Clone, Args)]
pub struct ListZonesArgs {
    /// Path to layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Only zones in this position
    #[arg(long, value_name = "POSITION")]
    pub position: Option<Position>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Add a zone
#[derive(Debug, Clone, Args)]
pub struct AddZoneArgs {
    /// Path to layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Component ID (e.g. "ItemGrid")
    #[arg(long, value_name = "ID")]
    pub component: String,

    /// Target position; defaults to the component's default position
    #[arg(long, value_name = "POSITION")]
    pub position: Option<Position>,

    /// Initial variant (e.g. "bar")
    #[arg(long, value_name = "VARIANT")]
    pub variant: Option<String>,

    /// Add even when the component is at its instance limit
    #[arg(long)]
    pub force: bool,
}

/// Commands that act on a single zone
#[derive(Debug, Clone, Args)]
pub struct ZoneIdArgs {
    /// Path to layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Zone ID
    #[arg(long, value_name = "ID")]
    pub id: String,
}

/// Move a zone to another position
#[derive(Debug, Clone, Args)]
pub struct MoveZoneArgs {
    /// Path to layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Zone ID
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// Target position
    #[arg(long, value_name = "POSITION")]
    pub to: Position,
}

/// Reorder a zone within its position
#[derive(Debug, Clone, Args)]
pub struct ReorderZoneArgs {
    /// Path to layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Zone ID
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// Direction (up or down)
    #[arg(long, value_name = "DIRECTION")]
    pub direction: Direction,
}

/// Drop a zone onto another zone
#[derive(Debug, Clone, Args)]
pub struct DropZoneArgs {
    /// Path to layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Dragged zone ID
    #[arg(long, value_name = "ID")]
    pub source: String,

    /// Zone ID it is dropped onto
    #[arg(long, value_name = "ID")]
    pub target: String,
}

/// Set a config value on a zone
#[derive(Debug, Clone, Args)]
pub struct SetConfigArgs {
    /// Path to layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Zone ID
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// Config key (see `component <ID>` for the schema)
    #[arg(long, value_name = "KEY")]
    pub key: String,

    /// New value, parsed according to the field type
    #[arg(long, value_name = "VALUE")]
    pub value: String,
}

/// Change a zone's variant
#[derive(Debug, Clone, Args)]
pub struct SetVariantArgs {
    /// Path to layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Zone ID
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// Variant ID
    #[arg(long, value_name = "VARIANT", conflicts_with = "clear")]
    pub variant: Option<String>,

    /// Clear the variant
    #[arg(long)]
    pub clear: bool,
}

/// Resize a zone
#[derive(Debug, Clone, Args)]
pub struct ResizeZoneArgs {
    /// Path to layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Zone ID
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// Width override (omit to clear)
    #[arg(long, value_name = "N")]
    pub width: Option<u32>,

    /// Height override (omit to clear)
    #[arg(long, value_name = "N")]
    pub height: Option<u32>,
}

// JSON response types
#[derive(Debug, Serialize)]
struct ListZonesResponse<'a> {
    zones: Vec<&'a ZoneInstance>,
    count: usize,
}

impl ZoneArgs {
    /// Execute the zone command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ZoneCommand::List(args) => args.execute(),
            ZoneCommand::Add(args) => args.execute(),
            ZoneCommand::Remove(args) => args.remove(),
            ZoneCommand::Move(args) => args.execute(),
            ZoneCommand::Reorder(args) => args.execute(),
            ZoneCommand::Drop(args) => args.execute(),
            ZoneCommand::Duplicate(args) => args.duplicate(),
            ZoneCommand::Toggle(args) => args.toggle(),
            ZoneCommand::Set(args) => args.execute(),
            ZoneCommand::Variant(args) => args.execute(),
            ZoneCommand::Resize(args) => args.execute(),
        }
    }
}

/// Loads the layout, applies `edit` to its zones and saves the result.
fn edit_layout<F>(path: &Path, edit: F) -> CliResult<ScreenLayout>
where
    F: FnOnce(&PlacementEngine<'_>, &ScreenLayout) -> CliResult<ZoneStore>,
{
    let engine = PlacementEngine::new(registry()?);
    let mut layout = load_layout(path)?;
    let zones = edit(&engine, &layout)?;
    layout.replace_zones(zones);
    save_layout(&layout, path)?;
    Ok(layout)
}

fn require_zone<'a>(layout: &'a ScreenLayout, id: &str) -> CliResult<&'a ZoneInstance> {
    layout
        .zones
        .get(id)
        .ok_or_else(|| CliError::usage(format!("Zone '{id}' not found")))
}

impl ListZonesArgs {
    /// Execute the list command
    pub fn execute(&self) -> CliResult<()> {
        let layout = load_layout(&self.layout)?;
        let positions: Vec<Position> = match self.position {
            Some(position) => vec![position],
            None => Position::ALL.to_vec(),
        };

        if self.json {
            let zones: Vec<&ZoneInstance> = positions
                .iter()
                .flat_map(|p| layout.zones.in_position(*p))
                .collect();
            return print_json(&ListZonesResponse {
                count: zones.len(),
                zones,
            });
        }

        if layout.zones.is_empty() {
            println!("No zones placed.");
            return Ok(());
        }

        for position in positions {
            let zones = layout.zones.in_position(position);
            if zones.is_empty() {
                continue;
            }
            println!("{position}:");
            for zone in zones {
                let variant = zone
                    .variant
                    .as_deref()
                    .map(|v| format!(" [{v}]"))
                    .unwrap_or_default();
                let hidden = if zone.visible { "" } else { " (hidden)" };
                println!(
                    "  {:>3}  {:<24} {}{}{}",
                    zone.order, zone.id, zone.component, variant, hidden
                );
            }
        }
        Ok(())
    }
}

impl AddZoneArgs {
    /// Execute the add command
    pub fn execute(&self) -> CliResult<()> {
        let mut new_id = None;
        edit_layout(&self.layout, |engine, layout| {
            let screen = layout.metadata.screen;
            let definition = engine
                .registry()
                .definition_for_screen(&self.component, screen)
                .ok_or_else(|| {
                    CliError::usage(format!(
                        "Component '{}' is not available on {screen} screens",
                        self.component
                    ))
                })?;

            if let Some(variant) = &self.variant {
                if !definition.has_variant(variant) {
                    return Err(CliError::usage(format!(
                        "Component '{}' has no variant '{variant}'",
                        definition.id
                    )));
                }
            }

            if !self.force && !engine.can_place(&layout.zones, &definition.id) {
                return Err(CliError::usage(format!(
                    "{} is at its limit of {} instance(s) (use --force to add anyway)",
                    definition.name, definition.max_instances
                )));
            }

            let position = self.position.unwrap_or(definition.default_position);
            let placement = engine.add(
                &layout.zones,
                &definition.id,
                position,
                self.variant.as_deref(),
            );
            new_id = placement.zone_id;
            Ok(placement.store)
        })?;

        if let Some(id) = new_id {
            println!("Added {} zone '{id}'", self.component);
        }
        Ok(())
    }
}

impl ZoneIdArgs {
    /// Execute the remove command
    pub fn remove(&self) -> CliResult<()> {
        edit_layout(&self.layout, |engine, layout| {
            require_zone(layout, &self.id)?;
            Ok(engine.remove(&layout.zones, &self.id))
        })?;
        println!("Removed zone '{}'", self.id);
        Ok(())
    }

    /// Execute the duplicate command
    pub fn duplicate(&self) -> CliResult<()> {
        let mut new_id = None;
        edit_layout(&self.layout, |engine, layout| {
            let zone = require_zone(layout, &self.id)?;
            let placement = engine.duplicate(&layout.zones, &self.id);
            if placement.zone_id.is_none() {
                return Err(CliError::usage(format!(
                    "Cannot duplicate '{}': {} is at its instance limit",
                    self.id, zone.component
                )));
            }
            new_id = placement.zone_id;
            Ok(placement.store)
        })?;

        if let Some(id) = new_id {
            println!("Duplicated '{}' as '{id}'", self.id);
        }
        Ok(())
    }

    /// Execute the toggle command
    pub fn toggle(&self) -> CliResult<()> {
        let layout = edit_layout(&self.layout, |engine, layout| {
            require_zone(layout, &self.id)?;
            Ok(engine.toggle_visibility(&layout.zones, &self.id))
        })?;
        let visible = layout.zones.get(&self.id).is_some_and(|z| z.visible);
        println!(
            "Zone '{}' is now {}",
            self.id,
            if visible { "visible" } else { "hidden" }
        );
        Ok(())
    }
}

impl MoveZoneArgs {
    /// Execute the move command
    pub fn execute(&self) -> CliResult<()> {
        edit_layout(&self.layout, |engine, layout| {
            require_zone(layout, &self.id)?;
            Ok(engine.move_to(&layout.zones, &self.id, self.to))
        })?;
        println!("Moved zone '{}' to {}", self.id, self.to);
        Ok(())
    }
}

impl ReorderZoneArgs {
    /// Execute the reorder command
    pub fn execute(&self) -> CliResult<()> {
        edit_layout(&self.layout, |engine, layout| {
            require_zone(layout, &self.id)?;
            Ok(engine.reorder(&layout.zones, &self.id, self.direction))
        })?;
        println!("Moved zone '{}' {}", self.id, self.direction);
        Ok(())
    }
}

impl DropZoneArgs {
    /// Execute the drop command
    pub fn execute(&self) -> CliResult<()> {
        edit_layout(&self.layout, |engine, layout| {
            require_zone(layout, &self.source)?;
            require_zone(layout, &self.target)?;
            Ok(engine.drop_onto(&layout.zones, &self.source, &self.target))
        })?;
        println!("Dropped zone '{}' onto '{}'", self.source, self.target);
        Ok(())
    }
}

impl SetConfigArgs {
    /// Execute the set command
    pub fn execute(&self) -> CliResult<()> {
        edit_layout(&self.layout, |engine, layout| {
            let zone = require_zone(layout, &self.id)?;

            if self.key == "variant" {
                return set_variant(engine, layout, zone, Some(&self.value));
            }

            let field = engine
                .registry()
                .definition_by_id(&zone.component)
                .and_then(|d| d.field(&self.key))
                .ok_or_else(|| {
                    CliError::usage(format!(
                        "{} has no config field '{}'",
                        zone.component, self.key
                    ))
                })?;

            let value = ConfigValue::parse_for(field.field_type, &self.value)
                .filter(|v| field.accepts(v))
                .ok_or_else(|| {
                    CliError::validation(format!(
                        "Invalid value '{}' for {} field '{}'",
                        self.value,
                        format!("{:?}", field.field_type).to_lowercase(),
                        self.key
                    ))
                })?;

            Ok(engine.set_config(&layout.zones, &self.id, &self.key, value))
        })?;
        println!("Set {} = {} on zone '{}'", self.key, self.value, self.id);
        Ok(())
    }
}

impl SetVariantArgs {
    /// Execute the variant command
    pub fn execute(&self) -> CliResult<()> {
        if self.variant.is_none() && !self.clear {
            return Err(CliError::usage("Specify --variant <VARIANT> or --clear"));
        }

        edit_layout(&self.layout, |engine, layout| {
            let zone = require_zone(layout, &self.id)?;
            set_variant(engine, layout, zone, self.variant.as_deref())
        })?;

        match &self.variant {
            Some(variant) => println!("Zone '{}' now uses variant '{variant}'", self.id),
            None => println!("Cleared variant of zone '{}'", self.id),
        }
        Ok(())
    }
}

fn set_variant(
    engine: &PlacementEngine<'_>,
    layout: &ScreenLayout,
    zone: &ZoneInstance,
    variant: Option<&str>,
) -> CliResult<ZoneStore> {
    if let Some(variant) = variant {
        let known = engine
            .registry()
            .definition_by_id(&zone.component)
            .is_some_and(|d| d.has_variant(variant));
        if !known {
            return Err(CliError::usage(format!(
                "Component '{}' has no variant '{variant}'",
                zone.component
            )));
        }
    }
    Ok(engine.set_variant(&layout.zones, &zone.id, variant))
}

impl ResizeZoneArgs {
    /// Execute the resize command
    pub fn execute(&self) -> CliResult<()> {
        edit_layout(&self.layout, |engine, layout| {
            require_zone(layout, &self.id)?;
            Ok(engine.resize(&layout.zones, &self.id, self.width, self.height))
        })?;
        println!("Resized zone '{}'", self.id);
        Ok(())
    }
}
