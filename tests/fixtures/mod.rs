//! Shared test fixtures for E2E CLI and API tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use chrono::{TimeZone, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zoneforge::models::{
    LayoutMetadata, Position, ScreenLayout, ScreenType, ZoneConfig, ZoneInstance, ZoneStore,
};

/// Deterministic metadata for test layouts.
pub fn test_metadata(name: &str, screen: ScreenType, theme: Option<&str>) -> LayoutMetadata {
    LayoutMetadata {
        name: name.to_string(),
        description: "E2E test layout".to_string(),
        screen,
        theme: theme.map(String::from),
        created: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        modified: Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
        version: "1.0".to_string(),
    }
}

/// Zone with a fixed ID and empty config.
pub fn zone(id: &str, component: &str, position: Position, order: i64) -> ZoneInstance {
    ZoneInstance::new(id, component, position, order)
}

/// Send button zone routed to `variant` through its config.
pub fn send_button(id: &str, order: i64, variant: &str) -> ZoneInstance {
    let mut config = ZoneConfig::new();
    config.insert("variant", variant.into());
    zone(id, "SendButton", Position::Bottom, order)
        .with_variant(variant)
        .with_config(config)
}

/// The six required POS components, one each.
pub fn required_pos_zones() -> Vec<ZoneInstance> {
    vec![
        zone("top", "TopBar", Position::Top, 0),
        zone("cats", "CategoryBar", Position::Left, 0),
        zone("grid", "ItemGrid", Position::Center, 0),
        zone("order", "OrderPanel", Position::Right, 0),
        zone("totals", "TotalsDisplay", Position::Right, 1),
        send_button("send", 0, "kitchen"),
    ]
}

/// A dine-in POS layout that validates with no diagnostics.
pub fn complete_pos_zones() -> Vec<ZoneInstance> {
    let mut zones = required_pos_zones();
    zones.push(zone("cash", "PayCash", Position::Bottom, 1));
    zones.push(zone("card", "PayCard", Position::Bottom, 2));
    zones.push(zone("table", "TableSelect", Position::Top, 1));
    zones
}

/// A complete POS layout with deterministic metadata.
pub fn test_layout_pos() -> ScreenLayout {
    ScreenLayout {
        metadata: test_metadata("Front Counter", ScreenType::Pos, None),
        zones: ZoneStore::from_zones(complete_pos_zones()),
    }
}

/// A POS layout with no zones at all.
pub fn test_layout_empty_pos() -> ScreenLayout {
    ScreenLayout {
        metadata: test_metadata("Empty", ScreenType::Pos, None),
        zones: ZoneStore::new(),
    }
}

/// A POS layout whose only issues are warnings (no payment path).
pub fn test_layout_warnings_only() -> ScreenLayout {
    let mut zones = required_pos_zones();
    zones.push(zone("table", "TableSelect", Position::Top, 1));
    ScreenLayout {
        metadata: test_metadata("No Payments", ScreenType::Pos, None),
        zones: ZoneStore::from_zones(zones),
    }
}

/// A POS layout with QuickPay next to PayCash.
pub fn test_layout_with_conflict() -> ScreenLayout {
    let mut zones = complete_pos_zones();
    zones.push(zone("quick", "QuickPay", Position::Bottom, 3));
    ScreenLayout {
        metadata: test_metadata("Conflicting Payments", ScreenType::Pos, None),
        zones: ZoneStore::from_zones(zones),
    }
}

/// A complete KDS layout.
pub fn test_layout_kds() -> ScreenLayout {
    ScreenLayout {
        metadata: test_metadata("Expo Line", ScreenType::Kds, None),
        zones: ZoneStore::from_zones(vec![
            zone("header", "KdsHeader", Position::Top, 0),
            zone("tickets", "TicketGrid", Position::Center, 0),
        ]),
    }
}

/// Writes a layout into `dir` under `filename`.
pub fn write_layout_file(dir: &Path, filename: &str, layout: &ScreenLayout) -> PathBuf {
    let path = dir.join(filename);
    let json = serde_json::to_string_pretty(layout).expect("Failed to serialize layout");
    fs::write(&path, json).expect("Failed to write layout file");
    path
}

/// Writes a layout into a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the file is needed.
pub fn create_temp_layout_file(layout: &ScreenLayout) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_layout_file(temp_dir.path(), "layout.json", layout);
    (path, temp_dir)
}

/// Reads a layout file back.
pub fn read_layout_file(path: &Path) -> ScreenLayout {
    let content = fs::read_to_string(path).expect("Failed to read layout file");
    serde_json::from_str(&content).expect("Failed to parse layout file")
}
