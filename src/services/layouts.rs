//! Layout file I/O service.
//!
//! This module centralizes all layout file operations, providing a consistent
//! interface for loading, saving, and listing layout files.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{ScreenLayout, ScreenType};

/// Extension used for layout files.
pub const LAYOUT_EXTENSION: &str = "json";

/// Short description of a layout file in a workspace directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSummary {
    /// File name inside the workspace (e.g. "front_counter.json")
    pub filename: String,
    /// Layout name from metadata
    pub name: String,
    /// Screen type
    pub screen: ScreenType,
    /// Theme identifier, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Number of placed zones
    pub zone_count: usize,
    /// Last modification time (RFC 3339)
    pub modified: String,
}

/// Service for managing layout file I/O operations.
///
/// This service centralizes all layout file operations to ensure consistent
/// handling of file paths, error messages, and file system operations.
pub struct LayoutService;

impl LayoutService {
    /// Loads a layout from a JSON file.
    ///
    /// Zones naming unknown components are kept; they only matter to validation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use zoneforge::services::LayoutService;
    ///
    /// let layout = LayoutService::load(Path::new("front_counter.json"))?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<ScreenLayout> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file {}", path.display()))?;

        let layout: ScreenLayout = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse layout file {}", path.display()))?;

        layout
            .validate()
            .with_context(|| format!("Invalid layout in {}", path.display()))?;

        Ok(layout)
    }

    /// Saves a layout to a JSON file.
    ///
    /// This performs an atomic write using a temp file + rename pattern to ensure
    /// the file is never left in a corrupted state.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use zoneforge::{models::{ScreenLayout, ScreenType}, services::LayoutService};
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let layout = ScreenLayout::new("Front Counter", ScreenType::Pos)?;
    /// LayoutService::save(&layout, Path::new("front_counter.json"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(layout: &ScreenLayout, path: &Path) -> Result<()> {
        layout
            .validate()
            .with_context(|| format!("Refusing to save invalid layout to {}", path.display()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let content =
            serde_json::to_string_pretty(layout).context("Failed to serialize layout")?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp layout file {}", temp_path.display()))?;

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to save layout to {}", path.display()))?;

        Ok(())
    }

    /// Lists layout files in a workspace directory, sorted by filename.
    ///
    /// Files that fail to parse are skipped with a warning. A missing directory
    /// yields an empty list.
    pub fn list(dir: &Path) -> Result<Vec<LayoutSummary>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read layouts directory {}", dir.display()))?;

        let mut summaries = Vec::new();
        for entry in entries {
            let path = entry.context("Failed to read directory entry")?.path();
            if !is_layout_file(&path) {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            match Self::load(&path) {
                Ok(layout) => summaries.push(LayoutSummary {
                    filename: filename.to_string(),
                    name: layout.metadata.name,
                    screen: layout.metadata.screen,
                    theme: layout.metadata.theme,
                    zone_count: layout.zones.len(),
                    modified: layout.metadata.modified.to_rfc3339(),
                }),
                Err(e) => tracing::warn!("Skipping {}: {e:#}", path.display()),
            }
        }

        summaries.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(summaries)
    }

    /// Path of the layout file a layout named `name` gets inside `dir`.
    #[must_use]
    pub fn path_for_name(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.{LAYOUT_EXTENSION}", sanitize_filename(name)))
    }
}

fn is_layout_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(LAYOUT_EXTENSION))
}

/// Sanitizes a layout name for use as a filename.
///
/// Replaces problematic characters with underscores and converts to lowercase.
///
/// ```
/// # use zoneforge::services::layouts::sanitize_filename;
/// assert_eq!(sanitize_filename("Front Counter"), "front_counter");
/// assert_eq!(sanitize_filename("Bar/Patio:Late"), "bar_patio_late");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    name.replace(['/', '\\', ':', ' '], "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Position, ZoneInstance, ZoneStore};
    use tempfile::TempDir;

    fn sample_layout() -> ScreenLayout {
        let mut layout = ScreenLayout::new("Front Counter", ScreenType::Pos)
            .unwrap()
            .with_theme("express");
        layout.replace_zones(ZoneStore::from_zones(vec![
            ZoneInstance::new("grid", "ItemGrid", Position::Center, 0),
            ZoneInstance::new("send", "SendButton", Position::Bottom, 0).with_variant("bar"),
        ]));
        layout
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("My Layout"), "my_layout");
        assert_eq!(sanitize_filename("Layout\\Name"), "layout_name");
        assert_eq!(
            sanitize_filename("Complex/Layout\\Name:Test 123"),
            "complex_layout_name_test_123"
        );
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("front.json");
        let layout = sample_layout();

        LayoutService::save(&layout, &path)?;
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = LayoutService::load(&path)?;
        assert_eq!(loaded, layout);
        Ok(())
    }

    #[test]
    fn test_load_keeps_unknown_components() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("odd.json");
        let mut layout = sample_layout();
        layout.replace_zones(ZoneStore::from_zones(vec![ZoneInstance::new(
            "juke",
            "Jukebox",
            Position::Left,
            0,
        )]));
        LayoutService::save(&layout, &path)?;

        let loaded = LayoutService::load(&path)?;
        assert_eq!(loaded.zones.get("juke").unwrap().component, "Jukebox");
        Ok(())
    }

    #[test]
    fn test_load_rejects_malformed_json() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json")?;

        let err = LayoutService::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse layout file"));
        Ok(())
    }

    #[test]
    fn test_list_skips_other_files() -> Result<()> {
        let temp_dir = TempDir::new()?;
        LayoutService::save(&sample_layout(), &temp_dir.path().join("b.json"))?;
        LayoutService::save(&sample_layout(), &temp_dir.path().join("a.json"))?;
        fs::write(temp_dir.path().join("notes.txt"), "hello")?;
        fs::write(temp_dir.path().join("broken.json"), "[]")?;

        let summaries = LayoutService::list(temp_dir.path())?;
        let names: Vec<&str> = summaries.iter().map(|s| s.filename.as_str()).collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
        assert_eq!(summaries[0].zone_count, 2);
        assert_eq!(summaries[0].theme.as_deref(), Some("express"));
        Ok(())
    }

    #[test]
    fn test_list_missing_dir() -> Result<()> {
        let temp_dir = TempDir::new()?;
        assert!(LayoutService::list(&temp_dir.path().join("nope"))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_path_for_name() {
        assert_eq!(
            LayoutService::path_for_name(Path::new("/srv/layouts"), "Bar Terminal"),
            PathBuf::from("/srv/layouts/bar_terminal.json")
        );
    }
}
