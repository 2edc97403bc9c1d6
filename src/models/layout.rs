//! Screen layout and metadata data structures.

use crate::models::screen::ScreenType;
use crate::models::zone::ZoneStore;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Current layout file schema version.
pub const LAYOUT_VERSION: &str = "1.0";

/// Layout file metadata.
///
/// # Validation
///
/// - name must be non-empty, max 100 characters
/// - created must be <= modified
/// - theme, if set, must be kebab-case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    /// Layout name (e.g., "Main Bar Terminal")
    pub name: String,
    /// Long description
    #[serde(default)]
    pub description: String,
    /// Screen the layout is assembled for
    pub screen: ScreenType,
    /// Theme identifier (e.g., "express" for counter service)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Creation timestamp (ISO 8601)
    pub created: DateTime<Utc>,
    /// Last modification timestamp (ISO 8601)
    pub modified: DateTime<Utc>,
    /// Schema version (e.g., "1.0")
    pub version: String,
}

impl LayoutMetadata {
    /// Creates new metadata with default values.
    pub fn new(name: impl Into<String>, screen: ScreenType) -> Result<Self> {
        let name = name.into();
        Self::validate_name(&name)?;

        let now = Utc::now();
        Ok(Self {
            name,
            description: String::new(),
            screen,
            theme: None,
            created: now,
            modified: now,
            version: LAYOUT_VERSION.to_string(),
        })
    }

    /// Validates metadata name.
    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() {
            anyhow::bail!("Layout name cannot be empty");
        }

        if name.len() > 100 {
            anyhow::bail!(
                "Layout name '{}' exceeds maximum length of 100 characters (got {})",
                name,
                name.len()
            );
        }

        Ok(())
    }

    /// Validates a theme identifier (kebab-case).
    pub fn validate_theme(theme: &str) -> Result<()> {
        if theme.is_empty()
            || theme.starts_with('-')
            || theme.ends_with('-')
            || !theme
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            anyhow::bail!("Theme '{theme}' must be kebab-case (lowercase, hyphens, and digits only)");
        }
        Ok(())
    }

    /// Updates the modification timestamp to now.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

/// A screen layout: metadata plus the placed zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenLayout {
    /// File metadata
    pub metadata: LayoutMetadata,
    /// Placed zones
    #[serde(default)]
    pub zones: ZoneStore,
}

impl ScreenLayout {
    /// Creates an empty layout.
    pub fn new(name: impl Into<String>, screen: ScreenType) -> Result<Self> {
        Ok(Self {
            metadata: LayoutMetadata::new(name, screen)?,
            zones: ZoneStore::new(),
        })
    }

    /// Sets the theme.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.metadata.theme = Some(theme.into());
        self
    }

    /// Theme identifier, if any.
    #[must_use]
    pub fn theme(&self) -> Option<&str> {
        self.metadata.theme.as_deref()
    }

    /// Replaces the zones and bumps the modification time.
    pub fn replace_zones(&mut self, zones: ZoneStore) {
        self.zones = zones;
        self.metadata.touch();
    }

    /// Validates the file-level structure of the layout.
    ///
    /// This is an integrity check for persistence only; layout quality
    /// (missing or conflicting components) is reported by the validation engine.
    pub fn validate(&self) -> Result<()> {
        LayoutMetadata::validate_name(&self.metadata.name)?;

        if self.metadata.created > self.metadata.modified {
            anyhow::bail!("Layout creation time is after its modification time");
        }

        if let Some(theme) = &self.metadata.theme {
            LayoutMetadata::validate_theme(theme)?;
        }

        let mut seen = HashSet::new();
        for zone in &self.zones {
            if zone.id.is_empty() {
                anyhow::bail!("Zone ID cannot be empty");
            }
            if !seen.insert(zone.id.as_str()) {
                anyhow::bail!("Duplicate zone ID '{}'", zone.id);
            }
        }

        Ok(())
    }
}
