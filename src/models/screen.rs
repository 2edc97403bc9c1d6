//! Screen types, screen regions and component categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of screen a layout is assembled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScreenType {
    /// Point-of-sale terminal
    #[default]
    Pos,
    /// Kitchen display
    Kds,
}

impl ScreenType {
    /// All screen types in catalog order.
    pub const ALL: [Self; 2] = [Self::Pos, Self::Kds];

    /// Wire name ("pos" or "kds").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pos => "pos",
            Self::Kds => "kds",
        }
    }
}

impl fmt::Display for ScreenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pos" => Ok(Self::Pos),
            "kds" => Ok(Self::Kds),
            other => anyhow::bail!("Unknown screen type '{other}'. Must be 'pos' or 'kds'"),
        }
    }
}

/// One of the five screen regions a zone can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Full-width strip along the top edge
    Top,
    /// Left column
    Left,
    /// Main center area
    Center,
    /// Right column
    Right,
    /// Full-width strip along the bottom edge
    Bottom,
}

impl Position {
    /// All positions in canvas order (top to bottom, left to right).
    pub const ALL: [Self; 5] = [
        Self::Top,
        Self::Left,
        Self::Center,
        Self::Right,
        Self::Bottom,
    ];

    /// Wire name of the position.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown position '{s}'. Must be one of: top, left, center, right, bottom"
                )
            })
    }
}

/// Palette grouping of a component definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    /// Structural zones (bars, grids, panels)
    Layout,
    /// Buttons that trigger an action
    Action,
    /// Read-only information displays
    Display,
    /// Modal prompts
    Dialog,
}

impl ComponentCategory {
    /// All categories in palette order.
    pub const ALL: [Self; 4] = [Self::Layout, Self::Action, Self::Display, Self::Dialog];

    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Action => "action",
            Self::Display => "display",
            Self::Dialog => "dialog",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown category '{s}'. Must be one of: layout, action, display, dialog"
                )
            })
    }
}
