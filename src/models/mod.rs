//! Data models for components, zones, layouts and diagnostics.
//!
//! This module contains all the core data structures used throughout the crate.
//! Models are independent of the registry, placement and validation logic.

pub mod component;
pub mod diagnostic;
pub mod layout;
pub mod screen;
pub mod zone;
pub mod zone_config;

// Re-export all model types
pub use component::{ComponentDefinition, Variant};
pub use diagnostic::{Diagnostic, DiagnosticSummary, Severity};
pub use layout::{LayoutMetadata, ScreenLayout, LAYOUT_VERSION};
pub use screen::{ComponentCategory, Position, ScreenType};
pub use zone::{ZoneInstance, ZoneStore};
pub use zone_config::{ConfigField, ConfigValue, FieldType, ZoneConfig};
