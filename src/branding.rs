//! Branding and application identity configuration.
//!
//! This module centralizes the names and paths that identify the application,
//! so the binaries, config layout and help text stay in agreement.

/// The human-readable display name of the application.
pub const APP_DISPLAY_NAME: &str = "ZoneForge";

/// The binary/executable name (lowercase, no spaces).
pub const APP_BINARY_NAME: &str = "zoneforge";

/// The directory name for application data (config, layouts).
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "ZoneForge";

/// Short description shown in `--help` output.
pub const APP_DESCRIPTION: &str = "Screen layout editor core for POS and KDS terminals";
