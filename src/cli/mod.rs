//! CLI command handlers for ZoneForge.
//!
//! This module provides headless, scriptable access to the component catalog,
//! zone placement and layout validation for automation, testing, and CI/CD
//! integration.

pub mod common;
pub mod components;
pub mod config;
pub mod new;
pub mod validate;
pub mod zone;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use components::{ComponentArgs, ComponentsArgs};
pub use config::ConfigArgs;
pub use new::NewArgs;
pub use validate::ValidateArgs;
pub use zone::ZoneArgs;
