//! Service layer for business logic.
//!
//! This module contains services that coordinate file system access with the
//! in-memory layout model.

pub mod layouts;

// Re-export commonly used types and functions
pub use layouts::{LayoutService, LayoutSummary};
