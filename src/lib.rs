//! ZoneForge Library
//!
//! Core of a screen layout editor for point-of-sale (POS) and kitchen display
//! (KDS) terminals: a static catalog of zone components, a placement engine
//! that arranges zone instances into screen regions, and a validation engine
//! that reports whether an assembled layout is usable.

// Module declarations
pub mod branding;
pub mod cli;
pub mod config;
pub mod models;
pub mod placement;
pub mod registry;
pub mod services;
pub mod validation;
#[cfg(feature = "web")]
pub mod web;
