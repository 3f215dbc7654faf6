//! Data models for the launcher.
//!
//! Everything here is a plain serde struct loaded from `settings.toml` at
//! startup. The settings are immutable for the process lifetime; resolution
//! and flag assembly take them by reference.

pub mod settings;

pub use settings::{BuildTool, HeadlessSettings, Location, LogSettings, ServerSettings, Settings};
