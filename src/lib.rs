// ArmaQDL - Quick development Arma 3 launcher
//
// This is the library crate containing the resolution and launch logic.
// The binary crate (main.rs) provides the CLI entry point.

pub mod cli;
pub mod logging;
pub mod models;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use models::Settings;
pub use settings::SettingsStore;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
