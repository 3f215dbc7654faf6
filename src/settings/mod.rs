use crate::models::Settings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use std::fs;

/// Bundled default settings, written on first run.
const DEFAULT_SETTINGS: &str = include_str!("../../config/settings.toml");

/// Name of the settings file inside the config directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Settings store for loading and generating the TOML settings file.
///
/// The file lives at a per-user config directory (`ProjectDirs`), or at an
/// explicit directory given via `--config`.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    config_dir: Utf8PathBuf,
}

impl SettingsStore {
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Self {
        Self {
            config_dir: config_dir.as_ref().to_path_buf(),
        }
    }

    /// Per-user default config directory (e.g. `%APPDATA%\ArmaQDL` on
    /// Windows, `~/.config/armaqdl` on Linux).
    pub fn default_dir() -> Result<Utf8PathBuf> {
        let dirs = ProjectDirs::from("", "", "ArmaQDL")
            .context("Could not determine user config directory")?;
        Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf())
            .map_err(|p| anyhow::anyhow!("Config directory is not valid UTF-8: {}", p.display()))
    }

    /// Ensure a settings file exists, writing the bundled default if the
    /// file is absent or empty. Idempotent, called every run.
    pub fn generate(&self) -> Result<()> {
        fs::create_dir_all(&self.config_dir)
            .with_context(|| format!("Failed to create config directory: {}", self.config_dir))?;

        let path = self.settings_path();
        let missing = match fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        if missing {
            fs::write(&path, DEFAULT_SETTINGS)
                .with_context(|| format!("Failed to write settings file: {}", path))?;
            println!("Generated new settings file.\n");
            tracing::info!("Generated default settings at {}", path);
        }

        Ok(())
    }

    /// Parse the settings file. Unreadable or malformed TOML is an error;
    /// the caller reports it and aborts before any filesystem action.
    pub fn load(&self) -> Result<Settings> {
        let path = self.settings_path();
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Invalid settings format: {}", path))?;

        tracing::debug!("Loaded settings from {}", path);
        Ok(settings)
    }

    pub fn settings_path(&self) -> Utf8PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

/// Check structural completeness of loaded settings.
///
/// Reports every violation found before returning, not just the first, so
/// the user can fix the file in one pass.
pub fn validate(settings: &Settings) -> bool {
    let mut ok = true;

    for (name, location) in &settings.locations {
        if location.path.is_empty() {
            eprintln!("Error! No 'path' defined for location '{name}'.");
            ok = false;
        }
    }

    for (name, tool) in &settings.build {
        if tool.presence.is_empty() {
            eprintln!("Error! No 'presence' defined for build tool '{name}'.");
            ok = false;
        }
        if tool.command.is_empty() {
            eprintln!("Error! No 'command' defined for build tool '{name}'.");
            ok = false;
        }
    }

    if settings.server.is_none() {
        eprintln!("Error! No '[server]' defined.");
        ok = false;
    }

    ok
}
