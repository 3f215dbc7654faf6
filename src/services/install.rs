//! Game installation discovery.
//!
//! The resolution core never touches the registry directly: it goes through
//! the [`InstallFinder`] capability so everything else stays free of
//! platform conditionals. The Windows implementation reads the install
//! directory the game setup writes to the registry; other platforms return
//! an empty path as a testing stub (launching itself is Windows-only).

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Name of the 64-bit game executable inside the install directory.
const GAME_EXECUTABLE: &str = "arma3_x64.exe";

#[cfg(windows)]
const REGISTRY_KEY: &str = r"SOFTWARE\WOW6432Node\Bohemia Interactive\Arma 3";

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Could not find Arma path in registry: {0}")]
    NotFound(String),

    #[error("Game executable missing: {0}")]
    ExecutableMissing(Utf8PathBuf),
}

/// Capability for locating the game installation directory.
pub trait InstallFinder {
    fn locate(&self) -> Result<Utf8PathBuf, InstallError>;
}

/// Locates the install directory via the Windows registry.
#[derive(Debug, Default)]
pub struct RegistryInstallFinder;

#[cfg(windows)]
impl InstallFinder for RegistryInstallFinder {
    fn locate(&self) -> Result<Utf8PathBuf, InstallError> {
        use winreg::RegKey;
        use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ};

        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        let key = hklm
            .open_subkey_with_flags(REGISTRY_KEY, KEY_READ)
            .map_err(|e| InstallError::NotFound(e.to_string()))?;
        let path: String = key
            .get_value("main")
            .map_err(|e| InstallError::NotFound(e.to_string()))?;

        tracing::debug!("Registry install path: {}", path);
        Ok(Utf8PathBuf::from(path))
    }
}

#[cfg(not(windows))]
impl InstallFinder for RegistryInstallFinder {
    // Off-Windows stub for dry runs and tests; the launch step itself
    // warns and does nothing on these platforms.
    fn locate(&self) -> Result<Utf8PathBuf, InstallError> {
        Ok(Utf8PathBuf::new())
    }
}

/// Resolve the game executable under an install directory.
///
/// An empty install directory (the non-Windows stub) passes through
/// unchecked so dry runs work everywhere.
pub fn game_executable(install_dir: &Utf8Path) -> Result<Utf8PathBuf, InstallError> {
    if install_dir.as_str().is_empty() {
        return Ok(Utf8PathBuf::new());
    }

    let exe = install_dir.join(GAME_EXECUTABLE);
    if !exe.exists() {
        return Err(InstallError::ExecutableMissing(exe));
    }
    Ok(exe)
}
