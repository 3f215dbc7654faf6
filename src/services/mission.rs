//! Mission token resolution and server-side mission staging.
//!
//! A client mission token is either a path (contains a separator), or a
//! mission name looked up under the active profile's `missions`/`mpmissions`
//! folders. A `profile:name` prefix overrides the active profile. The game
//! percent-encodes profile directory names on disk ("Dev Profile" becomes
//! "Dev%20Profile"), so the lookup does the same.
//!
//! Server missions are not passed on the command line: the mission folder is
//! copied into the server's flat `MPMissions` root and the `template` field
//! of `server.cfg` is rewritten to point at it.

use crate::models::Settings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use directories::UserDirs;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use std::fs;
use thiserror::Error;
use walkdir::WalkDir;

/// Mission file name inside a mission folder.
const MISSION_FILE: &str = "mission.sqm";

/// Characters kept verbatim in profile directory names (the game encodes
/// everything else, matching URL unreserved characters).
const PROFILE_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Error, Debug)]
pub enum MissionError {
    #[error("Mission not found! [{0}]")]
    NotFound(Utf8PathBuf),

    #[error("Could not determine the user's documents directory")]
    NoDocumentsDir,
}

/// Resolve a client mission token to a `mission.sqm` path.
///
/// Empty token means no mission. Returns the path to pass on the game's
/// command line, or `MissionError` when neither the `missions` nor the
/// `mpmissions` candidate exists.
pub fn resolve_mission(
    settings: &Settings,
    mission: &str,
    profile: &str,
) -> Result<Option<Utf8PathBuf>, MissionError> {
    // No mission requested: the profiles root is never consulted.
    if mission.is_empty() {
        return Ok(None);
    }

    let profiles_root = profiles_dir().ok_or(MissionError::NoDocumentsDir)?;
    resolve_mission_in(&profiles_root, settings, mission, profile)
}

/// [`resolve_mission`] against an explicit profiles root, for tests.
pub fn resolve_mission_in(
    profiles_root: &Utf8Path,
    settings: &Settings,
    mission: &str,
    profile: &str,
) -> Result<Option<Utf8PathBuf>, MissionError> {
    if mission.is_empty() {
        return Ok(None);
    }

    let (profile_override, mission) = split_profile_prefix(mission);
    let profile = profile_override.unwrap_or(if profile.is_empty() {
        settings.profile.as_str()
    } else {
        profile
    });

    let path = if mission.contains('/') || mission.contains('\\') {
        // Explicit mission path, with or without the mission.sqm leaf.
        let path = Utf8PathBuf::from(mission);
        if path.file_name() == Some(MISSION_FILE) {
            path
        } else {
            path.join(MISSION_FILE)
        }
    } else {
        let encoded = utf8_percent_encode(profile, PROFILE_ENCODE).to_string();
        let profile_dir = profiles_root.join(encoded);

        let primary = profile_dir
            .join("missions")
            .join(mission)
            .join(MISSION_FILE);
        if primary.exists() {
            primary
        } else {
            profile_dir
                .join("mpmissions")
                .join(mission)
                .join(MISSION_FILE)
        }
    };

    if !path.exists() {
        return Err(MissionError::NotFound(path));
    }

    println!("Mission: [{path}]");
    Ok(Some(path))
}

/// Split a `profile:name` prefix off a mission token.
///
/// Only a prefix longer than one character and free of path separators is a
/// profile name; anything else (notably `C:\...` drive paths) is part of
/// the mission path.
fn split_profile_prefix(mission: &str) -> (Option<&str>, &str) {
    if let Some((prefix, rest)) = mission.split_once(':') {
        if prefix.len() > 1 && !prefix.contains('/') && !prefix.contains('\\') {
            return (Some(prefix), rest);
        }
    }
    (None, mission)
}

/// Per-user profile directory the game stores missions under.
fn profiles_dir() -> Option<Utf8PathBuf> {
    let dirs = UserDirs::new()?;
    let documents = dirs.document_dir()?;
    let root = Utf8PathBuf::from_path_buf(documents.to_path_buf()).ok()?;
    Some(root.join("Arma 3 - Other Profiles"))
}

/// Stage a resolved mission into the server's `MPMissions` root and point
/// `server.cfg` at it.
///
/// The server loads its mission from config, so this yields no command-line
/// argument. A missing `server.cfg` is reported but non-fatal.
pub fn stage_mission_server(
    install_dir: &Utf8Path,
    mission: &Utf8Path,
    dry: bool,
) -> Result<()> {
    // Server missions live in a flat MPMissions root; drop the file leaf.
    let mission_dir = if mission.file_name() == Some(MISSION_FILE) {
        mission.parent().unwrap_or(mission)
    } else {
        mission
    };

    let Some(name) = mission_dir.file_name() else {
        anyhow::bail!("Mission path has no directory name: {mission_dir}");
    };

    let target = install_dir.join("MPMissions").join(name);
    println!("Copying mission to server ... [{target}]\n");

    if !dry {
        if target.exists() {
            fs::remove_dir_all(&target)
                .with_context(|| format!("Failed to remove staged mission: {target}"))?;
        }
        copy_tree(mission_dir, &target)?;
    }

    let cfg_path = install_dir.join("server.cfg");
    if cfg_path.exists() {
        if !dry {
            rewrite_mission_template(&cfg_path, name)?;
        }
    } else {
        eprintln!("Error! server.cfg not found! [{cfg_path}]");
    }

    Ok(())
}

/// Rewrite the `template = "...";` field of a server config to a new
/// mission name, leaving every other byte untouched. Only the first match
/// is rewritten.
pub fn rewrite_mission_template(cfg_path: &Utf8Path, mission_name: &str) -> Result<()> {
    let cfg = fs::read_to_string(cfg_path)
        .with_context(|| format!("Failed to read server config: {cfg_path}"))?;

    let pattern = Regex::new(r#"(template = ").+(";)"#).expect("Invalid template regex");
    let replaced = pattern.replace(&cfg, |caps: &regex::Captures| {
        format!("{}{}{}", &caps[1], mission_name, &caps[2])
    });

    fs::write(cfg_path, replaced.as_bytes())
        .with_context(|| format!("Failed to write server config: {cfg_path}"))?;

    tracing::debug!("Set mission template to '{}' in {}", mission_name, cfg_path);
    Ok(())
}

/// Copy a directory tree, creating the destination.
fn copy_tree(src: &Utf8Path, dst: &Utf8Path) -> Result<()> {
    for entry in WalkDir::new(src.as_std_path()) {
        let entry = entry.with_context(|| format!("Failed to walk mission tree: {src}"))?;
        let relative = entry
            .path()
            .strip_prefix(src.as_std_path())
            .expect("walkdir yields children of its root");
        let target = dst.as_std_path().join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        }
    }
    Ok(())
}
