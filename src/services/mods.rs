//! Mod token parsing and location resolution.
//!
//! A mod token has the shape `location:mod[:mark[:mark...]]`. The location
//! names a base directory from the settings; a token whose first segment is
//! no known location is read as a raw filesystem path (Windows drive paths
//! like `C:\mods\@x` fall out of this rule naturally). Marks modify one
//! token: `s`/`skip` excludes it from wildcard expansion, `b[tool]` forces a
//! build, `t[type]` overrides the HEMTT output folder.
//!
//! Resolution is all-or-nothing: every literal, non-skip token must resolve
//! to an existing path or the whole launch aborts, but all failures are
//! collected and reported together so the user can fix them in one pass.

use crate::models::Settings;
use crate::services::build::{BuildSelector, build_mod};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// HEMTT staging directory inside a mod folder.
const HEMTT_OUT: &str = ".hemttout";

/// Valid HEMTT output folder names (empty selects the mod folder itself).
const LAUNCH_TYPES: [&str; 4] = ["", "dev", "build", "release"];

/// A parsed mod token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModToken {
    /// Raw filesystem path, pseudo-location `abs`.
    Absolute { path: String, marks: Vec<String> },

    /// Path under a named location from the settings.
    Located {
        location: String,
        path: String,
        marks: Vec<String>,
    },
}

impl ModToken {
    /// Parse a CLI token against the set of known location names.
    ///
    /// An unknown first segment re-joins with the second into a raw path, so
    /// `C:\mods\@x:b` keeps its drive colon and its build mark.
    pub fn parse(token: &str, is_location: impl Fn(&str) -> bool) -> ModToken {
        let segments: Vec<&str> = token.split(':').collect();

        if segments.len() == 1 {
            return ModToken::Absolute {
                path: token.to_string(),
                marks: Vec::new(),
            };
        }

        let marks: Vec<String> = segments[2..].iter().map(|m| m.to_lowercase()).collect();

        if is_location(segments[0]) {
            ModToken::Located {
                location: segments[0].to_string(),
                path: segments[1].to_string(),
                marks,
            }
        } else {
            ModToken::Absolute {
                path: format!("{}:{}", segments[0], segments[1]),
                marks,
            }
        }
    }

    fn marks(&self) -> &[String] {
        match self {
            ModToken::Absolute { marks, .. } => marks,
            ModToken::Located { marks, .. } => marks,
        }
    }

    fn mod_path(&self) -> &str {
        match self {
            ModToken::Absolute { path, .. } => path,
            ModToken::Located { path, .. } => path,
        }
    }
}

/// Whether a mark list contains the skip mark.
fn has_skip_mark(marks: &[String]) -> bool {
    marks.iter().any(|m| m == "s" || m == "skip")
}

/// The value of the first mark with the given identifier letter, if any.
fn mark_value<'a>(marks: &'a [String], identifier: char) -> Option<&'a str> {
    marks
        .iter()
        .find(|m| m.starts_with(identifier))
        .map(|m| &m[identifier.len_utf8()..])
}

/// Resolve an ordered list of mod tokens into the game's `-mod=` argument.
///
/// Wildcard tokens expand to every direct child directory of their parent
/// and are re-queued as fresh tokens; skip-marked paths are remembered and
/// dropped again when a wildcard rediscovers them. An explicit `b` mark
/// always builds; the global `build` selector applies only to raw paths and
/// locations flagged `build = true`.
///
/// Returns the joined argument (empty for `none`/no tokens), or the full
/// list of failure messages when any literal token does not resolve.
pub fn process_mods(
    settings: &Settings,
    mods: &[String],
    build: Option<&BuildSelector>,
    dry: bool,
) -> Result<String, Vec<String>> {
    if mods.is_empty() || mods.iter().any(|m| m == "none") {
        return Ok(String::new());
    }

    tracing::debug!("Process mods: {:?}", mods);

    let mut queue: Vec<String> = mods.to_vec();
    let mut paths: Vec<Utf8PathBuf> = Vec::new();
    let mut skips: Vec<Utf8PathBuf> = Vec::new();
    let mut failures: Vec<String> = Vec::new();
    let mut ignored = 0usize;

    let mut index = 0;
    while index < queue.len() {
        let raw = queue[index].clone();
        index += 1;

        let token = ModToken::parse(&raw, |name| settings.locations.contains_key(name));

        let (location, base_path) = match &token {
            ModToken::Absolute { .. } => (None, Utf8PathBuf::new()),
            ModToken::Located { location, .. } => (
                Some(location.as_str()),
                Utf8PathBuf::from(settings.location_path(location).unwrap_or_default()),
            ),
        };

        let candidate = base_path.join(token.mod_path());

        // Wildcard tokens expand to their parent's child directories and
        // never count as failures themselves.
        if token.mod_path().contains('*') {
            queue.extend(expand_wildcard(&candidate, location, &base_path));
            ignored += 1;
            continue;
        }

        if !candidate.exists() {
            failures.push(format!("Invalid mod path: {candidate}  [{raw}]"));
            continue;
        }

        let marks = token.marks();

        if has_skip_mark(marks) {
            tracing::debug!("{} [{}] => skip in wildcards", raw, candidate);
            skips.push(candidate);
            ignored += 1;
            continue;
        }

        if skips.contains(&candidate) {
            println!("(skip) {raw}  [{candidate}]");
            ignored += 1;
            continue;
        }

        // HEMTT launch type: location default when staging exists, explicit
        // t-mark always wins. Empty means the mod folder itself.
        let mut launch_type = String::new();
        if candidate.join(HEMTT_OUT).exists() {
            launch_type = location
                .and_then(|name| settings.locations[name].launch_type.clone())
                .unwrap_or_else(|| "dev".to_string());
        }

        if let Some(value) = mark_value(marks, 't') {
            if !LAUNCH_TYPES.contains(&value) {
                failures.push(format!("Invalid launch type: {value} (HEMTT)  [{raw}]"));
                continue;
            }
            launch_type = value.to_string();
        }

        let path = if launch_type.is_empty() {
            candidate.clone()
        } else {
            candidate.join(HEMTT_OUT).join(&launch_type)
        };

        // Per-token build mark beats the global selector; the global one
        // only covers raw paths and build-eligible locations.
        let selector = match mark_value(marks, 'b') {
            Some(value) => Some(BuildSelector::parse(value)),
            None => build
                .filter(|_| {
                    location.is_none_or(|name| settings.locations[name].build)
                })
                .cloned(),
        };

        println!("{raw}  [{path}]");

        if let Some(selector) = &selector {
            if let Err(e) = build_mod(settings, &candidate, selector, &launch_type, dry) {
                failures.push(format!("{e}  [{raw}]"));
                continue;
            }
        }

        // HEMTT output only exists once a build ran, so re-check.
        if !path.exists() {
            failures.push(format!("Invalid mod path: {path}  [{raw}]"));
            continue;
        }

        paths.push(path);
    }

    tracing::debug!(
        "Paths: {} processed vs. {} input ({} tokens - {} ignored)",
        paths.len(),
        queue.len() - ignored,
        queue.len(),
        ignored
    );

    if !failures.is_empty() {
        return Err(failures);
    }

    println!("Total mods: {}\n", paths.len());

    let joined: Vec<&str> = paths.iter().map(|p| p.as_str()).collect();
    Ok(format!("-mod={}", joined.join(";")))
}

/// Expand a wildcard candidate into tokens for every direct child directory
/// of its parent. Expansion children carry no marks.
fn expand_wildcard(
    candidate: &Utf8Path,
    location: Option<&str>,
    base_path: &Utf8Path,
) -> Vec<String> {
    let Some(parent) = candidate.parent() else {
        return Vec::new();
    };

    let Ok(entries) = fs::read_dir(parent.as_std_path()) else {
        tracing::debug!("Wildcard parent not readable: {}", parent);
        return Vec::new();
    };

    let mut expanded = Vec::new();
    for entry in entries.flatten() {
        if !entry.path().is_dir() {
            continue;
        }
        let Ok(child) = Utf8PathBuf::from_path_buf(entry.path()) else {
            continue;
        };
        // Hidden directories like .hemttout or .git are never mods.
        if child.file_name().is_some_and(|name| name.starts_with('.')) {
            continue;
        }

        let token = match location {
            Some(name) => match child.strip_prefix(base_path) {
                Ok(relative) => format!("{name}:{relative}"),
                Err(_) => child.to_string(),
            },
            None => child.to_string(),
        };
        expanded.push(token);
    }

    expanded.sort();
    expanded
}
