use crate::models::Settings;
use camino::Utf8Path;
use std::process::Command;
use thiserror::Error;

/// Which build tool to use for a mod.
///
/// The explicit `--build`/`:b` sentinel without a name means "use the first
/// configured tool whose presence marker exists in the mod folder".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildSelector {
    Auto,
    Named(String),
}

impl BuildSelector {
    /// Parse a CLI/mark tool selector; empty or `auto` means auto-detect.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw.eq_ignore_ascii_case("auto") {
            BuildSelector::Auto
        } else {
            BuildSelector::Named(raw.to_string())
        }
    }

    fn matches(&self, tool_name: &str) -> bool {
        match self {
            BuildSelector::Auto => true,
            BuildSelector::Named(name) => name.eq_ignore_ascii_case(tool_name),
        }
    }
}

/// Errors from dispatching a build tool for one mod.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Build error ({tool})")]
    Failed { tool: String },

    #[error("No build tool found")]
    NoToolDetected,

    #[error("Specified build tool not found: {0}")]
    ToolNotFound(String),

    #[error("Failed to run build tool ({tool}): {source}")]
    Spawn {
        tool: String,
        source: std::io::Error,
    },
}

/// Substitute the launch type into a tool command.
///
/// HEMTT stages its output per subcommand, so a non-empty launch type
/// replaces the subcommand argument (`hemtt build` -> `hemtt release`).
/// Other tools run unchanged.
pub fn effective_command(command: &[String], launch_type: &str) -> Vec<String> {
    let mut cmd = command.to_vec();
    if !launch_type.is_empty() && cmd.first().is_some_and(|p| p.as_str() == "hemtt") && cmd.len() > 1 {
        cmd[1] = launch_type.to_string();
    }
    cmd
}

/// Run the selected build tool for a mod, blocking until it exits.
///
/// Tools are tried in their configured order; the first one whose name
/// matches the selector and whose presence marker exists under `mod_path`
/// runs with `mod_path` as working directory. A dry run reports the tool
/// without executing anything.
pub fn build_mod(
    settings: &Settings,
    mod_path: &Utf8Path,
    selector: &BuildSelector,
    launch_type: &str,
    dry: bool,
) -> Result<(), BuildError> {
    for (name, tool) in &settings.build {
        if !selector.matches(name) || !mod_path.join(&tool.presence).exists() {
            continue;
        }

        let cmd = effective_command(&tool.command, launch_type);
        let Some((program, args)) = cmd.split_first() else {
            continue;
        };

        println!("=> Building [{name}] ...");
        tracing::debug!("Build command: {:?} (cwd: {})", cmd, mod_path);

        if dry {
            println!();
            return Ok(());
        }

        let status = Command::new(program)
            .args(args)
            .current_dir(mod_path)
            .status()
            .map_err(|source| BuildError::Spawn {
                tool: name.clone(),
                source,
            })?;

        if !status.success() {
            return Err(BuildError::Failed { tool: name.clone() });
        }

        println!();
        return Ok(());
    }

    match selector {
        BuildSelector::Auto => Err(BuildError::NoToolDetected),
        BuildSelector::Named(name) => Err(BuildError::ToolNotFound(name.clone())),
    }
}
