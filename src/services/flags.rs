//! Launch flag assembly.
//!
//! Pure functions of the parsed CLI options and the loaded settings; the
//! returned list is handed to the process spawn and never mutated after.

use crate::cli::Cli;
use crate::models::{ServerSettings, Settings};

/// Assemble the client (or headless client) flag list.
///
/// Headless clients always want to connect, so an absent `--join-server`
/// behaves like the bare flag and pulls the `[server]` defaults.
pub fn process_flags(cli: &Cli, settings: &Settings) -> Vec<String> {
    let mut flags = vec![
        "-skipIntro".to_string(),
        "-noSplash".to_string(),
        "-hugePages".to_string(),
    ];

    let profile = if !cli.profile.is_empty() {
        cli.profile.clone()
    } else if cli.headless {
        settings.headless.profile.clone()
    } else {
        settings.profile.clone()
    };

    if cli.headless {
        flags.push("-client".to_string());
    }

    flags.push(format!("-name={profile}"));

    if !cli.no_filepatching {
        flags.push("-filePatching".to_string());
    }

    if !cli.no_errors {
        flags.push("-showScriptErrors".to_string());
    }

    if !cli.no_debug {
        flags.push("-debug".to_string());
    }

    if cli.no_pause {
        flags.push("-noPause".to_string());
    }

    if cli.check_signatures {
        flags.push("-checkSignatures".to_string());
    }

    if !cli.fullscreen {
        flags.push("-window".to_string());
    }

    let join_server = match &cli.join_server {
        Some(value) => Some(value.as_str()),
        None if cli.headless => Some(""),
        None => None,
    };

    if let Some(join) = join_server {
        if join.is_empty() {
            let defaults = ServerSettings::default();
            let server = settings.server.as_ref().unwrap_or(&defaults);
            flags.push(format!("-connect={}", server.ip));
            flags.push(format!("-port={}", server.port));
            flags.push(format!("-password={}", server.password));
        } else {
            match parse_join_server(join) {
                Some((ip, port, password)) => {
                    flags.push(format!("-connect={ip}"));
                    flags.push(format!("-port={port}"));
                    flags.push(format!("-password={password}"));
                }
                None => {
                    eprintln!("Error! Invalid server data! (expected 2 ':' separators)");
                }
            }
        }
    }

    flags
}

/// Assemble the dedicated server flag list.
pub fn process_flags_server(cli: &Cli, settings: &Settings) -> Vec<String> {
    let defaults = ServerSettings::default();
    let server = settings.server.as_ref().unwrap_or(&defaults);

    let mut flags = vec![
        "-server".to_string(),
        "-hugepages".to_string(),
        "-loadMissionToMemory".to_string(),
        "-config=server.cfg".to_string(),
        format!("-name={}", server.profile),
    ];

    if !cli.no_filepatching {
        flags.push("-filePatching".to_string());
    }

    if !cli.no_debug {
        flags.push("-debug".to_string());
    }

    if cli.check_signatures {
        flags.push("-checkSignatures".to_string());
    }

    flags
}

/// Split an explicit `ip:port:password` join argument; `None` when the
/// separator count is off (the launch still proceeds without connecting).
fn parse_join_server(value: &str) -> Option<(&str, &str, &str)> {
    let mut parts = value.split(':');
    let ip = parts.next()?;
    let port = parts.next()?;
    let password = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((ip, port, password))
}
