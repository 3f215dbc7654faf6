//! ArmaQDL - Quick development Arma 3 launcher
//!
//! Binary entry point. The flow mirrors the pipeline the library exposes:
//!
//! 1. Ensure a settings file exists (first-run generation)
//! 2. Parse CLI arguments and initialize logging
//! 3. Load and validate settings (exit 1 on failure)
//! 4. Locate the game installation (exit 2)
//! 5. Resolve mod tokens into the `-mod=` argument (exit 3)
//! 6. Resolve the mission, staging it server-side for `--server` (exit 4)
//! 7. Assemble flags, spawn the report-log opener, launch the game

use armaqdl::cli::Cli;
use armaqdl::services::{
    BuildSelector, InstallFinder, RegistryInstallFinder, game_executable, open_last_report,
    process_flags, process_flags_server, process_mods, resolve_mission, run_game,
    stage_mission_server,
};
use armaqdl::settings::{self, SettingsStore};
use armaqdl::{APP_NAME, VERSION, logging};
use clap::Parser;
use std::process::ExitCode;

/// Exit code for invalid or malformed settings.
const EXIT_SETTINGS: u8 = 1;
/// Exit code for a missing game installation.
const EXIT_INSTALL: u8 = 2;
/// Exit code for unresolvable mod tokens.
const EXIT_MODS: u8 = 3;
/// Exit code for an unresolvable mission.
const EXIT_MISSION: u8 = 4;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::setup_logging(cli.verbose) {
        eprintln!("Warning! {e}");
    }

    tracing::debug!("Starting {} v{}", APP_NAME, VERSION);

    if cli.dry {
        println!("Dry run - simulating only!\n");
    }

    // First-run generation always targets the default per-user directory;
    // --config only changes where settings are loaded from.
    match SettingsStore::default_dir() {
        Ok(default_dir) => {
            if let Err(e) = SettingsStore::new(&default_dir).generate() {
                eprintln!("Error! {e:#}");
                return ExitCode::from(EXIT_SETTINGS);
            }
        }
        Err(e) => eprintln!("Warning! {e:#}"),
    }

    let config_dir = match &cli.config {
        Some(dir) => dir.clone(),
        None => match SettingsStore::default_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error! {e:#}");
                return ExitCode::from(EXIT_SETTINGS);
            }
        },
    };

    let store = SettingsStore::new(&config_dir);
    let settings = match store.load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error! Invalid settings file!\n{e:#}");
            return ExitCode::from(EXIT_SETTINGS);
        }
    };

    if !settings::validate(&settings) {
        return ExitCode::from(EXIT_SETTINGS);
    }

    if cli.list {
        print_config_listing(&store, &settings);
        return ExitCode::SUCCESS;
    }

    if cli.mods.iter().any(|m| m == "none") {
        println!("Warning! Launching without any mods (vanilla!)");
    } else if cli.mods.is_empty() {
        println!("Empty mod paths - use 'none' to launch without any mods (vanilla).");
        return ExitCode::SUCCESS;
    }

    // Install path
    let install_dir = match RegistryInstallFinder.locate() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error! Invalid Arma path.\n{e}");
            return ExitCode::from(EXIT_INSTALL);
        }
    };
    let game_exe = match game_executable(&install_dir) {
        Ok(exe) => exe,
        Err(e) => {
            eprintln!("Error! Invalid Arma path.\n{e}");
            return ExitCode::from(EXIT_INSTALL);
        }
    };

    // Mods
    let build_selector = cli.build.as_deref().map(BuildSelector::parse);
    let param_mods = match process_mods(&settings, &cli.mods, build_selector.as_ref(), cli.dry) {
        Ok(arg) => arg,
        Err(failures) => {
            for failure in &failures {
                eprintln!("{failure}");
            }
            eprintln!("Error! Invalid mod(s).");
            return ExitCode::from(EXIT_MODS);
        }
    };

    // Mission
    let mut param_mission = match resolve_mission(&settings, &cli.mission, &cli.profile) {
        Ok(mission) => mission,
        Err(e) => {
            eprintln!("Error! {e}");
            return ExitCode::from(EXIT_MISSION);
        }
    };

    if cli.server {
        if let Some(mission) = param_mission.take() {
            if let Err(e) = stage_mission_server(&install_dir, &mission, cli.dry) {
                eprintln!("Error! {e:#}");
                return ExitCode::from(EXIT_MISSION);
            }
        }
    }

    // Flags
    let mut params = if cli.server {
        process_flags_server(&cli, &settings)
    } else {
        process_flags(&cli, &settings)
    };
    params.extend(cli.parameters.iter().cloned());
    println!("Flags: {params:?}\n");

    // Open log file
    if !cli.no_log {
        // Detached on purpose; the handle is never joined.
        let _ = open_last_report(settings.log.open_delay, cli.dry);
    }

    // Run
    if let Some(mission) = param_mission {
        params.push(mission.to_string());
    }
    if !param_mods.is_empty() {
        params.push(param_mods);
    }

    if cfg!(windows) {
        if let Err(e) = run_game(&game_exe, &params, cli.dry) {
            eprintln!("Error! {e:#}");
        }
    } else {
        println!("Warning! Launching Arma only implemented for Windows.");
    }

    ExitCode::SUCCESS
}

/// Print the active config directory, mod locations and build tools.
fn print_config_listing(store: &SettingsStore, settings: &armaqdl::Settings) {
    println!("Config location: {}\n", store.config_dir());

    println!("Mod Locations:");
    for (name, location) in &settings.locations {
        let build = if location.build { " (build)" } else { "" };
        println!("  {name} => {}{build}", location.path);
    }

    println!("\nBuild Tools:");
    for (name, tool) in &settings.build {
        println!("  {name} ({}) => {}", tool.presence, tool.command.join(" "));
    }
}
