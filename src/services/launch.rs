//! Process spawning and the best-effort report-log opener.

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::process::Command;
use std::thread;
use std::time::Duration;

/// Spawn the game detached: no wait, no output capture, no supervision.
///
/// A dry run only logs the would-be command line.
pub fn run_game(exe: &Utf8Path, params: &[String], dry: bool) -> Result<()> {
    tracing::debug!("Process command: {} {:?}", exe, params);

    println!("Running ...");
    if !dry {
        Command::new(exe.as_std_path())
            .args(params)
            .spawn()
            .with_context(|| format!("Failed to launch game: {exe}"))?;
    }

    Ok(())
}

/// Open the most recently created report log after a delay, on a detached
/// thread.
///
/// Best effort with unobserved failure: the main flow never joins this
/// thread, and a missing log directory or empty log list only leaves a
/// debug trace.
pub fn open_last_report(delay_secs: u64, dry: bool) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        if !cfg!(windows) {
            println!("Warning! Opening last log only implemented for Windows.");
            return;
        }

        println!("Opening last log in {delay_secs}s ...");
        if !dry {
            thread::sleep(Duration::from_secs(delay_secs));
        }

        match find_last_report() {
            Some(report) => {
                tracing::debug!("Last report: {}", report);
                if !dry {
                    // `start` detaches the viewer from this short-lived thread.
                    let result = Command::new("cmd")
                        .args(["/C", "start", "", report.as_str()])
                        .spawn();
                    if let Err(e) = result {
                        tracing::debug!("Could not open report log: {}", e);
                    }
                }
            }
            None => tracing::debug!("No report logs found"),
        }
    })
}

/// Newest `.rpt` file in the game's report directory, by creation time.
fn find_last_report() -> Option<camino::Utf8PathBuf> {
    let home = directories::BaseDirs::new()?;
    let rpt_dir = home
        .home_dir()
        .join("AppData")
        .join("Local")
        .join("Arma 3");

    let mut newest: Option<(std::time::SystemTime, camino::Utf8PathBuf)> = None;
    for entry in std::fs::read_dir(&rpt_dir).ok()?.flatten() {
        let Ok(path) = camino::Utf8PathBuf::from_path_buf(entry.path()) else {
            continue;
        };
        if path.extension() != Some("rpt") {
            continue;
        }
        let Ok(created) = entry.metadata().and_then(|m| m.created()) else {
            continue;
        };
        if newest.as_ref().is_none_or(|(time, _)| created > *time) {
            newest = Some((created, path));
        }
    }

    newest.map(|(_, path)| path)
}
