//! Services module - the resolution and launch pipeline.
//!
//! Each service is framework-agnostic plain logic with explicit parameters,
//! no hidden state, and no dependency on the CLI layer beyond the parsed
//! options struct:
//!
//! - [`mods`]: mod token parsing and location resolution (the `-mod=` list)
//! - [`build`]: build tool dispatch for mods that want a build
//! - [`mission`]: mission path resolution and server-side mission staging
//! - [`flags`]: client/server launch flag assembly
//! - [`install`]: game install discovery behind a capability trait
//! - [`launch`]: detached process spawn and the report-log opener

pub mod build;
pub mod flags;
pub mod install;
pub mod launch;
pub mod mission;
pub mod mods;

pub use build::{BuildError, BuildSelector, build_mod};
pub use flags::{process_flags, process_flags_server};
pub use install::{InstallError, InstallFinder, RegistryInstallFinder, game_executable};
pub use launch::{open_last_report, run_game};
pub use mission::{MissionError, resolve_mission, stage_mission_server};
pub use mods::{ModToken, process_mods};
