use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Settings loaded from `settings.toml`.
///
/// Loaded once at startup and passed by reference into every resolution and
/// assembly function; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Default profile name for client launches.
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Named base directories that mod tokens resolve against.
    #[serde(default)]
    pub locations: IndexMap<String, Location>,

    /// Build tools, tried in insertion order.
    #[serde(default)]
    pub build: IndexMap<String, BuildTool>,

    /// Server defaults; required by validation.
    #[serde(default)]
    pub server: Option<ServerSettings>,

    #[serde(default)]
    pub headless: HeadlessSettings,

    #[serde(default)]
    pub log: LogSettings,
}

/// A named base directory under which mod folders are looked up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub path: String,

    /// Whether the global `--build` flag applies to mods from this location.
    #[serde(default)]
    pub build: bool,

    /// Default HEMTT output folder (dev/build/release) for mods here.
    #[serde(rename = "type", default)]
    pub launch_type: Option<String>,
}

/// An external build tool, detected by a marker file in the mod folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildTool {
    /// Marker file or folder that must exist for this tool to apply.
    #[serde(default)]
    pub presence: String,

    /// Command argv, run with the mod folder as working directory.
    #[serde(default)]
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_ip")]
    pub ip: String,

    #[serde(default = "default_server_port")]
    pub port: u16,

    #[serde(default = "default_server_password")]
    pub password: String,

    #[serde(default = "default_server_profile")]
    pub profile: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessSettings {
    #[serde(default = "default_headless_profile")]
    pub profile: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// Seconds to wait before opening the latest report file.
    #[serde(default = "default_open_delay")]
    pub open_delay: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            locations: IndexMap::new(),
            build: IndexMap::new(),
            server: Some(ServerSettings::default()),
            headless: HeadlessSettings::default(),
            log: LogSettings::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            ip: default_server_ip(),
            port: default_server_port(),
            password: default_server_password(),
            profile: default_server_profile(),
        }
    }
}

impl Default for HeadlessSettings {
    fn default() -> Self {
        Self {
            profile: default_headless_profile(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            open_delay: default_open_delay(),
        }
    }
}

impl Settings {
    /// Look up a location's base path, `None` for unknown names.
    pub fn location_path(&self, name: &str) -> Option<&str> {
        self.locations.get(name).map(|l| l.path.as_str())
    }
}

fn default_profile() -> String {
    "Dev".to_string()
}

fn default_server_ip() -> String {
    "localhost".to_string()
}

fn default_server_port() -> u16 {
    2302
}

fn default_server_password() -> String {
    "test".to_string()
}

fn default_server_profile() -> String {
    "Server".to_string()
}

fn default_headless_profile() -> String {
    "headlessclient".to_string()
}

fn default_open_delay() -> u64 {
    3
}
