use camino::Utf8PathBuf;
use clap::Parser;

/// Quick development Arma 3 launcher.
///
/// Mod tokens have the shape `location:mod[:mark[:mark...]]`, where marks
/// are `b[tool]` (build, optionally with a named tool), `s`/`skip` (exclude
/// from wildcard expansion) and `t[type]` (HEMTT output folder override).
/// A token that names no known location is treated as a raw path; `none`
/// launches without any mods.
#[derive(Parser, Debug, Clone)]
#[command(name = "armaqdl", version, about = "Quick development Arma 3 launcher")]
pub struct Cli {
    /// Paths to mods, or 'none' for no mods
    #[arg(value_name = "loc:mod[:b[tool]][:s|:skip][:t[type]]")]
    pub mods: Vec<String>,

    /// Mission to load (name under the profile's missions folder, or a path)
    #[arg(short, long, default_value = "")]
    pub mission: String,

    /// Start a dedicated server
    #[arg(short, long)]
    pub server: bool,

    /// Join a server; without a value the [server] settings defaults apply
    #[arg(
        short = 'j',
        long,
        num_args = 0..=1,
        default_missing_value = "",
        value_name = "IP:PORT:PASSWORD"
    )]
    pub join_server: Option<String>,

    /// Start a headless client
    #[arg(long, alias = "hc")]
    pub headless: bool,

    /// Profile name
    #[arg(short, long, default_value = "")]
    pub profile: String,

    /// Disable file patching
    #[arg(long, alias = "nfp")]
    pub no_filepatching: bool,

    /// Hide script errors
    #[arg(long, alias = "ne")]
    pub no_errors: bool,

    /// Disable debug mode
    #[arg(long, alias = "nd")]
    pub no_debug: bool,

    /// Don't pause on focus loss
    #[arg(long, alias = "np")]
    pub no_pause: bool,

    /// Check signatures
    #[arg(short, long)]
    pub check_signatures: bool,

    /// Fullscreen instead of windowed
    #[arg(short, long)]
    pub fullscreen: bool,

    /// Other parameters to pass through verbatim (use '=' to pass '-<arg>')
    #[arg(long, num_args = 1.., value_name = "PARAM", allow_hyphen_values = true)]
    pub parameters: Vec<String>,

    /// Build mods (auto-determine the tool if unspecified)
    #[arg(
        short = 'b',
        long,
        num_args = 0..=1,
        default_missing_value = "auto",
        value_name = "TOOL"
    )]
    pub build: Option<String>,

    /// Don't open the last report log
    #[arg(long, alias = "nl")]
    pub no_log: bool,

    /// Load config from the specified folder
    #[arg(long, value_name = "DIR")]
    pub config: Option<Utf8PathBuf>,

    /// List active config locations and build tools
    #[arg(long)]
    pub list: bool,

    /// Dry run without actually launching anything (simulate)
    #[arg(long)]
    pub dry: bool,

    /// Verbose output
    #[arg(long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_tokens_positional() {
        let cli = Cli::parse_from(["armaqdl", "p:@cba_a3", "main:@ace"]);
        assert_eq!(cli.mods, ["p:@cba_a3", "main:@ace"]);
        assert!(!cli.server);
    }

    #[test]
    fn test_join_server_optional_value() {
        let cli = Cli::parse_from(["armaqdl", "none", "-j"]);
        assert_eq!(cli.join_server.as_deref(), Some(""));

        let cli = Cli::parse_from(["armaqdl", "none", "-j", "1.2.3.4:2302:pw"]);
        assert_eq!(cli.join_server.as_deref(), Some("1.2.3.4:2302:pw"));

        let cli = Cli::parse_from(["armaqdl", "none"]);
        assert_eq!(cli.join_server, None);
    }

    #[test]
    fn test_build_optional_tool() {
        let cli = Cli::parse_from(["armaqdl", "none", "-b"]);
        assert_eq!(cli.build.as_deref(), Some("auto"));

        let cli = Cli::parse_from(["armaqdl", "none", "-b", "hemtt"]);
        assert_eq!(cli.build.as_deref(), Some("hemtt"));
    }

    #[test]
    fn test_negation_aliases() {
        let cli = Cli::parse_from(["armaqdl", "none", "--nfp", "--ne", "--nd", "--np", "--nl"]);
        assert!(cli.no_filepatching);
        assert!(cli.no_errors);
        assert!(cli.no_debug);
        assert!(cli.no_pause);
        assert!(cli.no_log);
    }

    #[test]
    fn test_parameters_passthrough() {
        let cli = Cli::parse_from(["armaqdl", "none", "--parameters", "-world=empty", "-noLogs"]);
        assert_eq!(cli.parameters, ["-world=empty", "-noLogs"]);
    }
}
