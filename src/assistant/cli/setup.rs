use assistant::error::{AssistantError, Result};
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const HOME_ENV: &str = "ASSISTANT_HOME";
pub const LOG_ENV: &str = "ASSISTANT_LOG";

/// "0.3.2" for releases, "0.3.2@abc1234 2025-01-15 14:30" for dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "assistant", bin_name = "assistant", version = get_version())]
#[command(
    about = "Personal assistant for contacts and notes",
    long_about = "Personal assistant for contacts and notes.\n\n\
                  Without a COMMAND an interactive prompt starts; type 'help' there \
                  for the list of commands."
)]
pub struct Cli {
    /// Directory holding contacts.json, notes.json and config.json
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enforce Ukrainian phone numbers and well-formed emails
    #[arg(long)]
    pub strict: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Run a single command and exit, e.g. `assistant add Alice 0501234567`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Logs go to stderr so they never mix with command output.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// `--data-dir`, then `$ASSISTANT_HOME`, then the platform data directory.
pub fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "assistant", "assistant")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| AssistantError::Store("Could not determine data directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn trailing_command_keeps_hyphen_args() {
        let cli = Cli::try_parse_from(["assistant", "--strict", "birthdays", "-5"]).unwrap();
        assert!(cli.strict);
        assert_eq!(cli.command, vec!["birthdays", "-5"]);
    }

    #[test]
    fn no_command_means_interactive() {
        let cli = Cli::try_parse_from(["assistant", "--data-dir", "/tmp/x"]).unwrap();
        assert!(cli.command.is_empty());
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn flag_wins_over_environment() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/flag"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/flag"));
    }
}
