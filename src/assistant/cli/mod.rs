//! Binary-only code: flags, logging, the prompt loop and terminal output.

mod complete;
mod print;
mod repl;
mod setup;

use assistant::api::AssistantApi;
use assistant::commands::MessageLevel;
use assistant::config::AssistantConfig;
use assistant::error::Result;
use assistant::store::fs::FileStore;
use clap::Parser;
use print::print_messages;
use setup::{init_logging, resolve_data_dir, Cli};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Returns the process exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    let mut config = load_config(&data_dir);
    if cli.strict {
        config.strict_validation = true;
    }
    debug!(data_dir = %data_dir.display(), strict = config.strict_validation, "starting");

    let store = FileStore::new(data_dir).with_files(&config.contacts_file, &config.notes_file);
    let mut api = AssistantApi::new(store, &config)?;

    match cli.command.split_first() {
        Some((name, args)) => {
            let result = api.execute_args(name, args);
            print_messages(&result.messages);
            api.checkpoint()?;
            let failed = result
                .messages
                .iter()
                .any(|m| m.level == MessageLevel::Error);
            Ok(if failed { 1 } else { 0 })
        }
        None => repl::run_interactive(Arc::new(Mutex::new(api))),
    }
}

// A missing config.json is written with defaults; a broken one is left alone.
fn load_config(data_dir: &Path) -> AssistantConfig {
    AssistantConfig::load_or_init(data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config.json");
        AssistantConfig::default()
    })
}
