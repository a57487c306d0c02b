//! The interactive loop and everything that makes sure state reaches disk:
//! `close`/`exit`, end of input, Ctrl-C at the prompt, SIGINT/SIGTERM, and an
//! early return or panic out of the loop all end in a checkpoint.
//!
//! Lines are read through `rustyline`, which gives history and Tab completion
//! of the command name. When stdin is not a terminal it reads plain lines.

use super::complete::CommandHelper;
use super::print::print_messages;
use assistant::api::{describe_error, AssistantApi};
use assistant::commands::CmdMessage;
use assistant::error::{AssistantError, Result};
use assistant::store::fs::FileStore;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, warn};

const GREETING: &str = "Welcome to the Personal Assistant!";
const HINT: &str = "Type 'help' to see the available commands.";
const PROMPT: &str = "Enter a command: ";
const FAREWELL: &str = "Good bye!";

pub(super) type SharedApi = Arc<Mutex<AssistantApi<FileStore>>>;

pub(super) fn run_interactive(api: SharedApi) -> Result<i32> {
    install_signal_handler(Arc::clone(&api))?;
    let guard = CheckpointGuard::new(Arc::clone(&api));

    let mut editor: Editor<CommandHelper, DefaultHistory> =
        Editor::new().map_err(terminal_error)?;
    editor.set_helper(Some(CommandHelper));

    print_messages(&[CmdMessage::info(GREETING), CmdMessage::info(HINT)]);

    let mut code = 0;
    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Eof) => {
                debug!("end of input");
                println!();
                print_messages(&[CmdMessage::info(FAREWELL)]);
                break;
            }
            Err(ReadlineError::Interrupted) => {
                debug!("interrupted at the prompt");
                code = 130;
                break;
            }
            Err(e) => return Err(terminal_error(e)),
        };

        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str()).map_err(terminal_error)?;
        }
        let result = lock(&api).execute(&line);
        print_messages(&result.messages);
        if result.exit {
            break;
        }
    }

    guard.finish()?;
    Ok(code)
}

fn terminal_error(e: ReadlineError) -> AssistantError {
    match e {
        ReadlineError::Io(e) => AssistantError::Io(e),
        e => AssistantError::Terminal(e.to_string()),
    }
}

// A panic while holding the lock must not stop the state from being saved.
fn lock(api: &SharedApi) -> MutexGuard<'_, AssistantApi<FileStore>> {
    api.lock().unwrap_or_else(PoisonError::into_inner)
}

fn install_signal_handler(api: SharedApi) -> Result<()> {
    ctrlc::set_handler(move || {
        warn!("termination signal received, saving");
        let code = match lock(&api).checkpoint() {
            Ok(()) => 130,
            Err(e) => {
                eprintln!("{}", describe_error(&e));
                1
            }
        };
        println!();
        std::process::exit(code);
    })
    .map_err(|e| AssistantError::Terminal(format!("Could not install signal handler: {}", e)))
}

/// Checkpoints on drop unless [`CheckpointGuard::finish`] already did.
struct CheckpointGuard {
    api: SharedApi,
    armed: bool,
}

impl CheckpointGuard {
    fn new(api: SharedApi) -> Self {
        Self { api, armed: true }
    }

    fn finish(mut self) -> Result<()> {
        self.armed = false;
        lock(&self.api).checkpoint()
    }
}

impl Drop for CheckpointGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!("leaving the prompt unexpectedly, saving");
        if let Err(e) = lock(&self.api).checkpoint() {
            error!(error = %e, "fallback checkpoint failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant::config::AssistantConfig;
    use assistant::store::Collection;
    use std::fs;
    use tempfile::TempDir;

    fn shared(dir: &TempDir) -> SharedApi {
        let store = FileStore::new(dir.path().to_path_buf());
        let api = AssistantApi::new(store, &AssistantConfig::default()).unwrap();
        Arc::new(Mutex::new(api))
    }

    #[test]
    fn dropped_guard_checkpoints() {
        let dir = TempDir::new().unwrap();
        let api = shared(&dir);
        lock(&api).execute("add Alice 111");
        {
            let _guard = CheckpointGuard::new(Arc::clone(&api));
        }
        let path = lock(&api).store().path(Collection::Contacts);
        assert!(fs::read_to_string(path).unwrap().contains("Alice"));
    }

    #[test]
    fn finished_guard_saves_once_and_disarms() {
        let dir = TempDir::new().unwrap();
        let api = shared(&dir);
        lock(&api).execute("add-note Todo buy milk");
        CheckpointGuard::new(Arc::clone(&api)).finish().unwrap();

        let path = lock(&api).store().path(Collection::Notes);
        assert!(fs::read_to_string(path).unwrap().contains("buy milk"));
    }
}
