//! # API Facade
//!
//! [`AssistantApi`] owns the two collections and the store behind them. A UI feeds
//! it raw lines through [`AssistantApi::execute`] and prints the returned
//! [`CmdResult`]; it never has to handle an error itself.
//!
//! ## Error boundary
//!
//! `execute` is the one place where `Err(AssistantError)` becomes output:
//! - expected failures (bad field values, unknown contacts, duplicate notes) are
//!   rendered with their own message text;
//! - anything else is logged and rendered as `An error occurred: ...`.
//!
//! ## Persistence
//!
//! Both collections are read once in [`AssistantApi::new`] and written back in full
//! by [`AssistantApi::checkpoint`]. Commands only mutate memory.
//!
//! Like the rest of the library, the API never touches stdout or the process.

use crate::address_book::AddressBook;
use crate::commands::{self, CmdResult, Context};
use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use crate::fields::FieldPolicy;
use crate::input::{parse_line, Command, UnknownCommand};
use crate::notebook::Notebook;
use crate::store::{self, DataStore};
use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, error};

pub struct AssistantApi<S: DataStore> {
    store: S,
    book: AddressBook,
    notebook: Notebook,
    policy: FieldPolicy,
    birthday_window: i64,
    today: Option<NaiveDate>,
}

impl<S: DataStore> AssistantApi<S> {
    /// Loads both collections from `store`.
    pub fn new(mut store: S, config: &AssistantConfig) -> Result<Self> {
        let book = store::load_address_book(&mut store)?;
        let notebook = store::load_notebook(&mut store)?;
        debug!(
            contacts = book.len(),
            notes = notebook.len(),
            "loaded collections"
        );
        Ok(Self {
            store,
            book,
            notebook,
            policy: config.field_policy(),
            birthday_window: config.birthday_window,
            today: None,
        })
    }

    /// Pins "today" instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn address_book(&self) -> &AddressBook {
        &self.book
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs one input line. Blank lines yield an empty result.
    pub fn execute(&mut self, line: &str) -> CmdResult {
        match parse_line(line) {
            Some(parsed) => self.execute_args(&parsed.command, &parsed.args),
            None => CmdResult::default(),
        }
    }

    /// Runs a command whose arguments are already split, e.g. from argv.
    pub fn execute_args(&mut self, name: &str, args: &[String]) -> CmdResult {
        let command = match name.parse::<Command>() {
            Ok(command) => command,
            Err(UnknownCommand(name)) => return commands::general::unknown_command(&name),
        };
        debug!(%command, args = args.len(), "dispatch");

        match self.dispatch(command, args) {
            Ok(result) => result,
            Err(e) => {
                if !e.is_expected() {
                    error!(%command, error = %e, "command failed");
                }
                CmdResult::error(describe_error(&e))
            }
        }
    }

    pub fn dispatch(&mut self, command: Command, args: &[String]) -> Result<CmdResult> {
        use commands::{birthdays, contacts, general, notes, search};

        let ctx = self.context();
        let now = Utc::now();
        match command {
            Command::Add => contacts::add(&mut self.book, args, &ctx),
            Command::Change => contacts::change(&mut self.book, args, &ctx),
            Command::RemovePhone => contacts::remove_phone(&mut self.book, args, &ctx),
            Command::Phone => contacts::phone(&self.book, args),
            Command::All => contacts::all(&self.book),
            Command::AddBirthday => birthdays::add_birthday(&mut self.book, args),
            Command::ShowBirthday => birthdays::show_birthday(&self.book, args),
            Command::Birthdays => birthdays::birthdays(&self.book, args, &ctx),
            Command::AddEmail => contacts::add_email(&mut self.book, args, &ctx),
            Command::AddAddress => contacts::add_address(&mut self.book, args),
            Command::DeleteContact => contacts::delete_contact(&mut self.book, args),
            Command::SearchContacts => search::search_contacts(&self.book, args),
            Command::AddNote => notes::add_note(&mut self.notebook, args),
            Command::EditNote => notes::edit_note(&mut self.notebook, args),
            Command::DeleteNote => notes::delete_note(&mut self.notebook, args),
            Command::ShowNote => notes::show_note(&self.notebook, args, now),
            Command::SearchNote => notes::search_note(&self.notebook, args, now),
            Command::ShowNotes => notes::show_notes(&self.notebook, now),
            Command::AddTag => notes::add_tag(&mut self.notebook, args),
            Command::RemoveTag => notes::remove_tag(&mut self.notebook, args),
            Command::SearchTag => notes::search_tag(&self.notebook, args, now),
            Command::Hello => general::hello(),
            Command::Help => general::help(),
            Command::Close => general::close(),
        }
    }

    /// Writes both collections back to the store in full.
    ///
    /// Both writes are attempted even if the first fails; the first error is
    /// returned.
    pub fn checkpoint(&mut self) -> Result<()> {
        let contacts = store::save_address_book(&mut self.store, &self.book);
        let notes = store::save_notebook(&mut self.store, &self.notebook);
        debug!(
            contacts = self.book.len(),
            notes = self.notebook.len(),
            "checkpoint"
        );
        contacts.and(notes)
    }

    fn context(&self) -> Context {
        Context {
            policy: self.policy,
            today: self.today(),
            birthday_window: self.birthday_window,
        }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// User-facing text for an error: its own message when the user caused it,
/// a generic prefix otherwise.
pub fn describe_error(e: &AssistantError) -> String {
    if e.is_expected() {
        e.to_string()
    } else {
        format!("An error occurred: {}", e)
    }
}
