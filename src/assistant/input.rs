//! # Input
//!
//! Turns a raw line into a command name plus arguments, and holds the catalogue of
//! commands: their names, parameter synopsis, description and help group.
//!
//! Tokens split the way a POSIX shell splits words (via `shlex`): single or
//! double quotes group words into one argument and a backslash escapes the next
//! character. `#` is an ordinary character, not a comment. A line with an
//! unbalanced quote (`add O'Brien 0501234567`) falls back to a plain whitespace
//! split.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Contacts,
    Notes,
    General,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Contacts => "Contact Management:",
            CommandGroup::Notes => "Note Management:",
            CommandGroup::General => "General:",
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Contacts,
            CommandGroup::Notes,
            CommandGroup::General,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Add,
    Change,
    RemovePhone,
    Phone,
    All,
    AddBirthday,
    ShowBirthday,
    Birthdays,
    AddEmail,
    AddAddress,
    DeleteContact,
    SearchContacts,
    AddNote,
    EditNote,
    DeleteNote,
    ShowNote,
    SearchNote,
    ShowNotes,
    AddTag,
    RemoveTag,
    SearchTag,
    Hello,
    Help,
    Close,
}

impl Command {
    pub const ALL: &'static [Command] = &[
        Command::Add,
        Command::Change,
        Command::RemovePhone,
        Command::Phone,
        Command::All,
        Command::AddBirthday,
        Command::ShowBirthday,
        Command::Birthdays,
        Command::AddEmail,
        Command::AddAddress,
        Command::DeleteContact,
        Command::SearchContacts,
        Command::AddNote,
        Command::EditNote,
        Command::DeleteNote,
        Command::ShowNote,
        Command::SearchNote,
        Command::ShowNotes,
        Command::AddTag,
        Command::RemoveTag,
        Command::SearchTag,
        Command::Hello,
        Command::Help,
        Command::Close,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::Change => "change",
            Command::RemovePhone => "remove-phone",
            Command::Phone => "phone",
            Command::All => "all",
            Command::AddBirthday => "add-birthday",
            Command::ShowBirthday => "show-birthday",
            Command::Birthdays => "birthdays",
            Command::AddEmail => "add-email",
            Command::AddAddress => "add-address",
            Command::DeleteContact => "delete-contact",
            Command::SearchContacts => "search-contacts",
            Command::AddNote => "add-note",
            Command::EditNote => "edit-note",
            Command::DeleteNote => "delete-note",
            Command::ShowNote => "show-note",
            Command::SearchNote => "search-note",
            Command::ShowNotes => "show-notes",
            Command::AddTag => "add-tag",
            Command::RemoveTag => "remove-tag",
            Command::SearchTag => "search-tag",
            Command::Hello => "hello",
            Command::Help => "help",
            Command::Close => "close",
        }
    }

    pub fn params(self) -> &'static str {
        match self {
            Command::Add => "<name> <phone>",
            Command::Change => "<name> <old_phone> <new_phone>",
            Command::RemovePhone => "<name> <phone>",
            Command::Phone => "<name>",
            Command::AddBirthday => "<name> <DD.MM.YYYY>",
            Command::ShowBirthday => "<name>",
            Command::Birthdays => "[days]",
            Command::AddEmail => "<name> <email>",
            Command::AddAddress => "<name> <address...>",
            Command::DeleteContact => "<name>",
            Command::SearchContacts => "<query...>",
            Command::AddNote => "<title> <content...> [#tag...]",
            Command::EditNote => "<title> <new_content...>",
            Command::DeleteNote => "<title>",
            Command::ShowNote => "<title>",
            Command::SearchNote => "<keyword>",
            Command::AddTag => "<title> <tag...>",
            Command::RemoveTag => "<title> <tag>",
            Command::SearchTag => "<tag>",
            Command::All | Command::ShowNotes | Command::Hello | Command::Help | Command::Close => "",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Add => "Add a new contact or another phone",
            Command::Change => "Change a contact's phone number",
            Command::RemovePhone => "Remove a phone number from a contact",
            Command::Phone => "Show phone number(s) for a contact",
            Command::All => "Show all contacts",
            Command::AddBirthday => "Add birthday to a contact",
            Command::ShowBirthday => "Show birthday for a contact",
            Command::Birthdays => "Show upcoming birthdays (default: 7 days)",
            Command::AddEmail => "Add or update a contact's email",
            Command::AddAddress => "Add or update a contact's address",
            Command::DeleteContact => "Delete a contact",
            Command::SearchContacts => "Search contacts by name, phone, email or address",
            Command::AddNote => "Add a new note",
            Command::EditNote => "Replace a note's content",
            Command::DeleteNote => "Delete a note",
            Command::ShowNote => "Show a single note",
            Command::SearchNote => "Search notes by keyword",
            Command::ShowNotes => "Show all notes",
            Command::AddTag => "Tag a note",
            Command::RemoveTag => "Remove a tag from a note",
            Command::SearchTag => "Show notes carrying a tag",
            Command::Hello => "Greet the assistant",
            Command::Help => "Show this help message",
            Command::Close => "Save and close the assistant (alias: exit)",
        }
    }

    pub fn group(self) -> CommandGroup {
        match self {
            Command::Add
            | Command::Change
            | Command::RemovePhone
            | Command::Phone
            | Command::All
            | Command::AddBirthday
            | Command::ShowBirthday
            | Command::Birthdays
            | Command::AddEmail
            | Command::AddAddress
            | Command::DeleteContact
            | Command::SearchContacts => CommandGroup::Contacts,
            Command::AddNote
            | Command::EditNote
            | Command::DeleteNote
            | Command::ShowNote
            | Command::SearchNote
            | Command::ShowNotes
            | Command::AddTag
            | Command::RemoveTag
            | Command::SearchTag => CommandGroup::Notes,
            Command::Hello | Command::Help | Command::Close => CommandGroup::General,
        }
    }

    pub fn usage(self) -> String {
        format!("Usage: {} {}", self.name(), self.params())
            .trim_end()
            .to_string()
    }

    /// Command names starting with `prefix`, in catalogue order.
    pub fn completions(prefix: &str) -> Vec<&'static str> {
        let prefix = prefix.to_lowercase();
        Command::ALL
            .iter()
            .map(|c| c.name())
            .filter(|name| name.starts_with(&prefix))
            .collect()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_lowercase();
        if name == "exit" {
            return Ok(Command::Close);
        }
        Command::ALL
            .iter()
            .copied()
            .find(|c| c.name() == name)
            .ok_or(UnknownCommand(name))
    }
}

/// A tokenized input line. The command name is lower-cased; arguments are kept
/// as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub command: String,
    pub args: Vec<String>,
}

/// Returns `None` for a blank line.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let mut tokens = tokenize(line).into_iter();
    let command = tokens.next()?.to_lowercase();
    Some(ParsedLine {
        command,
        args: tokens.collect(),
    })
}

// shlex treats a word starting with `#` as a comment, but tags are typed as
// `#tag`. The stand-in is a private-use character that never reaches a command.
const HASH_STAND_IN: char = '\u{E000}';

pub fn tokenize(line: &str) -> Vec<String> {
    let hidden = line.replace('#', &HASH_STAND_IN.to_string());
    match shlex::split(&hidden) {
        Some(tokens) => tokens
            .into_iter()
            .map(|token| token.replace(HASH_STAND_IN, "#"))
            .collect(),
        None => line.split_whitespace().map(str::to_string).collect(),
    }
}
