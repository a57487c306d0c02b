//! # Command Layer
//!
//! One function per user command. Each takes the raw string arguments, checks
//! their count, calls into the collections and describes the outcome as leveled
//! [`CmdMessage`]s.
//!
//! ## Failure handling
//!
//! - A wrong argument count is not an error: the command returns its usage line as
//!   a warning and touches nothing.
//! - Everything else (bad field values, missing contacts or notes) is returned as
//!   `Err(AssistantError)`. [`crate::api::AssistantApi`] is the single place that
//!   turns those into printable messages.
//!
//! Commands never print and never read the clock; "today" arrives in [`Context`].

use crate::fields::FieldPolicy;
use crate::input::Command;
use chrono::NaiveDate;

pub mod birthdays;
pub mod contacts;
pub mod format;
pub mod general;
pub mod notes;
pub mod search;

/// Ambient inputs shared by contact commands.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub policy: FieldPolicy,
    pub today: NaiveDate,
    pub birthday_window: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    /// Set by `close`: the caller should checkpoint and stop reading input.
    pub exit: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self::default().with_message(CmdMessage::info(content))
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::default().with_message(CmdMessage::success(content))
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self::default().with_message(CmdMessage::warning(content))
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::default().with_message(CmdMessage::error(content))
    }

    pub fn usage(command: Command) -> Self {
        Self::warning(command.usage())
    }

    /// All message contents joined by newlines, without styling.
    pub fn text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
