use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::input::{Command, CommandGroup};

pub fn hello() -> Result<CmdResult> {
    Ok(CmdResult::info("How can I help you?"))
}

pub fn close() -> Result<CmdResult> {
    let mut result = CmdResult::info("Good bye!");
    result.exit = true;
    Ok(result)
}

pub fn help() -> Result<CmdResult> {
    Ok(CmdResult::info(help_text()))
}

/// The grouped command catalogue, one dot-led line per command.
pub fn help_text() -> String {
    let mut lines = vec!["Available commands:".to_string()];
    for group in CommandGroup::all() {
        lines.push(String::new());
        lines.push(group.heading().to_string());
        for command in Command::ALL.iter().filter(|c| c.group() == *group) {
            let synopsis = format!("{} {}", command.name(), command.params());
            lines.push(format!("  {:.<45} {}", synopsis.trim_end(), command.description()));
        }
    }
    lines.push(String::new());
    lines.push("Legend: <required> [optional] ... (one or more words)".to_string());
    lines.join("\n")
}

/// Message for a line whose first word is not a command.
pub fn unknown_command(name: &str) -> CmdResult {
    let mut result = CmdResult::error("Invalid command.");
    let suggestions = Command::completions(name);
    if !suggestions.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Did you mean: {}?",
            suggestions.join(", ")
        )));
    }
    result
}
