use assistant::commands::{CmdMessage, MessageLevel};
use colored::{ColoredString, Colorize};

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", styled(message));
    }
}

fn styled(message: &CmdMessage) -> ColoredString {
    match message.level {
        MessageLevel::Info => message.content.dimmed(),
        MessageLevel::Success => message.content.green(),
        MessageLevel::Warning => message.content.yellow(),
        MessageLevel::Error => message.content.red(),
    }
}
