//! Tab completion at the prompt.
//!
//! Only the command name (the first word) is completed. Once a space follows
//! it, arguments are free text and nothing is suggested.

use assistant::input::Command;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

pub(super) struct CommandHelper;

/// Returns where the replacement starts and the matching command names for
/// the text left of `pos`.
fn command_candidates(line: &str, pos: usize) -> (usize, Vec<&'static str>) {
    let before = line.get(..pos).unwrap_or(line);
    let word = before.trim_start();
    if word.contains(char::is_whitespace) {
        return (pos, Vec::new());
    }
    let start = before.len() - word.len();
    (start, Command::completions(word))
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, names) = command_candidates(line, pos);
        let pairs = names
            .into_iter()
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

impl Helper for CommandHelper {}
