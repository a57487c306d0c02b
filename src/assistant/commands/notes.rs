use super::format::{note_block, note_blocks};
use super::{CmdMessage, CmdResult};
use crate::error::{AssistantError, Result};
use crate::input::Command;
use crate::notebook::Notebook;
use chrono::{DateTime, Utc};

/// `add-note <title> <content...> [#tag...]`
///
/// Trailing `#word` tokens become tags; everything between the title and the
/// first trailing tag is the content.
pub fn add_note(notebook: &mut Notebook, args: &[String]) -> Result<CmdResult> {
    let Some((title, rest)) = args.split_first() else {
        return Ok(CmdResult::usage(Command::AddNote));
    };
    let (content, tags) = split_trailing_tags(rest);
    if content.is_empty() {
        return Ok(CmdResult::usage(Command::AddNote));
    }

    let note = notebook.add(title, &content.join(" "), tags)?;
    Ok(CmdResult::success(format!(
        "Note '{}' added successfully.",
        note.title()
    )))
}

pub fn edit_note(notebook: &mut Notebook, args: &[String]) -> Result<CmdResult> {
    let Some((title, rest)) = args.split_first().filter(|(_, rest)| !rest.is_empty()) else {
        return Ok(CmdResult::usage(Command::EditNote));
    };
    let note = notebook.edit(title, &rest.join(" "))?;
    Ok(CmdResult::success(format!(
        "Note '{}' updated successfully.",
        note.title()
    )))
}

pub fn delete_note(notebook: &mut Notebook, args: &[String]) -> Result<CmdResult> {
    let [title] = args else {
        return Ok(CmdResult::usage(Command::DeleteNote));
    };
    let note = notebook.delete(title)?;
    Ok(CmdResult::success(format!(
        "Note '{}' deleted successfully.",
        note.title()
    )))
}

pub fn show_note(notebook: &Notebook, args: &[String], now: DateTime<Utc>) -> Result<CmdResult> {
    let [title] = args else {
        return Ok(CmdResult::usage(Command::ShowNote));
    };
    let note = notebook
        .get(title)
        .ok_or_else(|| AssistantError::NoteNotFound(title.clone()))?;
    Ok(CmdResult::info(note_block(note, now)))
}

pub fn search_note(notebook: &Notebook, args: &[String], now: DateTime<Utc>) -> Result<CmdResult> {
    let keyword = args.join(" ");
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Ok(CmdResult::usage(Command::SearchNote));
    }

    let found = notebook.search(keyword);
    if found.is_empty() {
        return Ok(CmdResult::info(format!(
            "No notes found containing '{}'.",
            keyword
        )));
    }
    let mut result = CmdResult::info(format!(
        "Found {} note(s) containing '{}':",
        found.len(),
        keyword
    ));
    result.add_message(CmdMessage::info(note_blocks(found, now)));
    Ok(result)
}

pub fn show_notes(notebook: &Notebook, now: DateTime<Utc>) -> Result<CmdResult> {
    if notebook.is_empty() {
        return Ok(CmdResult::info(
            "No notes found. Add your first note with: add-note <title> <content>",
        ));
    }
    let mut result = CmdResult::info(format!("All Notes ({} total):", notebook.len()));
    result.add_message(CmdMessage::info(note_blocks(notebook.notes(), now)));
    Ok(result)
}

/// `add-tag <title> <tag...>`; a leading `#` on a tag is optional.
pub fn add_tag(notebook: &mut Notebook, args: &[String]) -> Result<CmdResult> {
    let Some((title, tags)) = args.split_first().filter(|(_, tags)| !tags.is_empty()) else {
        return Ok(CmdResult::usage(Command::AddTag));
    };

    let mut added = Vec::new();
    for tag in tags.iter().map(|t| strip_hash(t)) {
        if notebook.add_tag(title, tag)? {
            added.push(tag);
        }
    }
    if added.is_empty() {
        return Ok(CmdResult::warning(format!(
            "Note '{}' already has those tags.",
            title
        )));
    }
    Ok(CmdResult::success(format!(
        "Tagged '{}' with {}.",
        title,
        added.join(", ")
    )))
}

pub fn remove_tag(notebook: &mut Notebook, args: &[String]) -> Result<CmdResult> {
    let [title, tag] = args else {
        return Ok(CmdResult::usage(Command::RemoveTag));
    };
    let tag = strip_hash(tag);
    if !notebook.remove_tag(title, tag)? {
        return Ok(CmdResult::warning(format!(
            "Note '{}' has no tag '{}'.",
            title, tag
        )));
    }
    Ok(CmdResult::success(format!(
        "Removed tag '{}' from '{}'.",
        tag, title
    )))
}

pub fn search_tag(notebook: &Notebook, args: &[String], now: DateTime<Utc>) -> Result<CmdResult> {
    let [tag] = args else {
        return Ok(CmdResult::usage(Command::SearchTag));
    };
    let tag = strip_hash(tag);
    let found = notebook.search_tag(tag);
    if found.is_empty() {
        return Ok(CmdResult::info(format!("No notes tagged '{}'.", tag)));
    }
    Ok(CmdResult::info(note_blocks(found, now)))
}

fn strip_hash(tag: &str) -> &str {
    tag.strip_prefix('#').unwrap_or(tag)
}

fn is_tag_token(token: &str) -> bool {
    token.len() > 1 && token.starts_with('#')
}

fn split_trailing_tags(tokens: &[String]) -> (&[String], Vec<String>) {
    let split = tokens
        .iter()
        .rposition(|t| !is_tag_token(t))
        .map_or(0, |i| i + 1);
    let tags = tokens[split..]
        .iter()
        .map(|t| strip_hash(t).to_string())
        .collect();
    (&tokens[..split], tags)
}
