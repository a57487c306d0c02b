use super::format::contact_blocks;
use super::CmdResult;
use crate::address_book::AddressBook;
use crate::error::Result;
use crate::input::Command;

/// `search-contacts <query...>`: the arguments are joined into one query.
pub fn search_contacts(book: &AddressBook, args: &[String]) -> Result<CmdResult> {
    let query = args.join(" ");
    let query = query.trim();
    if query.is_empty() {
        return Ok(CmdResult::usage(Command::SearchContacts));
    }

    let matches = book.search(query);
    if matches.is_empty() {
        return Ok(CmdResult::info(format!("No contacts matched '{}'.", query)));
    }
    Ok(CmdResult::info(contact_blocks(matches)))
}
