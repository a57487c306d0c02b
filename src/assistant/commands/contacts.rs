use super::format::{contact_block, contact_blocks, ContactField};
use super::{CmdResult, Context};
use crate::address_book::AddressBook;
use crate::error::{AssistantError, Result};
use crate::fields::{Address, FieldPolicy};
use crate::input::Command;
use crate::record::Record;

/// `add <name> <phone>`: creates the contact if needed and appends the phone.
pub fn add(book: &mut AddressBook, args: &[String], ctx: &Context) -> Result<CmdResult> {
    let [name, phone] = args else {
        return Ok(CmdResult::usage(Command::Add));
    };
    let phone = ctx.policy.phone(phone)?;
    let (record, created) = book.find_or_create(name)?;
    record.add_phone(phone.as_str())?;

    let verb = if created { "created" } else { "updated" };
    Ok(CmdResult::success(format!("Contact {} {}.", record.name(), verb)))
}

/// `change <name> <old_phone> <new_phone>`
pub fn change(book: &mut AddressBook, args: &[String], ctx: &Context) -> Result<CmdResult> {
    let [name, old, new] = args else {
        return Ok(CmdResult::usage(Command::Change));
    };
    let new = ctx.policy.phone(new)?;
    let record = existing_mut(book, name)?;
    let old = stored_phone(record, old, ctx.policy);
    record.edit_phone(&old, new.as_str())?;
    Ok(CmdResult::success(format!(
        "Phone number for {} has been changed.",
        record.name()
    )))
}

pub fn remove_phone(book: &mut AddressBook, args: &[String], ctx: &Context) -> Result<CmdResult> {
    let [name, phone] = args else {
        return Ok(CmdResult::usage(Command::RemovePhone));
    };
    let record = existing_mut(book, name)?;
    let phone = stored_phone(record, phone, ctx.policy);
    record.remove_phone(&phone)?;
    Ok(CmdResult::success(format!(
        "Phone number {} removed from {}.",
        phone,
        record.name()
    )))
}

pub fn phone(book: &AddressBook, args: &[String]) -> Result<CmdResult> {
    let [name] = args else {
        return Ok(CmdResult::usage(Command::Phone));
    };
    let record = existing(book, name)?;
    Ok(CmdResult::info(contact_block(record, &[ContactField::Phones])))
}

pub fn all(book: &AddressBook) -> Result<CmdResult> {
    if book.is_empty() {
        return Ok(CmdResult::info("The contact list is empty."));
    }
    Ok(CmdResult::info(contact_blocks(book.records())))
}

pub fn add_email(book: &mut AddressBook, args: &[String], ctx: &Context) -> Result<CmdResult> {
    let [name, email] = args else {
        return Ok(CmdResult::usage(Command::AddEmail));
    };
    let email = ctx.policy.email(email)?;
    let (record, _) = book.find_or_create(name)?;
    record.add_email(email.as_str())?;
    Ok(CmdResult::success(format!(
        "Email for {} has been added.",
        record.name()
    )))
}

/// `add-address <name> <address...>`: every argument after the name is joined
/// with single spaces.
pub fn add_address(book: &mut AddressBook, args: &[String]) -> Result<CmdResult> {
    let Some((name, rest)) = args.split_first().filter(|(_, rest)| !rest.is_empty()) else {
        return Ok(CmdResult::usage(Command::AddAddress));
    };
    let address = Address::new(&rest.join(" "))?;
    let (record, _) = book.find_or_create(name)?;
    record.add_address(address.as_str())?;
    Ok(CmdResult::success(format!(
        "Address for {} has been added.",
        record.name()
    )))
}

pub fn delete_contact(book: &mut AddressBook, args: &[String]) -> Result<CmdResult> {
    let [name] = args else {
        return Ok(CmdResult::usage(Command::DeleteContact));
    };
    let name = name.trim();
    if !book.delete(name) {
        return Err(AssistantError::ContactNotFound(name.to_string()));
    }
    Ok(CmdResult::success(format!("Contact {} deleted.", name)))
}

pub(super) fn existing<'a>(book: &'a AddressBook, name: &str) -> Result<&'a Record> {
    book.find(name)
        .ok_or_else(|| AssistantError::ContactNotFound(name.to_string()))
}

fn existing_mut<'a>(book: &'a mut AddressBook, name: &str) -> Result<&'a mut Record> {
    book.find_mut(name)
        .ok_or_else(|| AssistantError::ContactNotFound(name.to_string()))
}

// Under the strict policy phones are stored normalized, so `0501234567` has to
// find `+380501234567`. Values stored before strict mode was turned on still
// match as typed.
fn stored_phone(record: &Record, typed: &str, policy: FieldPolicy) -> String {
    if record.find_phone(typed).is_some() {
        return typed.to_string();
    }
    policy
        .phone(typed)
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|_| typed.to_string())
}
