use super::contacts::existing;
use super::format::{contact_block, ContactField};
use super::{CmdResult, Context};
use crate::address_book::{AddressBook, UpcomingBirthday};
use crate::error::{AssistantError, Result};
use crate::fields::{Birthday, DATE_FORMAT};
use crate::input::Command;

pub fn add_birthday(book: &mut AddressBook, args: &[String]) -> Result<CmdResult> {
    let [name, date] = args else {
        return Ok(CmdResult::usage(Command::AddBirthday));
    };
    let birthday = Birthday::parse(date)?;
    let (record, _) = book.find_or_create(name)?;
    record.set_birthday(birthday);
    Ok(CmdResult::success(format!(
        "Birthday for {} has been added.",
        record.name()
    )))
}

pub fn show_birthday(book: &AddressBook, args: &[String]) -> Result<CmdResult> {
    let [name] = args else {
        return Ok(CmdResult::usage(Command::ShowBirthday));
    };
    let record = existing(book, name)?;
    Ok(CmdResult::info(contact_block(record, &[ContactField::Birthday])))
}

/// `birthdays [days]`: contacts whose next birthday is within the window,
/// ordered by date. Without an argument the configured window is used.
pub fn birthdays(book: &AddressBook, args: &[String], ctx: &Context) -> Result<CmdResult> {
    let days = match args {
        [] => ctx.birthday_window,
        [days] => days.trim().parse::<i64>().map_err(|_| {
            AssistantError::validation(format!("Invalid number of days: {}", days))
        })?,
        _ => return Ok(CmdResult::usage(Command::Birthdays)),
    };
    let days = days.max(0);

    let upcoming = book.get_upcoming_birthdays(Some(days), ctx.today);
    if upcoming.is_empty() {
        let unit = if days == 1 { "day" } else { "days" };
        return Ok(CmdResult::info(format!(
            "No birthdays within the next {} {}.",
            days, unit
        )));
    }

    let blocks: Vec<String> = upcoming.iter().map(upcoming_block).collect();
    Ok(CmdResult::info(blocks.join("\n\n")))
}

fn upcoming_block(entry: &UpcomingBirthday) -> String {
    let when = match entry.days_away {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {} days", n),
    };
    format!(
        "Name: {}\nBirthday: {} ({})",
        entry.name,
        entry.date.format(DATE_FORMAT),
        when
    )
}
