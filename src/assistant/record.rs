use crate::error::{AssistantError, Result};
use crate::fields::{Address, Birthday, Email, Name, Phone};
use crate::store::schema::RecordData;
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// One contact: a name plus its optional, validated fields.
///
/// The name is fixed at creation and doubles as the record's key in the
/// [`AddressBook`](crate::address_book::AddressBook).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: Name,
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
    email: Option<Email>,
    address: Option<Address>,
}

impl Record {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name: Name::new(name)?,
            phones: Vec::new(),
            birthday: None,
            email: None,
            address: None,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Appends a phone. Duplicates are kept.
    pub fn add_phone(&mut self, phone: &str) -> Result<()> {
        self.phones.push(Phone::new(phone)?);
        Ok(())
    }

    pub fn remove_phone(&mut self, phone: &str) -> Result<()> {
        let pos = self.position_of(phone)?;
        self.phones.remove(pos);
        Ok(())
    }

    /// Replaces the first phone equal to `old`, keeping its position.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<()> {
        let pos = self.position_of(old)?;
        self.phones[pos] = Phone::new(new)?;
        Ok(())
    }

    pub fn find_phone(&self, phone: &str) -> Option<&Phone> {
        self.phones.iter().find(|p| p.as_str() == phone)
    }

    fn position_of(&self, phone: &str) -> Result<usize> {
        self.phones
            .iter()
            .position(|p| p.as_str() == phone)
            .ok_or_else(|| AssistantError::PhoneNotFound(phone.to_string()))
    }

    pub fn add_birthday(&mut self, birthday: &str) -> Result<()> {
        self.birthday = Some(Birthday::parse(birthday)?);
        Ok(())
    }

    pub fn set_birthday(&mut self, birthday: impl Into<Birthday>) {
        self.birthday = Some(birthday.into());
    }

    pub fn add_email(&mut self, email: &str) -> Result<()> {
        self.email = Some(Email::new(email)?);
        Ok(())
    }

    pub fn add_address(&mut self, address: &str) -> Result<()> {
        self.address = Some(Address::new(address)?);
        Ok(())
    }

    /// The next date, on or after `today`, on which this contact's birthday falls.
    pub fn next_birthday(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.birthday
            .as_ref()
            .and_then(|b| next_occurrence(b.date(), today))
    }

    pub fn days_until_birthday(&self, today: NaiveDate) -> Option<i64> {
        self.next_birthday(today)
            .map(|next| (next - today).num_days())
    }

    pub fn to_data(&self) -> RecordData {
        RecordData {
            name: Some(self.name.to_string()),
            phones: self.phones.iter().map(|p| p.to_string()).collect(),
            birthday: self.birthday.as_ref().map(|b| b.to_string()),
            email: self.email.as_ref().map(|e| e.to_string()),
            address: self.address.as_ref().map(|a| a.to_string()),
        }
    }

    /// Rebuilds a record from its stored form.
    ///
    /// `key` is the document key the data was stored under, used when the entry
    /// itself carries no name. Empty optional fields load as unset.
    pub fn from_data(data: RecordData, key: Option<&str>) -> Result<Self> {
        let name = data
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(key)
            .unwrap_or_default();
        let mut record = Record::new(name)?;
        for phone in &data.phones {
            record.add_phone(phone)?;
        }
        if let Some(birthday) = non_empty(&data.birthday) {
            record.add_birthday(birthday)?;
        }
        if let Some(email) = non_empty(&data.email) {
            record.add_email(email)?;
        }
        if let Some(address) = non_empty(&data.address) {
            record.add_address(address)?;
        }
        Ok(record)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Projects `birthday` onto the year of `today`, or the following year when that
/// date has already passed. Feb 29 falls back to Feb 28 in common years.
pub fn next_occurrence(birthday: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary(birthday, today.year())?;
    if this_year >= today {
        return Some(this_year);
    }
    anniversary(birthday, today.year() + 1)
}

fn anniversary(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phones = if self.phones.is_empty() {
            "no phone numbers".to_string()
        } else {
            self.phones
                .iter()
                .map(Phone::as_str)
                .collect::<Vec<_>>()
                .join("; ")
        };
        write!(
            f,
            "Name: {}, Phones: {}, Birthday: {}, Email: {}, Address: {}",
            self.name,
            phones,
            or_unspecified(self.birthday.as_ref()),
            or_unspecified(self.email.as_ref()),
            or_unspecified(self.address.as_ref()),
        )
    }
}

pub(crate) fn or_unspecified<T: fmt::Display>(value: Option<&T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "not specified".to_string())
}
