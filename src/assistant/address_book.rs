use crate::record::Record;
use crate::store::schema::{Document, RecordData};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::warn;

pub const DEFAULT_BIRTHDAY_WINDOW: i64 = 7;

/// A contact whose birthday falls inside the requested window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday {
    pub name: String,
    pub date: NaiveDate,
    pub days_away: i64,
}

/// Contacts keyed by name.
///
/// Iteration, search results and serialization all follow key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    records: BTreeMap<String, Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` under its name, replacing whatever was there.
    pub fn add_record(&mut self, record: Record) {
        self.records.insert(record.name().to_string(), record);
    }

    /// Looks `name` up the way [`Record::new`] stores it: surrounding
    /// whitespace is ignored, case is not.
    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.get(name.trim())
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name.trim())
    }

    /// Returns the record for `name`, creating an empty one if absent.
    /// The flag tells whether it was created.
    pub fn find_or_create(&mut self, name: &str) -> crate::error::Result<(&mut Record, bool)> {
        let record = Record::new(name)?;
        let key = record.name().to_string();
        let created = !self.records.contains_key(&key);
        let entry = self.records.entry(key).or_insert(record);
        Ok((entry, created))
    }

    pub fn delete(&mut self, name: &str) -> bool {
        self.records.remove(name.trim()).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Case-insensitive substring search over name, phones, email and address.
    pub fn search(&self, query: &str) -> Vec<&Record> {
        let query = query.to_lowercase();
        self.records
            .values()
            .filter(|record| {
                record.name().as_str().to_lowercase().contains(&query)
                    || record.phones().iter().any(|p| p.as_str().contains(&query))
                    || record
                        .email()
                        .is_some_and(|e| e.as_str().to_lowercase().contains(&query))
                    || record
                        .address()
                        .is_some_and(|a| a.as_str().to_lowercase().contains(&query))
            })
            .collect()
    }

    /// Birthdays from `today` up to `days` days ahead, inclusive.
    ///
    /// `None` means the default week; negative windows are clamped to today only.
    /// Results are ordered by date, then name.
    pub fn get_upcoming_birthdays(
        &self,
        days: Option<i64>,
        today: NaiveDate,
    ) -> Vec<UpcomingBirthday> {
        let window = days.unwrap_or(DEFAULT_BIRTHDAY_WINDOW).max(0);
        let mut upcoming: Vec<UpcomingBirthday> = self
            .records
            .values()
            .filter_map(|record| {
                let date = record.next_birthday(today)?;
                let days_away = (date - today).num_days();
                (0..=window).contains(&days_away).then(|| UpcomingBirthday {
                    name: record.name().to_string(),
                    date,
                    days_away,
                })
            })
            .collect();
        upcoming.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
        upcoming
    }

    pub fn to_data(&self) -> BTreeMap<String, RecordData> {
        self.records
            .iter()
            .map(|(name, record)| (name.clone(), record.to_data()))
            .collect()
    }

    /// Rebuilds the book from the keyed form. Entries that fail validation are
    /// skipped; a record is always re-keyed by its own name.
    pub fn from_data(data: BTreeMap<String, RecordData>) -> Self {
        Self::from_entries(data.into_iter().map(|(key, data)| (Some(key), data)))
    }

    /// Rebuilds the book from the legacy list-of-records form.
    pub fn from_list(items: Vec<RecordData>) -> Self {
        Self::from_entries(items.into_iter().map(|data| (None, data)))
    }

    pub fn from_document(document: Document) -> Self {
        Self::from_entries(document.entries())
    }

    fn from_entries(entries: impl IntoIterator<Item = (Option<String>, RecordData)>) -> Self {
        let mut book = Self::new();
        for (key, data) in entries {
            match Record::from_data(data, key.as_deref()) {
                Ok(record) => book.add_record(record),
                Err(e) => warn!(key = key.as_deref().unwrap_or("-"), error = %e, "skipping contact"),
            }
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn contact(name: &str, phones: &[&str], birthday: Option<&str>) -> Record {
        let mut record = Record::new(name).unwrap();
        for phone in phones {
            record.add_phone(phone).unwrap();
        }
        if let Some(b) = birthday {
            record.add_birthday(b).unwrap();
        }
        record
    }

    fn book() -> AddressBook {
        let mut book = AddressBook::new();
        book.add_record(contact("Alice", &["0501234567"], Some("12.11.1990")));
        book.add_record(contact("Bob", &[], None));
        book
    }

    #[test]
    fn add_record_replaces_whole_record() {
        let mut book = book();
        book.add_record(contact("Alice", &["999"], None));
        let alice = book.find("Alice").unwrap();
        assert_eq!(alice.phones().len(), 1);
        assert!(alice.birthday().is_none());
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn find_ignores_padding_but_not_case() {
        let book = book();
        assert!(book.find("Alice").is_some());
        assert!(book.find("alice").is_none());
        assert!(book.find(" Alice ").is_some());
    }

    #[test]
    fn delete_reports_presence() {
        let mut book = book();
        assert!(book.delete("Bob"));
        assert!(!book.delete("Bob"));
        assert!(book.delete("\tAlice "));
        assert!(book.is_empty());
    }

    #[test]
    fn find_or_create_only_creates_once() {
        let mut book = AddressBook::new();
        let (_, created) = book.find_or_create("Eve").unwrap();
        assert!(created);
        let (record, created) = book.find_or_create("Eve").unwrap();
        assert!(!created);
        record.add_phone("1").unwrap();
        assert_eq!(book.find("Eve").unwrap().phones().len(), 1);
        assert!(book.find_or_create(" ").is_err());
    }

    #[test]
    fn search_is_case_insensitive_on_name() {
        let book = book();
        let found = book.search("alice");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name().as_str(), "Alice");
    }

    #[test]
    fn search_matches_phone_email_and_address() {
        let mut book = book();
        let bob = book.find_mut("Bob").unwrap();
        bob.add_email("Bob@Example.com").unwrap();
        bob.add_address("Lviv, Rynok Square").unwrap();

        assert_eq!(book.search("1234")[0].name().as_str(), "Alice");
        assert_eq!(book.search("EXAMPLE")[0].name().as_str(), "Bob");
        assert_eq!(book.search("rynok")[0].name().as_str(), "Bob");
        assert!(book.search("zzz").is_empty());
    }

    #[test]
    fn upcoming_birthdays_window_is_inclusive() {
        let book = book();
        let today = date(5, 11, 2025);
        assert!(book.get_upcoming_birthdays(Some(6), today).is_empty());

        let upcoming = book.get_upcoming_birthdays(Some(7), today);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].name, "Alice");
        assert_eq!(upcoming[0].date, date(12, 11, 2025));
        assert_eq!(upcoming[0].days_away, 7);
        assert_eq!(book.get_upcoming_birthdays(None, today), upcoming);
    }

    #[test]
    fn zero_and_negative_windows_mean_today() {
        let book = book();
        let today = date(12, 11, 2025);
        let zero = book.get_upcoming_birthdays(Some(0), today);
        assert_eq!(zero.len(), 1);
        assert_eq!(zero[0].days_away, 0);
        assert_eq!(book.get_upcoming_birthdays(Some(-5), today), zero);
        assert!(book
            .get_upcoming_birthdays(Some(-5), date(11, 11, 2025))
            .is_empty());
    }

    #[test]
    fn upcoming_birthdays_cross_the_year_and_sort_by_date() {
        let mut book = AddressBook::new();
        book.add_record(contact("Zed", &[], Some("02.01.1970")));
        book.add_record(contact("Amy", &[], Some("31.12.1999")));
        book.add_record(contact("Kim", &[], Some("29.02.2000")));

        let upcoming = book.get_upcoming_birthdays(Some(3), date(30, 12, 2025));
        let names: Vec<&str> = upcoming.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Zed"]);
        assert_eq!(upcoming[1].date, date(2, 1, 2026));
    }

    #[test]
    fn data_round_trip_preserves_every_contact() {
        for n in [0usize, 1, 5] {
            let mut book = AddressBook::new();
            for i in 0..n {
                let mut record = contact(&format!("Person {i}"), &["111"], None);
                if i % 2 == 0 {
                    record.add_birthday("01.02.1990").unwrap();
                    record.add_email("p@example.com").unwrap();
                } else {
                    record.add_address("Somewhere 1").unwrap();
                }
                book.add_record(record);
            }
            assert_eq!(AddressBook::from_data(book.to_data()), book);
        }
    }

    #[test]
    fn from_list_rebuilds_keyed_book() {
        let items = vec![
            RecordData {
                name: Some("Alice".into()),
                phones: vec!["0123456789".into()],
                birthday: Some("12.11.1990".into()),
                ..Default::default()
            },
            RecordData {
                name: Some("Bob".into()),
                ..Default::default()
            },
            RecordData::default(),
        ];
        let book = AddressBook::from_list(items);
        assert_eq!(book.len(), 2);
        assert!(book.find("Alice").unwrap().birthday().is_some());
    }

    #[test]
    fn from_data_rekeys_by_record_name() {
        let mut data = BTreeMap::new();
        data.insert(
            "stale key".to_string(),
            RecordData {
                name: Some("Alice".into()),
                ..Default::default()
            },
        );
        let book = AddressBook::from_data(data);
        assert!(book.find("Alice").is_some());
        assert!(book.find("stale key").is_none());
    }

    #[test]
    fn from_document_accepts_legacy_list() {
        let doc = Document::parse(r#"[{"Name": "Alice", "phones": ["1"]}]"#).unwrap();
        let book = AddressBook::from_document(doc);
        assert_eq!(book.find("Alice").unwrap().phones()[0].as_str(), "1");
    }
}
