use crate::note::Note;
use crate::record::{or_unspecified, Record};
use chrono::{DateTime, Utc};
use timeago::Formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Phones,
    Birthday,
    Email,
    Address,
}

impl ContactField {
    pub const ALL: &'static [ContactField] = &[
        ContactField::Phones,
        ContactField::Birthday,
        ContactField::Email,
        ContactField::Address,
    ];
}

/// A `Name:` line followed by one line per requested field.
pub fn contact_block(record: &Record, fields: &[ContactField]) -> String {
    let mut lines = vec![format!("Name: {}", record.name())];
    for field in fields {
        lines.push(match field {
            ContactField::Phones => format!("Phones: {}", phones(record)),
            ContactField::Birthday => format!("Birthday: {}", or_unspecified(record.birthday())),
            ContactField::Email => format!("Email: {}", or_unspecified(record.email())),
            ContactField::Address => format!("Address: {}", or_unspecified(record.address())),
        });
    }
    lines.join("\n")
}

pub fn contact_blocks<'a>(records: impl IntoIterator<Item = &'a Record>) -> String {
    records
        .into_iter()
        .map(|r| contact_block(r, ContactField::ALL))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn phones(record: &Record) -> String {
    if record.phones().is_empty() {
        return "no phone numbers".to_string();
    }
    record
        .phones()
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn note_block(note: &Note, now: DateTime<Utc>) -> String {
    let mut out = note.title().to_string();
    if !note.tags().is_empty() {
        out.push_str(&format!(" [Tags: {}]", note.tags().join(", ")));
    }
    if !note.content().is_empty() {
        out.push('\n');
        out.push_str(note.content());
    }
    out.push_str(&format!(
        "\nCreated: {} | updated {}",
        note.created_at().format("%Y-%m-%d"),
        time_ago(note.updated_at(), now)
    ));
    out
}

pub fn note_blocks<'a>(notes: impl IntoIterator<Item = &'a Note>, now: DateTime<Utc>) -> String {
    notes
        .into_iter()
        .map(|n| note_block(n, now))
        .collect::<Vec<_>>()
        .join(&format!("\n{}\n", "-".repeat(40)))
}

fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn contact_block_lists_requested_fields_only() {
        let mut record = Record::new("Alice").unwrap();
        record.add_phone("111").unwrap();
        record.add_phone("222").unwrap();

        assert_eq!(
            contact_block(&record, &[ContactField::Phones]),
            "Name: Alice\nPhones: 111; 222"
        );
        assert_eq!(
            contact_block(&record, &[ContactField::Birthday]),
            "Name: Alice\nBirthday: not specified"
        );
    }

    #[test]
    fn full_block_has_every_field() {
        let record = Record::new("Bob").unwrap();
        assert_eq!(
            contact_block(&record, ContactField::ALL),
            "Name: Bob\nPhones: no phone numbers\nBirthday: not specified\n\
             Email: not specified\nAddress: not specified"
        );
    }

    #[test]
    fn note_block_shows_tags_and_age() {
        let note = Note::new("Todo".into(), "buy milk".into(), vec!["home".into()]);
        let block = note_block(&note, note.updated_at() + Duration::hours(2));
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines[0], "Todo [Tags: home]");
        assert_eq!(lines[1], "buy milk");
        assert!(lines[2].starts_with("Created: "));
        assert!(lines[2].ends_with("2 hours ago"));
    }
}
