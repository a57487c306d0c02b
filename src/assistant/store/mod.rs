//! # Storage Layer
//!
//! The assistant keeps two independent documents, one per [`Collection`]. The
//! [`DataStore`] trait treats each as an opaque text blob: read it whole at startup,
//! write it whole at every checkpoint. There is no incremental update and no
//! locking; the last full write wins.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one JSON file per collection under the data directory.
//!   A missing file is created holding an empty document.
//! - [`memory::InMemoryStore`]: for testing without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── config.json     # Optional configuration
//! ├── contacts.json   # { "<name>": { name, phones, birthday, email, address } }
//! └── notes.json      # { "<title>": { title, content, tags, created_at, updated_at } }
//! ```
//!
//! Decoding lives in [`schema`]; the helpers below glue the blob store to the
//! collections and decide what happens when a document cannot be parsed.

use crate::address_book::AddressBook;
use crate::error::Result;
use crate::notebook::Notebook;
use schema::Document;
use std::fmt;
use tracing::{debug, warn};

pub mod fs;
pub mod memory;
pub mod schema;
pub mod timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Contacts,
    Notes,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Contacts => f.write_str("contacts"),
            Collection::Notes => f.write_str("notes"),
        }
    }
}

/// Whole-document persistence for one collection at a time.
pub trait DataStore {
    /// Returns the stored document, creating an empty one first if none exists.
    fn load(&mut self, collection: Collection) -> Result<String>;

    /// Replaces the stored document.
    fn save(&mut self, collection: Collection, document: &str) -> Result<()>;

    /// Moves an unreadable document out of the way so the next save cannot
    /// overwrite it.
    fn quarantine(&mut self, collection: Collection) -> Result<()>;
}

pub fn load_address_book<S: DataStore>(store: &mut S) -> Result<AddressBook> {
    let Some(document) = load_document(store, Collection::Contacts)? else {
        return Ok(AddressBook::default());
    };
    let entries = document.len();
    let book = AddressBook::from_document(document);
    keep_original_if_lossy(store, Collection::Contacts, entries, book.len())?;
    Ok(book)
}

pub fn load_notebook<S: DataStore>(store: &mut S) -> Result<Notebook> {
    let Some(document) = load_document(store, Collection::Notes)? else {
        return Ok(Notebook::default());
    };
    let entries = document.len();
    let notebook = Notebook::from_document(document);
    keep_original_if_lossy(store, Collection::Notes, entries, notebook.len())?;
    Ok(notebook)
}

pub fn save_address_book<S: DataStore>(store: &mut S, book: &AddressBook) -> Result<()> {
    let json = schema::to_json(&book.to_data())?;
    store.save(Collection::Contacts, &json)
}

pub fn save_notebook<S: DataStore>(store: &mut S, notebook: &Notebook) -> Result<()> {
    let json = schema::to_json(&notebook.to_data())?;
    store.save(Collection::Notes, &json)
}

fn load_document<S: DataStore>(store: &mut S, collection: Collection) -> Result<Option<Document>> {
    let text = store.load(collection)?;
    match Document::parse(&text) {
        Ok(document) => {
            debug!(%collection, shape = ?document.shape(), "loaded document");
            Ok(Some(document))
        }
        Err(e) => {
            warn!(%collection, error = %e, "unreadable document, starting empty");
            store.quarantine(collection)?;
            Ok(None)
        }
    }
}

// A checkpoint writes back only what was loaded. When entries were dropped on
// the way in, the original document is set aside first so nothing is lost.
fn keep_original_if_lossy<S: DataStore>(
    store: &mut S,
    collection: Collection,
    entries: usize,
    loaded: usize,
) -> Result<()> {
    if loaded < entries {
        warn!(
            %collection,
            skipped = entries - loaded,
            "some entries could not be loaded, keeping the original document aside"
        );
        store.quarantine(collection)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryStore;
    use super::*;
    use crate::record::Record;

    #[test]
    fn missing_documents_load_empty_and_are_created() {
        let mut store = InMemoryStore::new();
        assert!(load_address_book(&mut store).unwrap().is_empty());
        assert!(load_notebook(&mut store).unwrap().is_empty());
        assert_eq!(store.document(Collection::Contacts), Some("{}"));
    }

    #[test]
    fn legacy_contacts_are_rewritten_keyed() {
        let mut store = InMemoryStore::new().with_document(
            Collection::Contacts,
            r#"[{"name": "Alice", "phones": ["0123456789"], "birthday": "12.11.1990"},
                {"name": "Bob", "phones": ["0987654321"], "birthday": null}]"#,
        );
        let book = load_address_book(&mut store).unwrap();
        save_address_book(&mut store, &book).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(store.document(Collection::Contacts).unwrap()).unwrap();
        assert!(saved.is_object());
        assert_eq!(saved["Alice"]["birthday"], "12.11.1990");
        assert_eq!(saved["Bob"]["phones"][0], "0987654321");
    }

    #[test]
    fn corrupt_document_is_quarantined() {
        let mut store = InMemoryStore::new().with_document(Collection::Notes, "{oops");
        assert!(load_notebook(&mut store).unwrap().is_empty());
        assert_eq!(store.quarantined(), &[Collection::Notes]);
        assert_eq!(store.quarantined_document(Collection::Notes), Some("{oops"));
    }

    #[test]
    fn skipped_contact_survives_checkpoint() {
        let original = r#"{
            "Alice": {"name": "Alice", "phones": ["111"], "birthday": "1990-01-12"},
            "Bob": {"name": "Bob", "phones": ["222"], "birthday": null}
        }"#;
        let mut store = InMemoryStore::new().with_document(Collection::Contacts, original);
        let book = load_address_book(&mut store).unwrap();
        assert_eq!(book.len(), 1);
        assert!(book.find("Bob").is_some());

        save_address_book(&mut store, &book).unwrap();
        assert_eq!(store.quarantined(), &[Collection::Contacts]);
        let kept = store.quarantined_document(Collection::Contacts).unwrap();
        assert!(kept.contains("1990-01-12"));
        assert!(kept.contains("\"Alice\""));
        assert!(!store.document(Collection::Contacts).unwrap().contains("Alice"));
    }

    #[test]
    fn skipped_note_survives_checkpoint() {
        let original = r#"{
            "Todo": {"title": "Todo", "content": "milk", "tags": ["home"]},
            "Broken": {"title": "Broken", "content": "x", "tags": 5}
        }"#;
        let mut store = InMemoryStore::new().with_document(Collection::Notes, original);
        let notebook = load_notebook(&mut store).unwrap();
        assert_eq!(notebook.len(), 1);

        save_notebook(&mut store, &notebook).unwrap();
        let kept = store.quarantined_document(Collection::Notes).unwrap();
        assert!(kept.contains("Broken"));
    }

    #[test]
    fn clean_documents_are_not_set_aside() {
        let mut store = InMemoryStore::new().with_document(
            Collection::Contacts,
            r#"{"Bob": {"name": "Bob", "phones": ["222"]}}"#,
        );
        load_address_book(&mut store).unwrap();
        assert!(store.quarantined().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = InMemoryStore::new();
        let mut book = AddressBook::new();
        let mut record = Record::new("Alice").unwrap();
        record.add_phone("0501234567").unwrap();
        record.add_email("alice@example.com").unwrap();
        book.add_record(record);
        book.add_record(Record::new("Bob").unwrap());

        save_address_book(&mut store, &book).unwrap();
        assert_eq!(load_address_book(&mut store).unwrap(), book);
        assert_eq!(store.save_count(), 1);
    }
}
