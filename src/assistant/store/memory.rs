use super::{Collection, DataStore};
use crate::error::Result;
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: HashMap<Collection, String>,
    quarantined: Vec<Collection>,
    set_aside: HashMap<Collection, String>,
    saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, collection: Collection, document: &str) -> Self {
        self.documents.insert(collection, document.to_string());
        self
    }

    pub fn document(&self, collection: Collection) -> Option<&str> {
        self.documents.get(&collection).map(String::as_str)
    }

    pub fn quarantined(&self) -> &[Collection] {
        &self.quarantined
    }

    /// The last document moved aside for `collection`.
    pub fn quarantined_document(&self, collection: Collection) -> Option<&str> {
        self.set_aside.get(&collection).map(String::as_str)
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl DataStore for InMemoryStore {
    fn load(&mut self, collection: Collection) -> Result<String> {
        Ok(self
            .documents
            .entry(collection)
            .or_insert_with(|| "{}".to_string())
            .clone())
    }

    fn save(&mut self, collection: Collection, document: &str) -> Result<()> {
        self.documents.insert(collection, document.to_string());
        self.saves += 1;
        Ok(())
    }

    fn quarantine(&mut self, collection: Collection) -> Result<()> {
        if let Some(document) = self.documents.remove(&collection) {
            self.set_aside.insert(collection, document);
        }
        self.quarantined.push(collection);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::address_book::AddressBook;
    use crate::notebook::Notebook;
    use crate::record::Record;
    use crate::store::{save_address_book, save_notebook};

    /// Builds an [`InMemoryStore`] pre-populated with contacts and notes.
    #[derive(Default)]
    pub struct StoreFixture {
        book: AddressBook,
        notebook: Notebook,
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_contact(mut self, name: &str, phones: &[&str], birthday: Option<&str>) -> Self {
            let mut record = Record::new(name).unwrap();
            for phone in phones {
                record.add_phone(phone).unwrap();
            }
            if let Some(b) = birthday {
                record.add_birthday(b).unwrap();
            }
            self.book.add_record(record);
            self
        }

        pub fn with_note(mut self, title: &str, content: &str, tags: &[&str]) -> Self {
            let tags = tags.iter().map(|t| t.to_string()).collect();
            self.notebook.add(title, content, tags).unwrap();
            self
        }

        pub fn build(self) -> InMemoryStore {
            let mut store = InMemoryStore::new();
            save_address_book(&mut store, &self.book).unwrap();
            save_notebook(&mut store, &self.notebook).unwrap();
            store.saves = 0;
            store
        }
    }
}
