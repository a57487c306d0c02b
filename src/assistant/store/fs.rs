use super::{Collection, DataStore};
use crate::error::{AssistantError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_CONTACTS_FILE: &str = "contacts.json";
pub const DEFAULT_NOTES_FILE: &str = "notes.json";
const EMPTY_DOCUMENT: &str = "{}";

pub struct FileStore {
    root: PathBuf,
    contacts_file: String,
    notes_file: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            contacts_file: DEFAULT_CONTACTS_FILE.to_string(),
            notes_file: DEFAULT_NOTES_FILE.to_string(),
        }
    }

    pub fn with_files(mut self, contacts_file: &str, notes_file: &str) -> Self {
        self.contacts_file = contacts_file.to_string();
        self.notes_file = notes_file.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, collection: Collection) -> PathBuf {
        match collection {
            Collection::Contacts => self.root.join(&self.contacts_file),
            Collection::Notes => self.root.join(&self.notes_file),
        }
    }

    fn ensure_parent(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(AssistantError::Io)?;
            }
        }
        Ok(())
    }

    // Write to a sibling temp file, then rename over the target.
    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        self.ensure_parent(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AssistantError::Store(format!("Invalid path: {}", path.display())))?;
        let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));
        fs::write(&tmp_path, content).map_err(AssistantError::Io)?;
        fs::rename(&tmp_path, path).map_err(AssistantError::Io)?;
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load(&mut self, collection: Collection) -> Result<String> {
        let path = self.path(collection);
        if !path.exists() {
            debug!(path = %path.display(), "creating empty document");
            self.write_atomic(&path, EMPTY_DOCUMENT)?;
            return Ok(EMPTY_DOCUMENT.to_string());
        }
        fs::read_to_string(&path).map_err(AssistantError::Io)
    }

    fn save(&mut self, collection: Collection, document: &str) -> Result<()> {
        let path = self.path(collection);
        self.write_atomic(&path, document)?;
        debug!(path = %path.display(), bytes = document.len(), "saved document");
        Ok(())
    }

    fn quarantine(&mut self, collection: Collection) -> Result<()> {
        let path = self.path(collection);
        if !path.exists() {
            return Ok(());
        }
        let target = quarantine_target(&path);
        fs::rename(&path, &target).map_err(AssistantError::Io)?;
        warn!(from = %path.display(), to = %target.display(), "moved unreadable document aside");
        Ok(())
    }
}

// `<file>.corrupt`, or `<file>.corrupt.N` when earlier ones are still around.
fn quarantine_target(path: &Path) -> PathBuf {
    let with_suffix = |suffix: String| {
        let mut target = path.as_os_str().to_owned();
        target.push(suffix);
        PathBuf::from(target)
    };
    let first = with_suffix(".corrupt".to_string());
    if !first.exists() {
        return first;
    }
    (1..)
        .map(|n| with_suffix(format!(".corrupt.{}", n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn load_creates_missing_file_with_empty_document() {
        let (_dir, mut store) = setup();
        assert_eq!(store.load(Collection::Contacts).unwrap(), "{}");
        let on_disk = fs::read_to_string(store.path(Collection::Contacts)).unwrap();
        assert_eq!(on_disk, "{}");
        assert!(!store.path(Collection::Notes).exists());
    }

    #[test]
    fn save_overwrites_whole_document_without_leftovers() {
        let (_dir, mut store) = setup();
        store.save(Collection::Notes, r#"{"a": 1}"#).unwrap();
        store.save(Collection::Notes, r#"{"b": 2}"#).unwrap();
        assert_eq!(store.load(Collection::Notes).unwrap(), r#"{"b": 2}"#);

        for entry in fs::read_dir(store.root()).unwrap() {
            let name = entry.unwrap().file_name();
            let name = name.to_str().unwrap();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn quarantine_moves_file_aside() {
        let (_dir, mut store) = setup();
        store.save(Collection::Contacts, "{broken").unwrap();
        store.quarantine(Collection::Contacts).unwrap();

        let corrupt = store.root().join("contacts.json.corrupt");
        assert_eq!(fs::read_to_string(corrupt).unwrap(), "{broken");
        assert!(!store.path(Collection::Contacts).exists());
    }

    #[test]
    fn quarantine_keeps_earlier_copies() {
        let (_dir, mut store) = setup();
        store.save(Collection::Notes, "first").unwrap();
        store.quarantine(Collection::Notes).unwrap();
        store.save(Collection::Notes, "second").unwrap();
        store.quarantine(Collection::Notes).unwrap();

        let root = store.root();
        assert_eq!(fs::read_to_string(root.join("notes.json.corrupt")).unwrap(), "first");
        assert_eq!(fs::read_to_string(root.join("notes.json.corrupt.1")).unwrap(), "second");
    }

    #[test]
    fn custom_file_names_are_used() {
        let (_dir, mut store) = setup();
        store = store.with_files("people.json", "memos.json");
        store.save(Collection::Contacts, "{}").unwrap();
        assert!(store.root().join("people.json").exists());
        assert_eq!(store.path(Collection::Notes), store.root().join("memos.json"));
    }
}
