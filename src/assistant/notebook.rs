use crate::error::{AssistantError, Result};
use crate::note::Note;
use crate::store::schema::{Document, NoteData};
use std::collections::BTreeMap;
use tracing::warn;

/// Notes keyed by title. Titles are case-sensitive and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    notes: BTreeMap<String, Note>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new note. An existing note with the same title is left untouched
    /// and `NoteExists` is returned.
    pub fn add(&mut self, title: &str, content: &str, tags: Vec<String>) -> Result<&Note> {
        if title.trim().is_empty() {
            return Err(AssistantError::validation("Note title cannot be empty."));
        }
        if self.notes.contains_key(title) {
            return Err(AssistantError::NoteExists(title.to_string()));
        }
        let note = Note::new(title.to_string(), content.to_string(), tags);
        let note: &Note = self.notes.entry(title.to_string()).or_insert(note);
        Ok(note)
    }

    pub fn get(&self, title: &str) -> Option<&Note> {
        self.notes.get(title)
    }

    fn get_mut(&mut self, title: &str) -> Result<&mut Note> {
        self.notes
            .get_mut(title)
            .ok_or_else(|| AssistantError::NoteNotFound(title.to_string()))
    }

    pub fn edit(&mut self, title: &str, content: &str) -> Result<&Note> {
        let note = self.get_mut(title)?;
        note.update_content(content.to_string());
        Ok(&*note)
    }

    pub fn add_tag(&mut self, title: &str, tag: &str) -> Result<bool> {
        Ok(self.get_mut(title)?.add_tag(tag))
    }

    pub fn remove_tag(&mut self, title: &str, tag: &str) -> Result<bool> {
        Ok(self.get_mut(title)?.remove_tag(tag))
    }

    pub fn delete(&mut self, title: &str) -> Result<Note> {
        self.notes
            .remove(title)
            .ok_or_else(|| AssistantError::NoteNotFound(title.to_string()))
    }

    /// Case-insensitive substring match against title or content.
    pub fn search(&self, keyword: &str) -> Vec<&Note> {
        let keyword = keyword.to_lowercase();
        self.notes
            .values()
            .filter(|note| {
                note.title().to_lowercase().contains(&keyword)
                    || note.content().to_lowercase().contains(&keyword)
            })
            .collect()
    }

    pub fn search_tag(&self, tag: &str) -> Vec<&Note> {
        self.notes.values().filter(|note| note.has_tag(tag)).collect()
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn to_data(&self) -> BTreeMap<String, NoteData> {
        self.notes
            .iter()
            .map(|(title, note)| (title.clone(), note.to_data()))
            .collect()
    }

    pub fn from_data(data: BTreeMap<String, NoteData>) -> Self {
        Self::from_entries(data.into_iter().map(|(key, data)| (Some(key), data)))
    }

    pub fn from_document(document: Document) -> Self {
        Self::from_entries(document.entries())
    }

    fn from_entries(entries: impl IntoIterator<Item = (Option<String>, NoteData)>) -> Self {
        let mut notebook = Self::new();
        for (key, data) in entries {
            match Note::from_data(data, key.as_deref()) {
                Ok(note) => {
                    notebook.notes.insert(note.title().to_string(), note);
                }
                Err(e) => warn!(key = key.as_deref().unwrap_or("-"), error = %e, "skipping note"),
            }
        }
        notebook
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notebook() -> Notebook {
        let mut notebook = Notebook::new();
        notebook.add("Shopping", "Buy Milk and eggs", vec![]).unwrap();
        notebook
            .add("Ideas", "A CLI for contacts", vec!["work".into()])
            .unwrap();
        notebook
    }

    #[test]
    fn duplicate_title_leaves_original_untouched() {
        let mut notebook = notebook();
        let err = notebook.add("Shopping", "something else", vec![]).unwrap_err();
        assert!(matches!(err, AssistantError::NoteExists(t) if t == "Shopping"));
        assert_eq!(notebook.get("Shopping").unwrap().content(), "Buy Milk and eggs");
        assert_eq!(notebook.len(), 2);
    }

    #[test]
    fn titles_are_case_sensitive() {
        let mut notebook = notebook();
        notebook.add("shopping", "lowercase", vec![]).unwrap();
        assert_eq!(notebook.len(), 3);
        assert!(notebook.get("SHOPPING").is_none());
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut notebook = Notebook::new();
        assert!(matches!(
            notebook.add(" ", "x", vec![]),
            Err(AssistantError::Validation(_))
        ));
    }

    #[test]
    fn edit_and_delete_report_missing_notes() {
        let mut notebook = notebook();
        assert!(matches!(
            notebook.edit("Nope", "x"),
            Err(AssistantError::NoteNotFound(_))
        ));
        assert!(matches!(
            notebook.delete("Nope"),
            Err(AssistantError::NoteNotFound(_))
        ));

        notebook.edit("Ideas", "Rewrite it").unwrap();
        assert_eq!(notebook.get("Ideas").unwrap().content(), "Rewrite it");
        assert_eq!(notebook.delete("Ideas").unwrap().title(), "Ideas");
        assert!(notebook.get("Ideas").is_none());
    }

    #[test]
    fn search_matches_title_or_content_case_insensitively() {
        let notebook = notebook();
        let titles = |notes: Vec<&Note>| -> Vec<String> {
            notes.iter().map(|n| n.title().to_string()).collect()
        };
        assert_eq!(titles(notebook.search("milk")), vec!["Shopping"]);
        assert_eq!(titles(notebook.search("IDEA")), vec!["Ideas"]);
        assert_eq!(titles(notebook.search("i")), vec!["Ideas", "Shopping"]);
        assert!(notebook.search("zzz").is_empty());
    }

    #[test]
    fn tags_can_be_searched_and_edited() {
        let mut notebook = notebook();
        assert!(notebook.add_tag("Shopping", "home").unwrap());
        assert_eq!(notebook.search_tag("HOME").len(), 1);
        assert!(notebook.remove_tag("Shopping", "home").unwrap());
        assert!(notebook.search_tag("home").is_empty());
        assert!(notebook.add_tag("Nope", "x").is_err());
    }

    #[test]
    fn data_round_trip_is_symmetric() {
        let notebook = notebook();
        assert_eq!(Notebook::from_data(notebook.to_data()), notebook);
    }

    #[test]
    fn legacy_list_document_loads() {
        let doc = Document::parse(
            r#"[{"title": "Welcome", "content": "First note", "tags": ["intro", "test"]}]"#,
        )
        .unwrap();
        let notebook = Notebook::from_document(doc);
        assert_eq!(notebook.get("Welcome").unwrap().tags().len(), 2);
    }
}
