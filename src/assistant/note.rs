use crate::error::{AssistantError, Result};
use crate::store::schema::NoteData;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    title: String,
    content: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(title: String, content: String, tags: Vec<String>) -> Self {
        let now = Utc::now();
        let mut note = Self {
            title,
            content,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        for tag in tags {
            note.push_tag(tag);
        }
        note
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn update_content(&mut self, content: String) {
        self.content = content;
        self.touch();
    }

    /// Adds a tag unless already present. Returns whether the note changed.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let added = self.push_tag(tag.to_string());
        if added {
            self.touch();
        }
        added
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        let removed = self.tags.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }

    fn push_tag(&mut self, tag: String) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    // Never moves backwards, even if the wall clock does.
    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }

    pub fn to_data(&self) -> NoteData {
        NoteData {
            title: Some(self.title.clone()),
            content: self.content.clone(),
            tags: self.tags.clone(),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    pub fn from_data(data: NoteData, key: Option<&str>) -> Result<Self> {
        let title = data
            .title
            .or_else(|| key.map(str::to_string))
            .ok_or_else(|| AssistantError::validation("Note has no title."))?;
        let mut note = Note::new(title, data.content, data.tags);
        if let Some(created_at) = data.created_at {
            note.created_at = created_at;
            note.updated_at = created_at;
        }
        if let Some(updated_at) = data.updated_at {
            note.updated_at = updated_at;
        }
        Ok(note)
    }
}
