//! # On-disk document shapes
//!
//! Both collections persist as one JSON document keyed by record name (contacts)
//! or title (notes). Older files hold a JSON array of records instead. [`Document`]
//! detects which shape it got; the collections normalize either one into their
//! keyed runtime form and always write the keyed shape back.
//!
//! Entries are decoded one by one so that a single malformed record is skipped
//! with a warning rather than taking the whole file down with it.

use crate::error::{AssistantError, Result};
use crate::store::timestamp;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// A contact as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordData {
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phones: Vec<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// A note as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Keyed,
    Legacy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Document {
    Keyed(BTreeMap<String, Value>),
    Legacy(Vec<Value>),
}

impl Document {
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Document::Keyed(BTreeMap::new()));
        }
        serde_json::from_str(text).map_err(AssistantError::Serialization)
    }

    pub fn shape(&self) -> Shape {
        match self {
            Document::Keyed(_) => Shape::Keyed,
            Document::Legacy(_) => Shape::Legacy,
        }
    }

    /// Number of raw entries, before any of them is decoded.
    pub fn len(&self) -> usize {
        match self {
            Document::Keyed(map) => map.len(),
            Document::Legacy(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decodes every entry, pairing each with its document key when there is one.
    pub fn entries<T: DeserializeOwned>(self) -> Vec<(Option<String>, T)> {
        match self {
            Document::Keyed(map) => map
                .into_iter()
                .filter_map(|(key, value)| decode(value, &key).map(|data| (Some(key), data)))
                .collect(),
            Document::Legacy(items) => items
                .into_iter()
                .enumerate()
                .filter_map(|(i, value)| decode(value, &format!("#{}", i)).map(|data| (None, data)))
                .collect(),
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value, label: &str) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(data) => Some(data),
        Err(e) => {
            warn!(entry = label, error = %e, "skipping malformed entry");
            None
        }
    }
}

pub fn to_json<T: Serialize>(entries: &BTreeMap<String, T>) -> Result<String> {
    serde_json::to_string_pretty(entries).map_err(AssistantError::Serialization)
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
