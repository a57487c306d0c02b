use crate::address_book::DEFAULT_BIRTHDAY_WINDOW;
use crate::error::{AssistantError, Result};
use crate::fields::FieldPolicy;
use crate::store::fs::{DEFAULT_CONTACTS_FILE, DEFAULT_NOTES_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for the assistant, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssistantConfig {
    /// Contacts document, relative to the data directory
    #[serde(default = "default_contacts_file")]
    pub contacts_file: String,

    /// Notes document, relative to the data directory
    #[serde(default = "default_notes_file")]
    pub notes_file: String,

    /// Days ahead `birthdays` looks when called without an argument
    #[serde(default = "default_birthday_window")]
    pub birthday_window: i64,

    /// Enforce phone and email formats on input
    #[serde(default)]
    pub strict_validation: bool,
}

fn default_contacts_file() -> String {
    DEFAULT_CONTACTS_FILE.to_string()
}

fn default_notes_file() -> String {
    DEFAULT_NOTES_FILE.to_string()
}

fn default_birthday_window() -> i64 {
    DEFAULT_BIRTHDAY_WINDOW
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            contacts_file: default_contacts_file(),
            notes_file: default_notes_file(),
            birthday_window: DEFAULT_BIRTHDAY_WINDOW,
            strict_validation: false,
        }
    }
}

impl AssistantConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(AssistantError::Io)?;
        let config: AssistantConfig =
            serde_json::from_str(&content).map_err(AssistantError::Serialization)?;
        Ok(config)
    }

    /// Like [`AssistantConfig::load`], but writes the defaults out first when the
    /// directory has no config file yet, so there is one to edit.
    pub fn load_or_init<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        if config_dir.join(CONFIG_FILENAME).exists() {
            return Self::load(config_dir);
        }
        let config = Self::default();
        config.save(config_dir)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(AssistantError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(AssistantError::Serialization)?;
        fs::write(config_path, content).map_err(AssistantError::Io)?;
        Ok(())
    }

    pub fn field_policy(&self) -> FieldPolicy {
        if self.strict_validation {
            FieldPolicy::Strict
        } else {
            FieldPolicy::Permissive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AssistantConfig::default();
        assert_eq!(config.contacts_file, "contacts.json");
        assert_eq!(config.birthday_window, 7);
        assert_eq!(config.field_policy(), FieldPolicy::Permissive);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = AssistantConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, AssistantConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"strict_validation": true}"#,
        )
        .unwrap();

        let config = AssistantConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.field_policy(), FieldPolicy::Strict);
        assert_eq!(config.notes_file, "notes.json");
    }

    #[test]
    fn test_load_or_init_writes_defaults_once() {
        let temp_dir = TempDir::new().unwrap();
        let config = AssistantConfig::load_or_init(temp_dir.path()).unwrap();
        assert_eq!(config, AssistantConfig::default());

        let path = temp_dir.path().join(CONFIG_FILENAME);
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"birthday_window\": 7"));

        fs::write(&path, r#"{"birthday_window": 3}"#).unwrap();
        let config = AssistantConfig::load_or_init(temp_dir.path()).unwrap();
        assert_eq!(config.birthday_window, 3);
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"birthday_window": 3}"#);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested");

        let config = AssistantConfig {
            birthday_window: 30,
            ..Default::default()
        };
        config.save(&dir).unwrap();

        let loaded = AssistantConfig::load(&dir).unwrap();
        assert_eq!(loaded, config);
    }
}
