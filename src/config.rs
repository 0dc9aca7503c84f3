/// Palette configuration
///
/// Read from `<config_dir>/command-palette/config.toml`. Every field has a
/// default, so a missing file or a partial file both work.

use crate::core::command::CommandType;
use crate::error::{PaletteError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "command-palette";

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PaletteConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub labels: GroupLabels,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchConfig {
    /// Delay before an entity search fires, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Max results per entity lookup
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_debounce_ms() -> u64 { 250 }
fn default_limit() -> i64 { 50 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            limit: default_limit(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Localized group labels for entity results
#[derive(Deserialize, Debug, Clone)]
pub struct GroupLabels {
    #[serde(default = "default_notes")]
    pub notes: String,
    #[serde(default = "default_notebooks")]
    pub notebooks: String,
    #[serde(default = "default_tags")]
    pub tags: String,
    #[serde(default = "default_reminders")]
    pub reminders: String,
    /// Display label for the recency group. The group value itself stays `recent`.
    #[serde(default = "default_recent")]
    pub recent: String,
}

fn default_notes() -> String { "Notes".to_string() }
fn default_notebooks() -> String { "Notebooks".to_string() }
fn default_tags() -> String { "Tags".to_string() }
fn default_reminders() -> String { "Reminders".to_string() }
fn default_recent() -> String { "Recently used".to_string() }

impl Default for GroupLabels {
    fn default() -> Self {
        Self {
            notes: default_notes(),
            notebooks: default_notebooks(),
            tags: default_tags(),
            reminders: default_reminders(),
            recent: default_recent(),
        }
    }
}

impl GroupLabels {
    /// Group label for an entity type. Registry commands carry their own groups.
    pub fn for_type(&self, kind: CommandType) -> Option<&str> {
        match kind {
            CommandType::Note => Some(self.notes.as_str()),
            CommandType::Notebook => Some(self.notebooks.as_str()),
            CommandType::Tag => Some(self.tags.as_str()),
            CommandType::Reminder => Some(self.reminders.as_str()),
            CommandType::StaticCommand | CommandType::DynamicCommand => None,
        }
    }
}

/// Markers wrapped around matched runs in search results
#[derive(Deserialize, Debug, Clone)]
pub struct HighlightConfig {
    #[serde(default = "default_open")]
    pub open: String,
    #[serde(default = "default_close")]
    pub close: String,
}

fn default_open() -> String { "<mark>".to_string() }
fn default_close() -> String { "</mark>".to_string() }

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            open: default_open(),
            close: default_close(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

impl PaletteConfig {
    /// Load from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: PaletteConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Database file: the configured path, else the platform data dir
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR).join("palette.db"))
            .ok_or_else(|| PaletteError::Config("Could not determine data directory".to_string()))
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PaletteConfig::load_from(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.highlight.open, "<mark>");
        assert_eq!(config.labels.for_type(CommandType::Tag), Some("Tags"));
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[search]\ndebounce_ms = 10\n\n[labels]\nnotes = \"Notizen\"").unwrap();

        let config = PaletteConfig::load_from(file.path()).unwrap();
        assert_eq!(config.search.debounce(), Duration::from_millis(10));
        assert_eq!(config.search.limit, 50);
        assert_eq!(config.labels.for_type(CommandType::Note), Some("Notizen"));
        assert_eq!(config.labels.notebooks, "Notebooks");
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[search\ndebounce_ms = ").unwrap();

        let result = PaletteConfig::load_from(file.path());
        assert!(matches!(result, Err(PaletteError::ConfigParse(_))));
    }

    #[test]
    fn test_registry_types_have_no_label() {
        let labels = GroupLabels::default();
        assert_eq!(labels.for_type(CommandType::StaticCommand), None);
    }

    #[test]
    fn test_configured_database_path() {
        let mut config = PaletteConfig::default();
        config.database.path = Some(PathBuf::from("/tmp/p.db"));
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/p.db"));
    }
}
