/// Error types for command-palette
///
/// This module defines all possible errors that can occur in the palette core.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for palette operations
#[derive(Error, Debug)]
pub enum PaletteError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// One of the entity lookups failed
    #[error("Entity search error: {0}")]
    EntitySearch(String),

    /// Key-value store rejected a read or write
    #[error("Store error: {0}")]
    Store(String),

    /// Unknown entity kind given on the command line or in the index
    #[error("Unknown entity kind: {0}")]
    UnknownKind(String),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for palette operations
pub type Result<T> = std::result::Result<T, PaletteError>;

/// Convert PaletteError to a user-friendly error message
impl PaletteError {
    pub fn user_message(&self) -> String {
        match self {
            PaletteError::Database(e) => {
                format!("Database error occurred. Please try again. Details: {}", e)
            }
            PaletteError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            PaletteError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            PaletteError::ConfigParse(e) => {
                format!("Could not read config file: {}", e)
            }
            PaletteError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            PaletteError::EntitySearch(msg) => {
                format!("Search failed: {}", msg)
            }
            PaletteError::Store(msg) => {
                format!("Could not save palette state: {}", msg)
            }
            PaletteError::UnknownKind(kind) => {
                format!(
                    "'{}' is not one of: note, notebook, tag, reminder",
                    kind
                )
            }
            PaletteError::Generic(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = PaletteError::UnknownKind("folder".to_string());
        assert!(err.user_message().contains("folder"));

        let err = PaletteError::Store("disk full".to_string());
        assert!(err.user_message().contains("disk full"));
    }

    #[test]
    fn test_error_display() {
        let err = PaletteError::EntitySearch("tags offline".to_string());
        let display = format!("{}", err);
        assert!(display.contains("Entity search error"));
    }
}
