/// Query classification
///
/// Splits raw palette input into a mode and a prepared query.

/// Leading character that switches the palette into command mode
pub const COMMAND_SENTINEL: char = '>';

/// Which backend a query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Static command registry, in memory
    Command,
    /// Notes, notebooks, tags and reminders, via the entity lookups
    Search,
}

/// Result of classifying raw input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedQuery {
    pub mode: Mode,
    pub prepared: String,
}

impl ClassifiedQuery {
    pub fn is_empty(&self) -> bool {
        self.prepared.is_empty()
    }
}

/// Classify raw input. Every string is valid.
pub fn classify(raw: &str) -> ClassifiedQuery {
    match raw.strip_prefix(COMMAND_SENTINEL) {
        Some(rest) => ClassifiedQuery {
            mode: Mode::Command,
            prepared: rest.trim().to_string(),
        },
        None => ClassifiedQuery {
            mode: Mode::Search,
            prepared: raw.trim().to_string(),
        },
    }
}
