/// Palette data model
///
/// Commands are rebuilt on every query. Only `id` carries identity between runs.

use serde::{Deserialize, Serialize};

/// Group label reserved for recency entries. Enables the column axis.
pub const RECENT_GROUP: &str = "recent";

/// What kind of thing a palette row points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandType {
    StaticCommand,
    DynamicCommand,
    Note,
    Notebook,
    Tag,
    Reminder,
}

impl CommandType {
    /// Every variant, in dispatch table order
    pub const ALL: [CommandType; 6] = [
        CommandType::StaticCommand,
        CommandType::DynamicCommand,
        CommandType::Note,
        CommandType::Notebook,
        CommandType::Tag,
        CommandType::Reminder,
    ];

    /// True for the two registry-backed variants
    pub fn is_registry(&self) -> bool {
        matches!(self, CommandType::StaticCommand | CommandType::DynamicCommand)
    }
}

impl std::fmt::Display for CommandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CommandType::StaticCommand => "static-command",
            CommandType::DynamicCommand => "dynamic-command",
            CommandType::Note => "note",
            CommandType::Notebook => "notebook",
            CommandType::Tag => "tag",
            CommandType::Reminder => "reminder",
        };
        write!(f, "{}", s)
    }
}

/// A search result or actionable palette entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: String,
    pub title: String,
    /// Title with matched runs wrapped in highlight markers. Never persisted.
    #[serde(skip)]
    pub highlighted_title: Option<String>,
    #[serde(rename = "type")]
    pub kind: CommandType,
    pub group: String,
}

impl Command {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: CommandType,
        group: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            highlighted_title: None,
            kind,
            group: group.into(),
        }
    }

    pub fn is_recent(&self) -> bool {
        self.group == RECENT_GROUP
    }

    /// Text a renderer should show: the highlighted title when present
    pub fn display_title(&self) -> &str {
        self.highlighted_title.as_deref().unwrap_or(&self.title)
    }

    /// Copy of this command as it is stored in the recency cache
    pub fn to_recent(&self) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            highlighted_title: None,
            kind: self.kind,
            group: RECENT_GROUP.to_string(),
        }
    }
}
