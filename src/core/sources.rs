/// Candidate sources
///
/// Gathers unranked palette candidates from the command registry, the open
/// sessions, or the four entity lookups, depending on the query.

use crate::config::GroupLabels;
use crate::core::command::{Command, CommandType};
use crate::core::query::{ClassifiedQuery, Mode};
use crate::core::registry::CommandRegistry;
use crate::error::{PaletteError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Entity families the lookups cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Note,
    Notebook,
    Tag,
    Reminder,
}

impl EntityKind {
    /// Lookup order; also the order results are concatenated in
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Note,
        EntityKind::Notebook,
        EntityKind::Tag,
        EntityKind::Reminder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Note => "note",
            EntityKind::Notebook => "notebook",
            EntityKind::Tag => "tag",
            EntityKind::Reminder => "reminder",
        }
    }

    pub fn command_type(&self) -> CommandType {
        match self {
            EntityKind::Note => CommandType::Note,
            EntityKind::Notebook => CommandType::Notebook,
            EntityKind::Tag => CommandType::Tag,
            EntityKind::Reminder => CommandType::Reminder,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "note" => Ok(EntityKind::Note),
            "notebook" => Ok(EntityKind::Notebook),
            "tag" => Ok(EntityKind::Tag),
            "reminder" => Ok(EntityKind::Reminder),
            other => Err(PaletteError::UnknownKind(other.to_string())),
        }
    }
}

/// Options passed to every entity lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    /// Match titles only. The palette always sets it; backends that can't
    /// search anything else may refuse a lookup without it.
    pub title_only: bool,
    pub limit: i64,
}

/// One entity returned by a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityHit {
    pub id: String,
    pub title: String,
}

impl EntityHit {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Title lookups over notes, notebooks, tags and reminders
#[allow(async_fn_in_trait)]
pub trait EntitySearch {
    async fn search_notes(&self, query: &str, opts: LookupOptions) -> Result<Vec<EntityHit>>;
    async fn search_notebooks(&self, query: &str, opts: LookupOptions) -> Result<Vec<EntityHit>>;
    async fn search_tags(&self, query: &str, opts: LookupOptions) -> Result<Vec<EntityHit>>;
    async fn search_reminders(&self, query: &str, opts: LookupOptions) -> Result<Vec<EntityHit>>;
}

/// Whether an open session has been saved yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Not persisted yet; never listed
    New,
    Existing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionNote {
    pub id: String,
    pub title: String,
}

/// A note currently open in the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSession {
    pub id: String,
    pub note: SessionNote,
    pub kind: SessionKind,
}

pub trait OpenSessions {
    fn open_sessions(&self) -> Vec<OpenSession>;
}

impl OpenSessions for Vec<OpenSession> {
    fn open_sessions(&self) -> Vec<OpenSession> {
        self.clone()
    }
}

/// Builds candidate lists from the registry and the external collaborators
pub struct SourceAggregator<E, O> {
    registry: Arc<CommandRegistry>,
    entities: E,
    sessions: O,
    labels: GroupLabels,
    limit: i64,
}

impl<E: EntitySearch, O: OpenSessions> SourceAggregator<E, O> {
    pub fn new(
        registry: Arc<CommandRegistry>,
        entities: E,
        sessions: O,
        labels: GroupLabels,
        limit: i64,
    ) -> Self {
        Self {
            registry,
            entities,
            sessions,
            labels,
            limit,
        }
    }

    /// Candidates for a classified query, recency entries not included
    pub async fn gather(&self, query: &ClassifiedQuery) -> Vec<Command> {
        let candidates = match query.mode {
            Mode::Command => self.registry.resolve(),
            Mode::Search if query.is_empty() => self.session_commands(),
            Mode::Search => self.entity_commands(&query.prepared).await,
        };

        debug!(
            "Gathered {} candidates for {:?} query '{}'",
            candidates.len(),
            query.mode,
            query.prepared
        );
        candidates
    }

    /// Palette contents before the first keystroke
    pub fn initial(&self, recent: Vec<Command>) -> Vec<Command> {
        let mut candidates = recent;
        candidates.extend(self.registry.resolve());
        candidates
    }

    /// Saved open sessions as note commands
    pub fn session_commands(&self) -> Vec<Command> {
        let group = self.label_for(CommandType::Note);

        self.sessions
            .open_sessions()
            .into_iter()
            .filter(|session| session.kind != SessionKind::New)
            .map(|session| {
                Command::new(session.note.id, session.note.title, CommandType::Note, group.clone())
            })
            .collect()
    }

    /// Run all four lookups concurrently and concatenate in kind order
    ///
    /// A failing lookup contributes nothing; the others still show up.
    pub async fn entity_commands(&self, query: &str) -> Vec<Command> {
        let opts = LookupOptions {
            title_only: true,
            limit: self.limit,
        };

        let (notes, notebooks, tags, reminders) = tokio::join!(
            self.entities.search_notes(query, opts),
            self.entities.search_notebooks(query, opts),
            self.entities.search_tags(query, opts),
            self.entities.search_reminders(query, opts),
        );

        let mut commands = Vec::new();
        for (kind, result) in EntityKind::ALL.into_iter().zip([notes, notebooks, tags, reminders]) {
            match result {
                Ok(hits) => {
                    let kind_type = kind.command_type();
                    let group = self.label_for(kind_type);
                    commands.extend(
                        hits.into_iter()
                            .map(|hit| Command::new(hit.id, hit.title, kind_type, group.clone())),
                    );
                }
                Err(e) => warn!("{} lookup failed for '{}': {}", kind, query, e),
            }
        }

        commands
    }

    fn label_for(&self, kind: CommandType) -> String {
        self.labels
            .for_type(kind)
            .map(str::to_string)
            .unwrap_or_else(|| kind.to_string())
    }
}
