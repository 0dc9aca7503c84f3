/// Static command registry
///
/// Holds the ordered command entries supplied by the host and the
/// id lookup tables built from them once at construction.

use crate::core::command::{Command, CommandType};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Callback bound to a palette entry. Receives the entry id.
pub type Action = Arc<dyn Fn(&str) + Send + Sync>;

/// Visibility predicate. Returning true hides the entry.
pub type Predicate = Arc<dyn Fn() -> bool + Send + Sync>;

/// Opaque icon handle, passed through to the renderer untouched
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Icon(pub String);

impl Icon {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// A title or group that is either fixed or computed on every resolve
#[derive(Clone)]
pub enum Label {
    Fixed(String),
    Computed(Arc<dyn Fn() -> Option<String> + Send + Sync>),
}

impl Label {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Label::Computed(Arc::new(f))
    }

    pub fn resolve(&self) -> Option<String> {
        match self {
            Label::Fixed(s) => Some(s.clone()),
            Label::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Fixed(s) => write!(f, "Fixed({:?})", s),
            Label::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Fixed(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Fixed(s)
    }
}

/// One command as declared by the host
#[derive(Clone)]
pub struct RegistryEntry {
    pub id: String,
    pub title: Label,
    pub group: Option<Label>,
    pub hidden: Option<Predicate>,
    pub dynamic: bool,
    pub icon: Icon,
    pub action: Action,
}

impl RegistryEntry {
    pub fn new<F>(id: impl Into<String>, title: impl Into<Label>, group: impl Into<Label>, action: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            title: title.into(),
            group: Some(group.into()),
            hidden: None,
            dynamic: false,
            icon: Icon::default(),
            action: Arc::new(action),
        }
    }

    /// Mark as dynamic: its identity may change between runs, so it is never remembered
    pub fn dynamic(mut self) -> Self {
        self.dynamic = true;
        self
    }

    pub fn hidden_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.hidden = Some(Arc::new(predicate));
        self
    }

    pub fn without_group(mut self) -> Self {
        self.group = None;
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    fn is_hidden(&self) -> bool {
        self.hidden.as_ref().map(|p| p()).unwrap_or(false)
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("group", &self.group)
            .field("dynamic", &self.dynamic)
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

/// Ordered registry with id lookup tables
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    entries: Vec<RegistryEntry>,
    // id -> index of first occurrence
    by_id: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new(entries: Vec<RegistryEntry>) -> Self {
        let mut by_id = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            by_id.entry(entry.id.clone()).or_insert(idx);
        }

        Self { entries, by_id }
    }

    /// Resolve the registry into palette commands
    ///
    /// Duplicated ids keep their first occurrence. Hidden entries and entries
    /// whose title or group resolves to nothing are skipped.
    pub fn resolve(&self) -> Vec<Command> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(idx, entry)| self.by_id.get(&entry.id) == Some(idx))
            .filter(|(_, entry)| !entry.is_hidden())
            .filter_map(|(_, entry)| {
                let title = entry.title.resolve()?;
                let group = entry.group.as_ref()?.resolve()?;
                let kind = if entry.dynamic {
                    CommandType::DynamicCommand
                } else {
                    CommandType::StaticCommand
                };
                Some(Command::new(entry.id.clone(), title, kind, group))
            })
            .collect()
    }

    pub fn action(&self, id: &str) -> Option<Action> {
        self.get(id).map(|entry| Arc::clone(&entry.action))
    }

    pub fn icon(&self, id: &str) -> Option<Icon> {
        self.get(id).map(|entry| entry.icon.clone())
    }

    fn get(&self, id: &str) -> Option<&RegistryEntry> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entry(id: &str, title: &str) -> RegistryEntry {
        RegistryEntry::new(id, title, "General", |_| {})
    }

    #[test]
    fn test_resolve_skips_hidden() {
        let registry = CommandRegistry::new(vec![
            entry("a", "Alpha"),
            entry("b", "Beta"),
            entry("c", "Gamma").hidden_when(|| true),
            entry("d", "Delta"),
            entry("e", "Epsilon"),
            entry("f", "Zeta").hidden_when(|| false),
        ]);

        let ids: Vec<String> = registry.resolve().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["a", "b", "d", "e", "f"]);
    }

    #[test]
    fn test_resolve_first_occurrence_wins() {
        let registry = CommandRegistry::new(vec![entry("a", "First"), entry("a", "Second")]);

        let commands = registry.resolve();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].title, "First");
    }

    #[test]
    fn test_resolve_skips_undefined_labels() {
        let registry = CommandRegistry::new(vec![
            entry("a", "Alpha").without_group(),
            RegistryEntry::new("b", Label::computed(|| None), "General", |_| {}),
            RegistryEntry::new("c", "Gamma", Label::computed(|| Some("Late".into())), |_| {}),
        ]);

        let commands = registry.resolve();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].group, "Late");
    }

    #[test]
    fn test_dynamic_type() {
        let registry = CommandRegistry::new(vec![entry("a", "Alpha").dynamic(), entry("b", "Beta")]);

        let commands = registry.resolve();
        assert_eq!(commands[0].kind, CommandType::DynamicCommand);
        assert_eq!(commands[1].kind, CommandType::StaticCommand);
    }

    #[test]
    fn test_action_lookup() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = CommandRegistry::new(vec![RegistryEntry::new(
            "sync",
            "Synchronise",
            "General",
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        )
        .with_icon(Icon::new("refresh"))]);

        let action = registry.action("sync").unwrap();
        action("sync");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.icon("sync"), Some(Icon::new("refresh")));
        assert!(registry.action("missing").is_none());
    }
}
