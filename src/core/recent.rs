/// Recency cache
///
/// Remembers the last few palette activations, most recent first.
/// Persistence failures are logged and otherwise treated as an empty cache.

use crate::core::command::{Command, CommandType};
use crate::store::KeyValueStore;
use log::{info, warn};

/// Store key holding the serialized entries
pub const RECENT_KEY: &str = "commandPalette:recent";

/// Max entries kept
pub const RECENT_CAPACITY: usize = 3;

pub struct RecencyCache<S> {
    store: S,
}

impl<S: KeyValueStore> RecencyCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persisted entries, or nothing if the store is empty, unavailable or corrupt
    pub async fn read(&self) -> Vec<Command> {
        let raw = match self.store.get(RECENT_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read recent commands: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Command>>(&raw) {
            Ok(entries) => entries
                .iter()
                .take(RECENT_CAPACITY)
                .map(Command::to_recent)
                .collect(),
            Err(e) => {
                warn!("Ignoring corrupt recent commands: {}", e);
                Vec::new()
            }
        }
    }

    /// Move `command` to the front. Dynamic commands are never remembered.
    pub async fn add(&self, command: &Command) {
        if command.kind == CommandType::DynamicCommand {
            return;
        }

        let mut entries = self.read().await;
        entries.retain(|entry| entry.id != command.id);
        entries.insert(0, command.to_recent());
        entries.truncate(RECENT_CAPACITY);

        info!("Remembered '{}' ({})", command.id, command.kind);
        self.persist(&entries).await;
    }

    pub async fn remove(&self, id: &str) {
        let mut entries = self.read().await;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);

        if entries.len() == before {
            return;
        }

        info!("Forgot recent entry '{}'", id);
        self.persist(&entries).await;
    }

    async fn persist(&self, entries: &[Command]) {
        let json = match serde_json::to_string(entries) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not serialize recent commands: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(RECENT_KEY, json).await {
            warn!("Could not save recent commands: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PaletteError, Result};
    use crate::store::MemoryStore;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(PaletteError::Store("offline".to_string()))
        }

        async fn set(&self, _key: &str, _value: String) -> Result<()> {
            Err(PaletteError::Store("offline".to_string()))
        }
    }

    fn note(id: &str) -> Command {
        Command::new(id, format!("Note {}", id), CommandType::Note, "Notes")
    }

    fn ids(entries: &[Command]) -> Vec<&str> {
        entries.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_readd_moves_to_front() {
        let cache = RecencyCache::new(MemoryStore::new());

        tokio_test::block_on(async {
            cache.add(&note("x")).await;
            cache.add(&note("y")).await;
            cache.add(&note("x")).await;

            let entries = cache.read().await;
            assert_eq!(ids(&entries), vec!["x", "y"]);
        });
    }

    #[tokio::test]
    async fn test_capacity() {
        let cache = RecencyCache::new(MemoryStore::new());

        for id in ["a", "b", "c", "d", "e"] {
            cache.add(&note(id)).await;
        }

        let entries = cache.read().await;
        assert_eq!(ids(&entries), vec!["e", "d", "c"]);
    }

    #[tokio::test]
    async fn test_entries_are_recent_and_plain() {
        let cache = RecencyCache::new(MemoryStore::new());
        let mut cmd = note("a");
        cmd.highlighted_title = Some("<mark>N</mark>ote a".to_string());

        cache.add(&cmd).await;

        let entries = cache.read().await;
        assert_eq!(entries[0].group, "recent");
        assert_eq!(entries[0].highlighted_title, None);
        assert_eq!(entries[0].kind, CommandType::Note);
    }

    #[tokio::test]
    async fn test_dynamic_is_not_remembered() {
        let cache = RecencyCache::new(MemoryStore::new());
        cache.add(&note("a")).await;
        let before = cache.store().get(RECENT_KEY).await.unwrap();

        let dynamic = Command::new("open-tab-3", "Tab 3", CommandType::DynamicCommand, "Tabs");
        cache.add(&dynamic).await;

        assert_eq!(cache.store().get(RECENT_KEY).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_remove() {
        let cache = RecencyCache::new(MemoryStore::new());
        cache.add(&note("a")).await;
        cache.add(&note("b")).await;

        cache.remove("a").await;
        assert_eq!(ids(&cache.read().await), vec!["b"]);

        // unknown id leaves things alone
        cache.remove("zzz").await;
        assert_eq!(ids(&cache.read().await), vec!["b"]);
    }

    #[tokio::test]
    async fn test_corrupt_store_reads_empty() {
        let store = MemoryStore::new();
        store.set(RECENT_KEY, "{not json".to_string()).await.unwrap();
        let cache = RecencyCache::new(store);

        assert!(cache.read().await.is_empty());

        // writing over a corrupt value recovers
        cache.add(&note("a")).await;
        assert_eq!(ids(&cache.read().await), vec!["a"]);
    }

    #[tokio::test]
    async fn test_broken_store_never_fails() {
        let cache = RecencyCache::new(BrokenStore);

        cache.add(&note("a")).await;
        cache.remove("a").await;
        assert!(cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_read_forces_recent_group() {
        let store = MemoryStore::new();
        store
            .set(
                RECENT_KEY,
                r#"[{"id":"t1","title":"Work","type":"tag","group":"Tags"}]"#.to_string(),
            )
            .await
            .unwrap();
        let cache = RecencyCache::new(store);

        let entries = cache.read().await;
        assert_eq!(entries[0].group, "recent");
        assert_eq!(entries[0].kind, CommandType::Tag);
    }
}
