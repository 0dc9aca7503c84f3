/// Collaborator trait implementations for `Database`
///
/// Lets the palette use SQLite both as its key-value store and as its
/// entity-search backend.

use crate::core::sources::{EntityHit, EntityKind, EntitySearch, LookupOptions};
use crate::db::Database;
use crate::error::{PaletteError, Result};
use crate::store::KeyValueStore;

impl KeyValueStore for Database {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_preference(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.set_preference(key.to_string(), value).await
    }
}

impl Database {
    async fn lookup(&self, kind: EntityKind, query: &str, opts: LookupOptions) -> Result<Vec<EntityHit>> {
        if !opts.title_only {
            return Err(PaletteError::EntitySearch(format!(
                "{} index only holds titles",
                kind
            )));
        }

        let entities = self.search_entities(kind, query, opts.limit).await?;
        Ok(entities.into_iter().map(EntityHit::from).collect())
    }
}

impl EntitySearch for Database {
    async fn search_notes(&self, query: &str, opts: LookupOptions) -> Result<Vec<EntityHit>> {
        self.lookup(EntityKind::Note, query, opts).await
    }

    async fn search_notebooks(&self, query: &str, opts: LookupOptions) -> Result<Vec<EntityHit>> {
        self.lookup(EntityKind::Notebook, query, opts).await
    }

    async fn search_tags(&self, query: &str, opts: LookupOptions) -> Result<Vec<EntityHit>> {
        self.lookup(EntityKind::Tag, query, opts).await
    }

    async fn search_reminders(&self, query: &str, opts: LookupOptions) -> Result<Vec<EntityHit>> {
        self.lookup(EntityKind::Reminder, query, opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::{Command, CommandType};
    use crate::core::recent::RecencyCache;
    use crate::db::EntityInput;

    #[tokio::test]
    async fn test_recency_cache_on_sqlite() {
        let db = Database::new_test().await.unwrap();
        let cache = RecencyCache::new(db.clone());

        cache
            .add(&Command::new("n1", "Groceries", CommandType::Note, "Notes"))
            .await;

        let entries = cache.read().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].group, "recent");
        assert!(db.get("commandPalette:recent").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_entity_search_respects_kind_and_limit() {
        let db = Database::new_test().await.unwrap();
        for (kind, id, title) in [
            (EntityKind::Note, "n1", "Plan trip"),
            (EntityKind::Note, "n2", "Plan party"),
            (EntityKind::Reminder, "r1", "Plan review"),
        ] {
            db.upsert_entity(EntityInput {
                id: id.to_string(),
                kind,
                title: title.to_string(),
            })
            .await
            .unwrap();
        }

        let opts = LookupOptions { title_only: true, limit: 1 };
        let notes = db.search_notes("plan", opts).await.unwrap();
        assert_eq!(notes.len(), 1);

        let reminders = db.search_reminders("plan", opts).await.unwrap();
        assert_eq!(reminders, vec![EntityHit::new("r1", "Plan review")]);

        assert!(db.search_tags("plan", opts).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_text_lookup_is_refused() {
        let db = Database::new_test().await.unwrap();
        let opts = LookupOptions { title_only: false, limit: 10 };

        let result = db.search_notes("plan", opts).await;
        assert!(matches!(result, Err(PaletteError::EntitySearch(_))));
    }
}
