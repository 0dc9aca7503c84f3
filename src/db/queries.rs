/// SQL query functions for database operations
///
/// All queries use sqlx for compile-time verification and type safety.

use crate::core::sources::EntityKind;
use crate::db::models::*;
use crate::db::Database;
use crate::error::Result;
use chrono::Utc;

impl Database {
    /// Get a preference value
    pub async fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let pref = sqlx::query_as::<_, Preference>("SELECT * FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool())
            .await?;

        Ok(pref.map(|p| p.value))
    }

    /// Set a preference
    pub async fn set_preference(&self, key: String, value: String) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO preferences (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Insert an entity or retitle it if it already exists
    pub async fn upsert_entity(&self, input: EntityInput) -> Result<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO entities (id, kind, title, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(kind, id) DO UPDATE SET
                title = excluded.title,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&input.id)
        .bind(input.kind.as_str())
        .bind(&input.title)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Delete an entity. Returns whether anything was removed.
    pub async fn delete_entity(&self, kind: EntityKind, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM entities WHERE kind = ? AND id = ?")
            .bind(kind.as_str())
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Title search within one kind (case-insensitive substring)
    ///
    /// # Arguments
    /// * `kind` - Entity kind to search
    /// * `query` - Text that must appear in the title
    /// * `limit` - Maximum results
    pub async fn search_entities(
        &self,
        kind: EntityKind,
        query: &str,
        limit: i64,
    ) -> Result<Vec<Entity>> {
        let pattern = format!("%{}%", escape_like(query));

        let entities = sqlx::query_as::<_, Entity>(
            r#"
            SELECT * FROM entities
            WHERE kind = ? AND title LIKE ? ESCAPE '\'
            ORDER BY title COLLATE NOCASE
            LIMIT ?
            "#,
        )
        .bind(kind.as_str())
        .bind(&pattern)
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        Ok(entities)
    }

    /// Every entity of one kind, by title
    pub async fn list_entities(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        let entities = sqlx::query_as::<_, Entity>(
            "SELECT * FROM entities WHERE kind = ? ORDER BY title COLLATE NOCASE",
        )
        .bind(kind.as_str())
        .fetch_all(self.pool())
        .await?;

        Ok(entities)
    }
}

/// Make `%`, `_` and `\` match literally in a LIKE pattern
fn escape_like(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(kind: EntityKind, id: &str, title: &str) -> EntityInput {
        EntityInput {
            id: id.to_string(),
            kind,
            title: title.to_string(),
        }
    }

    #[tokio::test]
    async fn test_preferences() {
        let db = Database::new_test().await.unwrap();

        db.set_preference("test_key".to_string(), "test_value".to_string())
            .await
            .unwrap();

        let value = db.get_preference("test_key").await.unwrap();
        assert_eq!(value, Some("test_value".to_string()));
        assert_eq!(db.get_preference("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_search_entities_by_kind() {
        let db = Database::new_test().await.unwrap();

        db.upsert_entity(input(EntityKind::Note, "n1", "Work log")).await.unwrap();
        db.upsert_entity(input(EntityKind::Note, "n2", "Groceries")).await.unwrap();
        db.upsert_entity(input(EntityKind::Tag, "t1", "work")).await.unwrap();

        let notes = db.search_entities(EntityKind::Note, "WORK", 10).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, "n1");

        let tags = db.search_entities(EntityKind::Tag, "wo", 10).await.unwrap();
        assert_eq!(tags.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_retitles() {
        let db = Database::new_test().await.unwrap();

        db.upsert_entity(input(EntityKind::Notebook, "b1", "Old")).await.unwrap();
        db.upsert_entity(input(EntityKind::Notebook, "b1", "New")).await.unwrap();

        let all = db.list_entities(EntityKind::Notebook).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "New");
    }

    #[tokio::test]
    async fn test_delete_entity() {
        let db = Database::new_test().await.unwrap();
        db.upsert_entity(input(EntityKind::Reminder, "r1", "Dentist")).await.unwrap();

        assert!(db.delete_entity(EntityKind::Reminder, "r1").await.unwrap());
        assert!(!db.delete_entity(EntityKind::Reminder, "r1").await.unwrap());
    }

    #[tokio::test]
    async fn test_like_wildcards_are_literal() {
        let db = Database::new_test().await.unwrap();
        db.upsert_entity(input(EntityKind::Note, "n1", "100% done")).await.unwrap();
        db.upsert_entity(input(EntityKind::Note, "n2", "1000 things")).await.unwrap();

        let hits = db.search_entities(EntityKind::Note, "100%", 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "n1");
    }

    #[tokio::test]
    async fn test_search_limit() {
        let db = Database::new_test().await.unwrap();
        for i in 0..5 {
            db.upsert_entity(input(EntityKind::Tag, &format!("t{}", i), &format!("tag {}", i)))
                .await
                .unwrap();
        }

        let hits = db.search_entities(EntityKind::Tag, "tag", 3).await.unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].title, "tag 0");
    }
}
