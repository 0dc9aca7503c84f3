/// Data models for database entities
///
/// All models map to database tables and use sqlx for type-safe queries.

use crate::core::sources::{EntityHit, EntityKind};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored key-value pair
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Preference {
    pub key: String,
    pub value: String,
}

/// A searchable note, notebook, tag or reminder
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entity {
    pub id: String,
    pub kind: String, // 'note', 'notebook', 'tag', 'reminder'
    pub title: String,
    pub updated_at: String, // RFC 3339
}

impl Entity {
    pub fn kind(&self) -> Option<EntityKind> {
        self.kind.parse().ok()
    }
}

impl From<Entity> for EntityHit {
    fn from(entity: Entity) -> Self {
        EntityHit::new(entity.id, entity.title)
    }
}

/// Input for indexing an entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityInput {
    pub id: String,
    pub kind: EntityKind,
    pub title: String,
}
