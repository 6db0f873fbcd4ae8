//! Realm emoji entity (database row mapping).

use sqlx::FromRow;

/// Database row mapping for the realm_emoji table.
#[derive(Debug, Clone, FromRow)]
pub struct RealmEmojiEntity {
    pub id: i64,
    pub realm_id: i64,
    pub name: String,
    pub author_id: Option<i64>,
    pub deactivated: bool,
    pub file_name: String,
}

impl From<RealmEmojiEntity> for domain::models::RealmEmoji {
    fn from(entity: RealmEmojiEntity) -> Self {
        Self {
            id: entity.id,
            realm_id: entity.realm_id,
            name: entity.name,
            author_id: entity.author_id,
            deactivated: entity.deactivated,
            file_name: entity.file_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realm_emoji_entity_to_domain() {
        let entity = RealmEmojiEntity {
            id: 34,
            realm_id: 1,
            name: "green_tick".to_string(),
            author_id: Some(8),
            deactivated: false,
            file_name: "34.png".to_string(),
        };

        let emoji: domain::models::RealmEmoji = entity.clone().into();
        assert_eq!(emoji.id, 34);
        assert_eq!(emoji.code(), "34");
        assert_eq!(emoji.name, "green_tick");
    }
}
