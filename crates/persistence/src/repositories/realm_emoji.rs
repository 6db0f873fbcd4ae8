//! Realm emoji repository for database operations.

use domain::models::RealmEmoji;
use domain::services::emoji::get_emoji_file_name;
use sqlx::PgPool;

use crate::entities::RealmEmojiEntity;

const REALM_EMOJI_COLUMNS: &str = "id, realm_id, name, author_id, deactivated, file_name";

/// Repository for realm custom emoji database operations.
#[derive(Clone)]
pub struct RealmEmojiRepository {
    pool: PgPool,
}

impl RealmEmojiRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All emoji of a realm, including deactivated ones.
    pub async fn list_for_realm(&self, realm_id: i64) -> Result<Vec<RealmEmoji>, sqlx::Error> {
        let entities = sqlx::query_as::<_, RealmEmojiEntity>(&format!(
            r#"
            SELECT {REALM_EMOJI_COLUMNS}
            FROM realm_emoji
            WHERE realm_id = $1
            ORDER BY id ASC
            "#,
        ))
        .bind(realm_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Only the active emoji of a realm.
    pub async fn list_active_for_realm(
        &self,
        realm_id: i64,
    ) -> Result<Vec<RealmEmoji>, sqlx::Error> {
        let entities = sqlx::query_as::<_, RealmEmojiEntity>(&format!(
            r#"
            SELECT {REALM_EMOJI_COLUMNS}
            FROM realm_emoji
            WHERE realm_id = $1 AND deactivated = FALSE
            ORDER BY id ASC
            "#,
        ))
        .bind(realm_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// The active emoji with this name, if one exists.
    pub async fn find_active_by_name(
        &self,
        realm_id: i64,
        name: &str,
    ) -> Result<Option<RealmEmoji>, sqlx::Error> {
        let entity = sqlx::query_as::<_, RealmEmojiEntity>(&format!(
            r#"
            SELECT {REALM_EMOJI_COLUMNS}
            FROM realm_emoji
            WHERE realm_id = $1 AND name = $2 AND deactivated = FALSE
            "#,
        ))
        .bind(realm_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Create an emoji, deriving its storage file name from the upload's
    /// extension and the freshly assigned id.
    pub async fn create(
        &self,
        realm_id: i64,
        name: &str,
        author_id: Option<i64>,
        uploaded_file_name: &str,
    ) -> Result<RealmEmoji, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, RealmEmojiEntity>(&format!(
            r#"
            INSERT INTO realm_emoji (realm_id, name, author_id, file_name)
            VALUES ($1, $2, $3, '')
            RETURNING {REALM_EMOJI_COLUMNS}
            "#,
        ))
        .bind(realm_id)
        .bind(name)
        .bind(author_id)
        .fetch_one(&mut *tx)
        .await?;

        let file_name = get_emoji_file_name(uploaded_file_name, inserted.id);
        let entity = sqlx::query_as::<_, RealmEmojiEntity>(&format!(
            r#"
            UPDATE realm_emoji
            SET file_name = $2
            WHERE id = $1
            RETURNING {REALM_EMOJI_COLUMNS}
            "#,
        ))
        .bind(inserted.id)
        .bind(&file_name)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(entity.into())
    }

    /// Deactivate the active emoji with this name (old reactions keep
    /// rendering, so rows are never deleted). Returns whether a row changed.
    pub async fn deactivate(&self, realm_id: i64, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE realm_emoji
            SET deactivated = TRUE
            WHERE realm_id = $1 AND name = $2 AND deactivated = FALSE
            "#,
        )
        .bind(realm_id)
        .bind(name)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_realm_emoji_repository_new() {
        // This is a compile-time test - repository should be constructable
        // Actual DB tests require integration test setup
    }
}
