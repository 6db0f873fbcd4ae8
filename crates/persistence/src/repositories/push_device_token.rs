//! Push device token repository for database operations.

use domain::models::{RemotePushDeviceToken, TokenKind, UserIdentity};
use sqlx::PgPool;

use crate::entities::{RemotePushDeviceTokenEntity, TokenKindDb};

const TOKEN_COLUMNS: &str =
    "id, server_id, user_id, user_uuid, kind, token, ios_app_id, last_updated";

/// Repository for remote push device token database operations.
#[derive(Clone)]
pub struct PushDeviceTokenRepository {
    pool: PgPool,
}

impl PushDeviceTokenRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a token for a device on a remote server.
    ///
    /// Re-registering an identical (server, user, kind, token) tuple is a
    /// no-op; returns whether a row was actually created.
    pub async fn register(
        &self,
        server_id: i64,
        user: UserIdentity,
        kind: TokenKind,
        token: &str,
        ios_app_id: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO remote_push_device_tokens
                (server_id, user_id, user_uuid, kind, token, ios_app_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(server_id)
        .bind(user.user_id())
        .bind(user.user_uuid())
        .bind(TokenKindDb::from(kind))
        .bind(token)
        .bind(ios_app_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a registered token. Returns whether a row was deleted.
    pub async fn unregister(
        &self,
        server_id: i64,
        user: UserIdentity,
        kind: TokenKind,
        token: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = match user {
            UserIdentity::Id(user_id) => {
                sqlx::query(
                    r#"
                    DELETE FROM remote_push_device_tokens
                    WHERE server_id = $1 AND user_id = $2 AND kind = $3 AND token = $4
                    "#,
                )
                .bind(server_id)
                .bind(user_id)
                .bind(TokenKindDb::from(kind))
                .bind(token)
                .execute(&self.pool)
                .await?
            }
            UserIdentity::Uuid(user_uuid) => {
                sqlx::query(
                    r#"
                    DELETE FROM remote_push_device_tokens
                    WHERE server_id = $1 AND user_uuid = $2 AND kind = $3 AND token = $4
                    "#,
                )
                .bind(server_id)
                .bind(user_uuid)
                .bind(TokenKindDb::from(kind))
                .bind(token)
                .execute(&self.pool)
                .await?
            }
        };

        Ok(result.rows_affected() > 0)
    }

    /// List all tokens registered by a server, newest first.
    pub async fn list_for_server(
        &self,
        server_id: i64,
    ) -> Result<Vec<RemotePushDeviceToken>, sqlx::Error> {
        let entities = sqlx::query_as::<_, RemotePushDeviceTokenEntity>(&format!(
            r#"
            SELECT {TOKEN_COLUMNS}
            FROM remote_push_device_tokens
            WHERE server_id = $1
            ORDER BY last_updated DESC
            "#,
        ))
        .bind(server_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }
}
