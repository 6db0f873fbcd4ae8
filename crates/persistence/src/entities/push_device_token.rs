//! Push device token entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database representation of the token kind column (SMALLINT codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[repr(i16)]
pub enum TokenKindDb {
    Apns = 1,
    Fcm = 2,
}

impl From<TokenKindDb> for domain::models::TokenKind {
    fn from(db: TokenKindDb) -> Self {
        match db {
            TokenKindDb::Apns => Self::Apns,
            TokenKindDb::Fcm => Self::Fcm,
        }
    }
}

impl From<domain::models::TokenKind> for TokenKindDb {
    fn from(kind: domain::models::TokenKind) -> Self {
        match kind {
            domain::models::TokenKind::Apns => Self::Apns,
            domain::models::TokenKind::Fcm => Self::Fcm,
        }
    }
}

/// Database row mapping for the remote_push_device_tokens table.
#[derive(Debug, Clone, FromRow)]
pub struct RemotePushDeviceTokenEntity {
    pub id: i64,
    pub server_id: i64,
    pub user_id: Option<i64>,
    pub user_uuid: Option<Uuid>,
    pub kind: TokenKindDb,
    pub token: String,
    pub ios_app_id: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl From<RemotePushDeviceTokenEntity> for domain::models::RemotePushDeviceToken {
    fn from(entity: RemotePushDeviceTokenEntity) -> Self {
        Self {
            id: entity.id,
            server_id: entity.server_id,
            user_id: entity.user_id,
            user_uuid: entity.user_uuid,
            kind: entity.kind.into(),
            token: entity.token,
            ios_app_id: entity.ios_app_id,
            last_updated: entity.last_updated,
        }
    }
}
