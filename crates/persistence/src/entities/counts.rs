//! Usage count entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the remote_installation_counts table.
#[derive(Debug, Clone, FromRow)]
pub struct RemoteInstallationCountEntity {
    pub id: i64,
    pub server_id: i64,
    pub remote_id: i64,
    pub property: String,
    pub subgroup: Option<String>,
    pub end_time: DateTime<Utc>,
    pub value: i64,
}

impl From<RemoteInstallationCountEntity> for domain::models::RemoteInstallationCount {
    fn from(entity: RemoteInstallationCountEntity) -> Self {
        Self {
            id: entity.id,
            server_id: entity.server_id,
            remote_id: entity.remote_id,
            property: entity.property,
            subgroup: entity.subgroup,
            end_time: entity.end_time,
            value: entity.value,
        }
    }
}

/// Database row mapping for the remote_realm_counts table.
#[derive(Debug, Clone, FromRow)]
pub struct RemoteRealmCountEntity {
    pub id: i64,
    pub server_id: i64,
    pub realm_id: i64,
    pub remote_id: i64,
    pub property: String,
    pub subgroup: Option<String>,
    pub end_time: DateTime<Utc>,
    pub value: i64,
}

impl From<RemoteRealmCountEntity> for domain::models::RemoteRealmCount {
    fn from(entity: RemoteRealmCountEntity) -> Self {
        Self {
            id: entity.id,
            server_id: entity.server_id,
            realm_id: entity.realm_id,
            remote_id: entity.remote_id,
            property: entity.property,
            subgroup: entity.subgroup,
            end_time: entity.end_time,
            value: entity.value,
        }
    }
}
