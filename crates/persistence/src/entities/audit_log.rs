//! Audit log entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the remote_server_audit_logs table.
#[derive(Debug, Clone, FromRow)]
pub struct RemoteServerAuditLogEntity {
    pub id: i64,
    pub server_id: i64,
    pub event_time: DateTime<Utc>,
    pub backfilled: bool,
    pub extra_data: Option<String>,
    pub event_type: i16,
}

impl From<RemoteServerAuditLogEntity> for domain::models::RemoteServerAuditLog {
    fn from(entity: RemoteServerAuditLogEntity) -> Self {
        Self {
            id: entity.id,
            server_id: entity.server_id,
            event_time: entity.event_time,
            backfilled: entity.backfilled,
            extra_data: entity.extra_data,
            event_type: entity.event_type,
        }
    }
}

/// Database row mapping for the remote_realm_audit_logs table.
#[derive(Debug, Clone, FromRow)]
pub struct RemoteRealmAuditLogEntity {
    pub id: i64,
    pub server_id: i64,
    pub realm_id: i64,
    pub remote_id: i64,
    pub event_time: DateTime<Utc>,
    pub backfilled: bool,
    pub extra_data: Option<String>,
    pub event_type: i16,
}

impl From<RemoteRealmAuditLogEntity> for domain::models::RemoteRealmAuditLog {
    fn from(entity: RemoteRealmAuditLogEntity) -> Self {
        Self {
            id: entity.id,
            server_id: entity.server_id,
            realm_id: entity.realm_id,
            remote_id: entity.remote_id,
            event_time: entity.event_time,
            backfilled: entity.backfilled,
            extra_data: entity.extra_data,
            event_type: entity.event_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realm_audit_log_entity_to_domain() {
        let entity = RemoteRealmAuditLogEntity {
            id: 10,
            server_id: 1,
            realm_id: 4,
            remote_id: 77,
            event_time: Utc::now(),
            backfilled: true,
            extra_data: Some("{}".to_string()),
            event_type: 201,
        };

        let row: domain::models::RemoteRealmAuditLog = entity.clone().into();
        assert_eq!(row.remote_id, 77);
        assert_eq!(row.realm_id, 4);
        assert!(row.backfilled);
    }
}
