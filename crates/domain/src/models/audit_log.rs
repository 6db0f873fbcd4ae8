//! Audit log domain models.
//!
//! Two flavours exist: rows the relay writes itself about a server's
//! registration and billing history (the authoritative record), and rows
//! synced up from the remote server about events inside its realms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event type codes for audit rows generated by the relay itself.
///
/// Synced realm rows carry whatever codes the remote server assigned; only
/// locally generated events are constrained to this set.
pub mod event_types {
    pub const SERVER_REGISTERED: i16 = 101;
    pub const SERVER_HOSTNAME_CHANGED: i16 = 102;
    pub const SERVER_PLAN_TYPE_CHANGED: i16 = 103;
    pub const SERVER_DEACTIVATED: i16 = 104;
}

/// Audit data associated with a remote server, not specific to a realm.
///
/// Used primarily for tracking registration and billing changes for
/// self-hosted customers. This table is the authoritative storage location
/// for the server's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoteServerAuditLog {
    pub id: i64,
    pub server_id: i64,
    pub event_time: DateTime<Utc>,
    pub backfilled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<String>,
    pub event_type: i16,
}

impl std::fmt::Display for RemoteServerAuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<RemoteServerAuditLog: {} {} {} {}>",
            self.server_id, self.event_type, self.event_time, self.id
        )
    }
}

/// Synced audit data from a remote server, used primarily for billing.
///
/// `remote_id` is the row id the event had on the remote server; it is the
/// deduplication key for repeated uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoteRealmAuditLog {
    pub id: i64,
    pub server_id: i64,
    pub realm_id: i64,
    pub remote_id: i64,
    pub event_time: DateTime<Utc>,
    pub backfilled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<String>,
    pub event_type: i16,
}

impl std::fmt::Display for RemoteRealmAuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<RemoteRealmAuditLog: {} {} {} {}>",
            self.server_id, self.event_type, self.event_time, self.id
        )
    }
}

/// One realm audit row as uploaded by a remote server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RealmAuditLogUpload {
    pub remote_id: i64,
    pub realm_id: i64,
    pub event_time: DateTime<Utc>,
    #[serde(default)]
    pub backfilled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<String>,
    pub event_type: i16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_codes_distinct() {
        let codes = [
            event_types::SERVER_REGISTERED,
            event_types::SERVER_HOSTNAME_CHANGED,
            event_types::SERVER_PLAN_TYPE_CHANGED,
            event_types::SERVER_DEACTIVATED,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_server_audit_log_display() {
        let row = RemoteServerAuditLog {
            id: 5,
            server_id: 2,
            event_time: Utc::now(),
            backfilled: false,
            extra_data: None,
            event_type: event_types::SERVER_REGISTERED,
        };
        let s = format!("{}", row);
        assert!(s.starts_with("<RemoteServerAuditLog: 2 101 "));
    }

    #[test]
    fn test_realm_audit_log_serializes_without_null_extra_data() {
        let row = RemoteRealmAuditLog {
            id: 1,
            server_id: 1,
            realm_id: 42,
            remote_id: 9,
            event_time: Utc::now(),
            backfilled: true,
            extra_data: None,
            event_type: 201,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(!json.contains("extra_data"));
        assert!(json.contains("\"remote_id\":9"));
    }
}
