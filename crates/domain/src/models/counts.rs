//! Usage statistics rows synced from remote servers.
//!
//! Each row is one (property, subgroup, time bucket) sample. Installation
//! counts cover the whole server; realm counts carry the remote realm id as
//! a plain integer since the realm itself lives on the remote server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-wide usage statistic sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoteInstallationCount {
    pub id: i64,
    pub server_id: i64,
    pub remote_id: i64,
    pub property: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subgroup: Option<String>,
    pub end_time: DateTime<Utc>,
    pub value: i64,
}

impl std::fmt::Display for RemoteInstallationCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<RemoteInstallationCount: {} {:?} {}>",
            self.property, self.subgroup, self.value
        )
    }
}

/// Per-realm usage statistic sample from a remote server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoteRealmCount {
    pub id: i64,
    pub server_id: i64,
    pub realm_id: i64,
    pub remote_id: i64,
    pub property: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subgroup: Option<String>,
    pub end_time: DateTime<Utc>,
    pub value: i64,
}

impl std::fmt::Display for RemoteRealmCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {:?} {}",
            self.server_id, self.realm_id, self.property, self.subgroup, self.value
        )
    }
}

/// One installation count row as uploaded by a remote server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InstallationCountUpload {
    pub remote_id: i64,
    pub property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subgroup: Option<String>,
    pub end_time: DateTime<Utc>,
    pub value: i64,
}

/// One realm count row as uploaded by a remote server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RealmCountUpload {
    pub remote_id: i64,
    pub realm_id: i64,
    pub property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subgroup: Option<String>,
    pub end_time: DateTime<Utc>,
    pub value: i64,
}
