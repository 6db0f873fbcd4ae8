//! Push device token domain model for devices on remote servers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RequestError;

/// Kind of push transport a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Apns,
    Fcm,
}

impl TokenKind {
    /// Numeric code stored in the database.
    pub fn code(self) -> i16 {
        match self {
            Self::Apns => 1,
            Self::Fcm => 2,
        }
    }

    /// Parse from the stored numeric code.
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::Apns),
            2 => Some(Self::Fcm),
            _ => None,
        }
    }

    /// Wire representation used in API requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apns => "apns",
            Self::Fcm => "fcm",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apns" => Ok(Self::Apns),
            "fcm" => Ok(Self::Fcm),
            _ => Err(format!("Unknown token kind: {}", s)),
        }
    }
}

/// The user a token belongs to on the remote server, identified by either a
/// numeric id or a UUID. Exactly one of the two is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserIdentity {
    Id(i64),
    Uuid(Uuid),
}

impl UserIdentity {
    /// Build from the optional request fields, enforcing mutual exclusivity.
    pub fn from_parts(user_id: Option<i64>, user_uuid: Option<Uuid>) -> Result<Self, RequestError> {
        match (user_id, user_uuid) {
            (Some(id), None) => Ok(Self::Id(id)),
            (None, Some(uuid)) => Ok(Self::Uuid(uuid)),
            (None, None) => Err(RequestError::new("Missing user_id or user_uuid")),
            (Some(_), Some(_)) => Err(RequestError::new(
                "Specify only one of user_id or user_uuid",
            )),
        }
    }

    /// The numeric id, if this identity carries one.
    pub fn user_id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Uuid(_) => None,
        }
    }

    /// The UUID, if this identity carries one.
    pub fn user_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Id(_) => None,
            Self::Uuid(uuid) => Some(*uuid),
        }
    }
}

/// A push token for a device connected to a remote server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RemotePushDeviceToken {
    pub id: i64,
    pub server_id: i64,
    pub user_id: Option<i64>,
    pub user_uuid: Option<Uuid>,
    pub kind: TokenKind,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios_app_id: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl std::fmt::Display for RemotePushDeviceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<RemotePushDeviceToken {} {:?}>",
            self.server_id, self.user_id
        )
    }
}
