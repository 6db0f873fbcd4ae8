//! Remote server domain model.
//!
//! Each record corresponds to a single self-hosted Aloha server registered
//! for the mobile push notifications service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a remote server UUID in its canonical string form.
pub const UUID_LENGTH: usize = 36;

/// Billing plan types for self-hosted customers.
///
/// Codes are stored as-is in the `plan_type` column; the gap between them is
/// deliberate so paid tiers can be added without renumbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    SelfHosted,
    Standard,
}

impl PlanType {
    /// Numeric code stored in the database.
    pub fn code(self) -> i16 {
        match self {
            Self::SelfHosted => 1,
            Self::Standard => 102,
        }
    }

    /// Parse from the stored numeric code.
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::SelfHosted),
            102 => Some(Self::Standard),
            _ => None,
        }
    }
}

impl Default for PlanType {
    fn default() -> Self {
        Self::SelfHosted
    }
}

/// A self-hosted server registered with the push relay.
///
/// The hostname and contact details are not verified or trusted; they exist
/// so the maintainer of a server can be reached about abuse problems.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoteServer {
    pub id: i64,
    pub uuid: Uuid,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub hostname: String,
    pub contact_email: String,
    pub last_updated: DateTime<Utc>,
    pub deactivated: bool,
    pub plan_type: PlanType,
}

impl RemoteServer {
    /// Identifier used when attributing log lines to this server.
    pub fn format_requestor_for_logs(&self) -> String {
        format!("aloha-server:{}", self.uuid)
    }
}

impl std::fmt::Display for RemoteServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let uuid = self.uuid.to_string();
        write!(f, "<RemoteServer {} {}>", self.hostname, &uuid[0..12])
    }
}
