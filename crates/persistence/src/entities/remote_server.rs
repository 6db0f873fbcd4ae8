//! Remote server entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database representation of the plan_type column (SMALLINT codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[repr(i16)]
pub enum PlanTypeDb {
    SelfHosted = 1,
    Standard = 102,
}

impl From<PlanTypeDb> for domain::models::PlanType {
    fn from(db: PlanTypeDb) -> Self {
        match db {
            PlanTypeDb::SelfHosted => Self::SelfHosted,
            PlanTypeDb::Standard => Self::Standard,
        }
    }
}

impl From<domain::models::PlanType> for PlanTypeDb {
    fn from(plan: domain::models::PlanType) -> Self {
        match plan {
            domain::models::PlanType::SelfHosted => Self::SelfHosted,
            domain::models::PlanType::Standard => Self::Standard,
        }
    }
}

/// Database row mapping for the remote_servers table.
#[derive(Debug, Clone, FromRow)]
pub struct RemoteServerEntity {
    pub id: i64,
    pub uuid: Uuid,
    pub api_key: String,
    pub hostname: String,
    pub contact_email: String,
    pub last_updated: DateTime<Utc>,
    pub deactivated: bool,
    pub plan_type: PlanTypeDb,
}

impl From<RemoteServerEntity> for domain::models::RemoteServer {
    fn from(entity: RemoteServerEntity) -> Self {
        Self {
            id: entity.id,
            uuid: entity.uuid,
            api_key: entity.api_key,
            hostname: entity.hostname,
            contact_email: entity.contact_email,
            last_updated: entity.last_updated,
            deactivated: entity.deactivated,
            plan_type: entity.plan_type.into(),
        }
    }
}
