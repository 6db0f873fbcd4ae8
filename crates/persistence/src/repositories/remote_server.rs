//! Remote server repository for database operations.

use domain::models::{PlanType, RemoteServer};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{PlanTypeDb, RemoteServerEntity};

const REMOTE_SERVER_COLUMNS: &str =
    "id, uuid, api_key, hostname, contact_email, last_updated, deactivated, plan_type";

/// Repository for remote server database operations.
#[derive(Clone)]
pub struct RemoteServerRepository {
    pool: PgPool,
}

impl RemoteServerRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new remote server.
    ///
    /// The uuid column carries a unique index; inserting a duplicate fails
    /// with a database uniqueness error.
    pub async fn create(
        &self,
        uuid: Uuid,
        api_key: &str,
        hostname: &str,
        contact_email: &str,
    ) -> Result<RemoteServer, sqlx::Error> {
        let entity = sqlx::query_as::<_, RemoteServerEntity>(&format!(
            r#"
            INSERT INTO remote_servers (uuid, api_key, hostname, contact_email)
            VALUES ($1, $2, $3, $4)
            RETURNING {REMOTE_SERVER_COLUMNS}
            "#,
        ))
        .bind(uuid)
        .bind(api_key)
        .bind(hostname)
        .bind(contact_email)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find a server by its registration UUID.
    pub async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<RemoteServer>, sqlx::Error> {
        let entity = sqlx::query_as::<_, RemoteServerEntity>(&format!(
            r#"
            SELECT {REMOTE_SERVER_COLUMNS}
            FROM remote_servers
            WHERE uuid = $1
            "#,
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Update the unverified contact details for an existing registration.
    pub async fn update_registration(
        &self,
        id: i64,
        hostname: &str,
        contact_email: &str,
    ) -> Result<RemoteServer, sqlx::Error> {
        let entity = sqlx::query_as::<_, RemoteServerEntity>(&format!(
            r#"
            UPDATE remote_servers
            SET hostname = $2, contact_email = $3, last_updated = NOW()
            WHERE id = $1
            RETURNING {REMOTE_SERVER_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(hostname)
        .bind(contact_email)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Change the billing plan for a server.
    pub async fn update_plan_type(&self, id: i64, plan_type: PlanType) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE remote_servers
            SET plan_type = $2, last_updated = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(PlanTypeDb::from(plan_type))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deactivate a registration (soft delete; rows are never removed).
    pub async fn deactivate(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE remote_servers
            SET deactivated = TRUE, last_updated = NOW()
            WHERE id = $1 AND deactivated = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
