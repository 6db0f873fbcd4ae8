//! Usage count repository for database operations.

use domain::models::{
    InstallationCountUpload, RealmCountUpload, RemoteInstallationCount, RemoteRealmCount,
};
use sqlx::PgPool;

use crate::entities::{RemoteInstallationCountEntity, RemoteRealmCountEntity};

/// Repository for the synced usage statistics tables.
#[derive(Clone)]
pub struct CountRepository {
    pool: PgPool,
}

impl CountRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Largest remote row id already synced into remote_installation_counts.
    pub async fn max_installation_remote_id(
        &self,
        server_id: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        let max: (Option<i64>,) = sqlx::query_as(
            r#"
            SELECT MAX(remote_id)
            FROM remote_installation_counts
            WHERE server_id = $1
            "#,
        )
        .bind(server_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(max.0)
    }

    /// Largest remote row id already synced into remote_realm_counts.
    pub async fn max_realm_remote_id(&self, server_id: i64) -> Result<Option<i64>, sqlx::Error> {
        let max: (Option<i64>,) = sqlx::query_as(
            r#"
            SELECT MAX(remote_id)
            FROM remote_realm_counts
            WHERE server_id = $1
            "#,
        )
        .bind(server_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(max.0)
    }

    /// Insert a batch of installation count rows in one transaction.
    pub async fn insert_installation_counts(
        &self,
        server_id: i64,
        rows: &[InstallationCountUpload],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO remote_installation_counts
                    (server_id, remote_id, property, subgroup, end_time, value)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(server_id)
            .bind(row.remote_id)
            .bind(&row.property)
            .bind(row.subgroup.as_deref())
            .bind(row.end_time)
            .bind(row.value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(rows.len() as u64)
    }

    /// Insert a batch of realm count rows in one transaction.
    pub async fn insert_realm_counts(
        &self,
        server_id: i64,
        rows: &[RealmCountUpload],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO remote_realm_counts
                    (server_id, realm_id, remote_id, property, subgroup, end_time, value)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(server_id)
            .bind(row.realm_id)
            .bind(row.remote_id)
            .bind(&row.property)
            .bind(row.subgroup.as_deref())
            .bind(row.end_time)
            .bind(row.value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(rows.len() as u64)
    }

    /// List installation counts for a server, oldest bucket first.
    pub async fn list_installation_counts(
        &self,
        server_id: i64,
    ) -> Result<Vec<RemoteInstallationCount>, sqlx::Error> {
        let entities = sqlx::query_as::<_, RemoteInstallationCountEntity>(
            r#"
            SELECT id, server_id, remote_id, property, subgroup, end_time, value
            FROM remote_installation_counts
            WHERE server_id = $1
            ORDER BY end_time ASC, remote_id ASC
            "#,
        )
        .bind(server_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// List realm counts for a server, oldest bucket first.
    pub async fn list_realm_counts(
        &self,
        server_id: i64,
    ) -> Result<Vec<RemoteRealmCount>, sqlx::Error> {
        let entities = sqlx::query_as::<_, RemoteRealmCountEntity>(
            r#"
            SELECT id, server_id, realm_id, remote_id, property, subgroup, end_time, value
            FROM remote_realm_counts
            WHERE server_id = $1
            ORDER BY end_time ASC, remote_id ASC
            "#,
        )
        .bind(server_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }
}
