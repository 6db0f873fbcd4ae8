//! Audit log repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::{RealmAuditLogUpload, RemoteRealmAuditLog, RemoteServerAuditLog};
use sqlx::PgPool;

use crate::entities::{RemoteRealmAuditLogEntity, RemoteServerAuditLogEntity};

/// Repository for both flavours of remote audit log.
#[derive(Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an event the relay observed about a server.
    pub async fn insert_server_event(
        &self,
        server_id: i64,
        event_type: i16,
        event_time: DateTime<Utc>,
        extra_data: Option<&str>,
    ) -> Result<RemoteServerAuditLog, sqlx::Error> {
        let entity = sqlx::query_as::<_, RemoteServerAuditLogEntity>(
            r#"
            INSERT INTO remote_server_audit_logs
                (server_id, event_time, backfilled, extra_data, event_type)
            VALUES ($1, $2, FALSE, $3, $4)
            RETURNING id, server_id, event_time, backfilled, extra_data, event_type
            "#,
        )
        .bind(server_id)
        .bind(event_time)
        .bind(extra_data)
        .bind(event_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Record a server event asynchronously (fire and forget).
    /// Uses tokio::spawn to avoid blocking the request.
    pub fn insert_server_event_async(
        &self,
        server_id: i64,
        event_type: i16,
        extra_data: Option<String>,
    ) {
        let pool = self.pool.clone();
        tokio::spawn(async move {
            let repo = AuditLogRepository::new(pool);
            if let Err(e) = repo
                .insert_server_event(server_id, event_type, Utc::now(), extra_data.as_deref())
                .await
            {
                tracing::error!("Failed to insert server audit log: {}", e);
            }
        });
    }

    /// Largest remote row id already synced for this server, if any.
    pub async fn max_realm_log_remote_id(
        &self,
        server_id: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        let max: (Option<i64>,) = sqlx::query_as(
            r#"
            SELECT MAX(remote_id)
            FROM remote_realm_audit_logs
            WHERE server_id = $1
            "#,
        )
        .bind(server_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(max.0)
    }

    /// Insert a batch of synced realm audit rows in one transaction.
    /// Returns the number of rows written.
    pub async fn insert_realm_events(
        &self,
        server_id: i64,
        rows: &[RealmAuditLogUpload],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO remote_realm_audit_logs
                    (server_id, realm_id, remote_id, event_time, backfilled, extra_data, event_type)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(server_id)
            .bind(row.realm_id)
            .bind(row.remote_id)
            .bind(row.event_time)
            .bind(row.backfilled)
            .bind(row.extra_data.as_deref())
            .bind(row.event_type)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(rows.len() as u64)
    }

    /// List synced realm audit rows for a server, oldest first.
    pub async fn list_realm_events(
        &self,
        server_id: i64,
    ) -> Result<Vec<RemoteRealmAuditLog>, sqlx::Error> {
        let entities = sqlx::query_as::<_, RemoteRealmAuditLogEntity>(
            r#"
            SELECT id, server_id, realm_id, remote_id, event_time, backfilled, extra_data, event_type
            FROM remote_realm_audit_logs
            WHERE server_id = $1
            ORDER BY remote_id ASC
            "#,
        )
        .bind(server_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_audit_log_repository_new() {
        // This is a compile-time test - repository should be constructable
        // Actual DB tests require integration test setup
    }
}
