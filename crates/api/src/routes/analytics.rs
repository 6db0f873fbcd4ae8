//! Usage analytics sync endpoint handlers.
//!
//! Remote servers periodically upload their installation counts, per-realm
//! counts, and realm audit rows. Each row carries the id it had on the
//! remote side; rows at or below the stored high-water mark are skipped, so
//! uploads are idempotent.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::RemoteServerAuth;
use crate::middleware::metrics::record_analytics_rows;
use domain::models::{InstallationCountUpload, RealmAuditLogUpload, RealmCountUpload};
use domain::services::sync::{check_ascending_order, filter_new_rows};
use persistence::repositories::{AuditLogRepository, CountRepository};

/// One analytics upload from a remote server.
#[derive(Debug, Deserialize)]
pub struct AnalyticsUploadRequest {
    #[serde(default)]
    pub installation_counts: Vec<InstallationCountUpload>,
    #[serde(default)]
    pub realm_counts: Vec<RealmCountUpload>,
    #[serde(default)]
    pub realmauditlog_rows: Vec<RealmAuditLogUpload>,
}

/// High-water marks after an upload (and for the status endpoint).
#[derive(Debug, Serialize)]
pub struct AnalyticsStatusResponse {
    pub last_installation_count_id: Option<i64>,
    pub last_realm_count_id: Option<i64>,
    pub last_realmauditlog_id: Option<i64>,
}

fn check_batch_size(len: usize, max: usize) -> Result<(), ApiError> {
    if len > max {
        return Err(ApiError::Validation(format!(
            "Too many rows in one batch (max {})",
            max
        )));
    }
    Ok(())
}

fn advance(floor: Option<i64>, last: Option<i64>) -> Option<i64> {
    match (floor, last) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// Accept a batch of usage statistics from the authenticated server.
///
/// POST /api/v1/remotes/server/analytics
pub async fn upload_analytics(
    State(state): State<AppState>,
    auth: RemoteServerAuth,
    Json(request): Json<AnalyticsUploadRequest>,
) -> Result<Json<AnalyticsStatusResponse>, ApiError> {
    let max_batch = state.config.limits.max_analytics_batch;
    check_batch_size(request.installation_counts.len(), max_batch)?;
    check_batch_size(request.realm_counts.len(), max_batch)?;
    check_batch_size(request.realmauditlog_rows.len(), max_batch)?;

    let server_id = auth.server.id;
    let counts = CountRepository::new(state.pool.clone());
    let audit = AuditLogRepository::new(state.pool.clone());

    // Installation counts
    let ids: Vec<i64> = request
        .installation_counts
        .iter()
        .map(|r| r.remote_id)
        .collect();
    check_ascending_order(&ids)?;
    let floor = counts.max_installation_remote_id(server_id).await?;
    let fresh = filter_new_rows(request.installation_counts, floor, |r| r.remote_id);
    let last_installation = advance(floor, fresh.last().map(|r| r.remote_id));
    if !fresh.is_empty() {
        let inserted = counts.insert_installation_counts(server_id, &fresh).await?;
        record_analytics_rows("installation_counts", inserted);
    }

    // Realm counts
    let ids: Vec<i64> = request.realm_counts.iter().map(|r| r.remote_id).collect();
    check_ascending_order(&ids)?;
    let floor = counts.max_realm_remote_id(server_id).await?;
    let fresh = filter_new_rows(request.realm_counts, floor, |r| r.remote_id);
    let last_realm = advance(floor, fresh.last().map(|r| r.remote_id));
    if !fresh.is_empty() {
        let inserted = counts.insert_realm_counts(server_id, &fresh).await?;
        record_analytics_rows("realm_counts", inserted);
    }

    // Realm audit log rows
    let ids: Vec<i64> = request
        .realmauditlog_rows
        .iter()
        .map(|r| r.remote_id)
        .collect();
    check_ascending_order(&ids)?;
    let floor = audit.max_realm_log_remote_id(server_id).await?;
    let fresh = filter_new_rows(request.realmauditlog_rows, floor, |r| r.remote_id);
    let last_audit = advance(floor, fresh.last().map(|r| r.remote_id));
    if !fresh.is_empty() {
        let inserted = audit.insert_realm_events(server_id, &fresh).await?;
        record_analytics_rows("realmauditlog", inserted);
    }

    Ok(Json(AnalyticsStatusResponse {
        last_installation_count_id: last_installation,
        last_realm_count_id: last_realm,
        last_realmauditlog_id: last_audit,
    }))
}

/// Report the stored high-water marks so a server can resume syncing after
/// losing track of what it already uploaded.
///
/// GET /api/v1/remotes/server/analytics/status
pub async fn analytics_status(
    State(state): State<AppState>,
    auth: RemoteServerAuth,
) -> Result<Json<AnalyticsStatusResponse>, ApiError> {
    let server_id = auth.server.id;
    let counts = CountRepository::new(state.pool.clone());
    let audit = AuditLogRepository::new(state.pool.clone());

    Ok(Json(AnalyticsStatusResponse {
        last_installation_count_id: counts.max_installation_remote_id(server_id).await?,
        last_realm_count_id: counts.max_realm_remote_id(server_id).await?,
        last_realmauditlog_id: audit.max_realm_log_remote_id(server_id).await?,
    }))
}
