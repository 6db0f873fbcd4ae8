//! Push device token endpoint handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::RemoteServerAuth;
use crate::middleware::metrics::record_push_token_registered;
use domain::models::{TokenKind, UserIdentity};
use persistence::repositories::PushDeviceTokenRepository;
use shared::validation::validate_push_token;

/// Registration request for a device's push token.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPushTokenRequest {
    pub user_id: Option<i64>,
    pub user_uuid: Option<Uuid>,
    #[validate(custom(function = "validate_push_token"))]
    pub token: String,
    pub token_kind: String,
    #[serde(default)]
    pub ios_app_id: Option<String>,
}

/// Removal request for a device's push token.
#[derive(Debug, Deserialize, Validate)]
pub struct UnregisterPushTokenRequest {
    pub user_id: Option<i64>,
    pub user_uuid: Option<Uuid>,
    #[validate(custom(function = "validate_push_token"))]
    pub token: String,
    pub token_kind: String,
}

/// Response for token registration.
#[derive(Debug, Serialize)]
pub struct RegisterPushTokenResponse {
    pub created: bool,
}

/// Response for token removal.
#[derive(Debug, Serialize)]
pub struct UnregisterPushTokenResponse {
    pub deleted: bool,
}

fn parse_token_kind(kind: &str) -> Result<TokenKind, ApiError> {
    TokenKind::from_str(kind)
        .map_err(|_| ApiError::Validation(format!("Invalid token kind: {}", kind)))
}

/// Register a push token for a device on the authenticated server.
///
/// POST /api/v1/remotes/push/register
///
/// Re-registering an identical token is a no-op rather than an error, since
/// mobile clients re-send their token on every startup.
pub async fn register_push_token(
    State(state): State<AppState>,
    auth: RemoteServerAuth,
    Json(request): Json<RegisterPushTokenRequest>,
) -> Result<Json<RegisterPushTokenResponse>, ApiError> {
    request.validate()?;

    let kind = parse_token_kind(&request.token_kind)?;
    let user = UserIdentity::from_parts(request.user_id, request.user_uuid)?;

    let repo = PushDeviceTokenRepository::new(state.pool.clone());
    let created = repo
        .register(
            auth.server.id,
            user,
            kind,
            &request.token,
            request.ios_app_id.as_deref(),
        )
        .await?;

    if created {
        record_push_token_registered();
    }

    Ok(Json(RegisterPushTokenResponse { created }))
}

/// Remove a push token previously registered by the authenticated server.
///
/// POST /api/v1/remotes/push/unregister
pub async fn unregister_push_token(
    State(state): State<AppState>,
    auth: RemoteServerAuth,
    Json(request): Json<UnregisterPushTokenRequest>,
) -> Result<Json<UnregisterPushTokenResponse>, ApiError> {
    request.validate()?;

    let kind = parse_token_kind(&request.token_kind)?;
    let user = UserIdentity::from_parts(request.user_id, request.user_uuid)?;

    let repo = PushDeviceTokenRepository::new(state.pool.clone());
    let deleted = repo
        .unregister(auth.server.id, user, kind, &request.token)
        .await?;

    if !deleted {
        return Err(ApiError::NotFound("Token does not exist".to_string()));
    }

    Ok(Json(UnregisterPushTokenResponse { deleted }))
}
