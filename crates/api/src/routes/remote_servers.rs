//! Remote server registration endpoint handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::RemoteServerAuth;
use crate::middleware::metrics::record_server_registered;
use domain::models::audit_log::event_types;
use persistence::repositories::{AuditLogRepository, RemoteServerRepository};
use shared::crypto::api_keys_equal;
use shared::validation::{validate_api_key_format, validate_hostname};

/// Registration request for a self-hosted server.
///
/// `aloha_org_id` and `aloha_org_key` are the UUID and API key the server
/// generated for itself at install time.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterServerRequest {
    pub aloha_org_id: Uuid,
    #[validate(custom(function = "validate_api_key_format"))]
    pub aloha_org_key: String,
    #[validate(custom(function = "validate_hostname"))]
    pub hostname: String,
    #[serde(default)]
    #[validate(custom(function = "validate_contact_email"))]
    pub contact_email: String,
}

/// Response for server registration.
#[derive(Debug, Serialize)]
pub struct RegisterServerResponse {
    pub created: bool,
}

fn validate_contact_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.validate_email() {
        return Ok(());
    }
    let mut err = ValidationError::new("contact_email");
    err.message = Some("Enter a valid email address".into());
    Err(err)
}

/// Register a remote server, or update its unverified contact details when
/// the UUID is already known and the key matches.
///
/// POST /api/v1/remotes/server/register
pub async fn register_server(
    State(state): State<AppState>,
    Json(request): Json<RegisterServerRequest>,
) -> Result<Json<RegisterServerResponse>, ApiError> {
    request.validate()?;

    let servers = RemoteServerRepository::new(state.pool.clone());
    let audit = AuditLogRepository::new(state.pool.clone());

    match servers.find_by_uuid(request.aloha_org_id).await? {
        None => {
            // A concurrent registration with the same UUID loses on the
            // unique index and surfaces as a conflict.
            let server = servers
                .create(
                    request.aloha_org_id,
                    &request.aloha_org_key,
                    &request.hostname,
                    &request.contact_email,
                )
                .await?;

            let extra_data = json!({ "hostname": server.hostname }).to_string();
            audit
                .insert_server_event(
                    server.id,
                    event_types::SERVER_REGISTERED,
                    server.last_updated,
                    Some(extra_data.as_str()),
                )
                .await?;

            record_server_registered();
            tracing::info!(requestor = %server.format_requestor_for_logs(), "Registered remote server");

            Ok(Json(RegisterServerResponse { created: true }))
        }
        Some(server) => {
            if !api_keys_equal(&request.aloha_org_key, &server.api_key) {
                return Err(ApiError::Unauthorized(
                    "Invalid server credentials".to_string(),
                ));
            }
            if server.deactivated {
                return Err(ApiError::Unauthorized(
                    "This server registration has been deactivated".to_string(),
                ));
            }

            let hostname_changed = server.hostname != request.hostname;
            servers
                .update_registration(server.id, &request.hostname, &request.contact_email)
                .await?;

            if hostname_changed {
                audit.insert_server_event_async(
                    server.id,
                    event_types::SERVER_HOSTNAME_CHANGED,
                    Some(
                        json!({
                            "old_hostname": server.hostname,
                            "new_hostname": request.hostname
                        })
                        .to_string(),
                    ),
                );
            }

            Ok(Json(RegisterServerResponse { created: false }))
        }
    }
}

/// Response for server deactivation.
#[derive(Debug, Serialize)]
pub struct DeactivateServerResponse {
    pub deactivated: bool,
}

/// Deactivate the authenticated server's registration.
///
/// POST /api/v1/remotes/server/deactivate
///
/// Registrations are never hard-deleted; a deactivated server stops
/// authenticating but its history stays intact.
pub async fn deactivate_server(
    State(state): State<AppState>,
    auth: RemoteServerAuth,
) -> Result<Json<DeactivateServerResponse>, ApiError> {
    let servers = RemoteServerRepository::new(state.pool.clone());
    let audit = AuditLogRepository::new(state.pool.clone());

    let deactivated = servers.deactivate(auth.server.id).await?;
    if deactivated {
        audit.insert_server_event_async(auth.server.id, event_types::SERVER_DEACTIVATED, None);
        tracing::info!(
            requestor = %auth.server.format_requestor_for_logs(),
            "Deactivated remote server"
        );
    }

    Ok(Json(DeactivateServerResponse { deactivated }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(hostname: &str, contact_email: &str) -> RegisterServerRequest {
        RegisterServerRequest {
            aloha_org_id: Uuid::new_v4(),
            aloha_org_key: "a".repeat(64),
            hostname: hostname.to_string(),
            contact_email: contact_email.to_string(),
        }
    }

    #[test]
    fn test_register_request_valid() {
        assert!(request("chat.example.com", "admin@example.com")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_register_request_empty_contact_email_allowed() {
        assert!(request("chat.example.com", "").validate().is_ok());
    }

    #[test]
    fn test_register_request_bad_contact_email() {
        assert!(request("chat.example.com", "not-an-email").validate().is_err());
    }

    #[test]
    fn test_register_request_bad_hostname() {
        assert!(request("chat example com", "").validate().is_err());
    }

    #[test]
    fn test_register_request_bad_key_length() {
        let mut req = request("chat.example.com", "");
        req.aloha_org_key = "short".to_string();
        assert!(req.validate().is_err());
    }
}
