//! Authentication middleware.
//!
//! Requires remote server credentials on the relay API routes.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app::AppState;
use crate::extractors::server_auth::{RemoteServerAuth, ORG_ID_HEADER, ORG_KEY_HEADER};

/// Middleware that requires remote server authentication.
///
/// Validates the `X-Aloha-Org-Id` / `X-Aloha-Org-Key` header pair and
/// rejects requests without valid credentials. The authenticated server is
/// stored in request extensions for downstream handlers and the rate
/// limiter.
pub async fn require_server_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let org_id = req
        .headers()
        .get(ORG_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let org_key = req
        .headers()
        .get(ORG_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let (org_id, org_key) = match (org_id, org_key) {
        (Some(id), Some(key)) => (id, key),
        _ => return unauthorized_response("Missing server credentials"),
    };

    match RemoteServerAuth::validate(&state.pool, &org_id, &org_key).await {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

/// Helper to create unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}
