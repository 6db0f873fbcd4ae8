use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_server_auth,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{analytics, health, push_tokens, remote_servers};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let rate_limiter = if config.security.rate_limiting {
        Some(Arc::new(RateLimiterState::new()))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Protected routes: everything a registered server calls with its
    // UUID/key credentials.
    // Middleware order: auth runs first, then rate limiting (which needs
    // the authenticated identity).
    let protected_routes = Router::new()
        .route(
            "/api/v1/remotes/push/register",
            post(push_tokens::register_push_token),
        )
        .route(
            "/api/v1/remotes/push/unregister",
            post(push_tokens::unregister_push_token),
        )
        .route(
            "/api/v1/remotes/server/analytics",
            post(analytics::upload_analytics),
        )
        .route(
            "/api/v1/remotes/server/analytics/status",
            get(analytics::analytics_status),
        )
        .route(
            "/api/v1/remotes/server/deactivate",
            post(remote_servers::deactivate_server),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_server_auth,
        ));

    // Registration carries its credentials in the body, so it sits outside
    // the authenticated group.
    let registration_routes = Router::new().route(
        "/api/v1/remotes/server/register",
        post(remote_servers::register_server),
    );

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(registration_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
