//! # skillmatrix HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check (never authenticated)
//! - `GET /summary` - Snapshot statistics
//! - `GET /positions/open` - Open positions (`department`, `min_level`, `max_level`)
//! - `GET /positions/{id}/candidates` - Internal candidates vs. external hire
//! - `GET /positions/{id}/unmet-processes` - Processes no incumbent can perform
//! - `GET /capability` - Capability gaps of every process
//! - `GET /capability/{id}` - Capability record of one process
//! - `GET /reliance` - Worker reliance issues of every process
//! - `GET /reliance/{id}` - Reliance record of one process
//! - `PUT /snapshot` - Replace the loaded snapshot
//!
//! Analysis endpoints accept `?cost_per_level=<major units>`.
//!
//! ## Security Configuration
//!
//! - `server.cors_origins`: comma-separated allowed origins, or "*" (default: localhost only)
//! - `server.rate_limit`: requests per second (default: 100, 0 to disable)
//! - `server.api_key`: if set, requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::{ApiKey, keys_match};
pub use middleware::{GlobalRateLimiter, create_rate_limiter};
pub use types::{
    ApiError, CostQuery, ErrorResponse, HealthResponse, OpenPositionsQuery, UnmetProcess,
    UnmetProcessesResponse,
};

use crate::config::{AppConfig, ServerConfig};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, put},
};
use skillmatrix_core::{Money, Workforce, WorkforceError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (32 MB), sized for snapshot uploads.
const MAX_BODY_SIZE: usize = 32 * 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    /// The loaded workforce; replaced wholesale by `PUT /snapshot`.
    pub workforce: Arc<RwLock<Workforce>>,
    /// Default training cost per level for analysis endpoints.
    pub cost_per_level: Money,
    pub server: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(workforce: Workforce, config: &AppConfig) -> Result<Self, WorkforceError> {
        Ok(Self {
            workforce: Arc::new(RwLock::new(workforce)),
            cost_per_level: config.cost_per_level()?,
            server: Arc::new(config.server.clone()),
        })
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from `server.cors_origins`.
///
/// - `"*"`: allows all origins (development only)
/// - unset: localhost only
/// - otherwise: the comma-separated list of origins
fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                with_methods(CorsLayer::new().allow_origin(allowed_origins))
            }
        }
        None => {
            tracing::info!("CORS: No origins configured, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    with_methods(CorsLayer::new().allow_origin(origins))
}

fn with_methods(layer: CorsLayer) -> CorsLayer {
    layer
        .allow_methods([Method::GET, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Rate Limiting (if enabled)
/// 4. Authentication (if an API key is configured)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(state.server.cors_origins.as_deref());

    let rate_limiter = if state.server.rate_limit > 0 {
        tracing::info!(
            "Rate limiting enabled: {} requests/second",
            state.server.rate_limit
        );
        Some(create_rate_limiter(state.server.rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let api_key = state.server.api_key().map(|k| ApiKey(Arc::from(k)));
    if api_key.is_some() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible! \
             Set SKILLMATRIX_API_KEY to enable authentication."
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/summary", get(handlers::summary_handler))
        .route("/positions/open", get(handlers::open_positions_handler))
        .route(
            "/positions/{id}/candidates",
            get(handlers::candidates_handler),
        )
        .route(
            "/positions/{id}/unmet-processes",
            get(handlers::unmet_processes_handler),
        )
        .route("/capability", get(handlers::capability_handler))
        .route("/capability/{id}", get(handlers::process_capability_handler))
        .route("/reliance", get(handlers::reliance_handler))
        .route("/reliance/{id}", get(handlers::process_reliance_handler))
        .route("/snapshot", put(handlers::replace_snapshot_handler));

    if let Some(key) = api_key {
        router = router.layer(axum_middleware::from_fn_with_state(
            key,
            auth::api_key_auth_middleware,
        ));
    }

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server on `addr`; stops on Ctrl+C.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), WorkforceError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| WorkforceError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("skillmatrix HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WorkforceError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
