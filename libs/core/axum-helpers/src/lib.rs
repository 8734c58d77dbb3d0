//! # Axum Helpers
//!
//! Shared HTTP plumbing for the club API and its domain crates.
//!
//! - **[`auth`]**: stateless HS256 JWT issue/verify and middleware
//! - **[`extractors`]**: `ValidatedJson`, `UuidPath`, `CurrentUser`, `AdminUser`
//! - **[`errors`]**: `AppError`, stable `ErrorCode`s and the JSON error body
//! - **[`server`]**: router assembly with OpenAPI UIs, health endpoints, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`audit`]**: audit trail on the `audit` tracing target
//!
//! ```ignore
//! use axum_helpers::{CorsConfig, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &CorsConfig::from_env()?);
//! let app = router.merge(health_router(app_info!()));
//! ```

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    ADMIN_ROLE, JwtAuth, JwtClaims, JwtConfig, jwt_auth_middleware, optional_jwt_auth_middleware,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{CorsConfig, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{AdminUser, CurrentUser, UuidPath, UuidPathPair, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
