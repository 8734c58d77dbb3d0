//! Stateless JWT authentication.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, optional_jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//! let app = routes.layer(axum::middleware::from_fn_with_state(
//!     auth,
//!     optional_jwt_auth_middleware,
//! ));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::{DEFAULT_TOKEN_TTL_SECS, JwtConfig};
pub use jwt::{ADMIN_ROLE, JwtAuth, JwtClaims};
pub use middleware::{extract_token, jwt_auth_middleware, optional_jwt_auth_middleware};
