//! Users Domain
//!
//! Club accounts: sign-up, password login issuing a bearer JWT, and the
//! startup admin seed.
//!
//! # Features
//!
//! - Password hashing with Argon2id
//! - `member` and `admin` roles, carried in the token `roles` claim
//! - Idempotent [`UserService::ensure_admin`]
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let jwt = JwtAuth::new(&JwtConfig::new("a-development-secret-of-32-chars!!").unwrap());
//! let service = UserService::new(InMemoryUserRepository::new(), jwt);
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use models::{AuthResponse, LoginRequest, RegisterUser, Role, User, UserResponse};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
