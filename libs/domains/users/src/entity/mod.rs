//! Sea-ORM entity for the `users` table

pub mod user;

/// OpenAPI tag shared by the auth routes
pub const TAG: &str = "auth";
