//! Shared application state, handed to every route module at startup.

use axum_helpers::JwtAuth;
use notifications::SharedNotifier;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
    pub jwt: JwtAuth,
    /// Sink for registration and contact notifications
    pub notifier: SharedNotifier,
}
