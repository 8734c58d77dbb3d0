use axum::Router;
use domain_users::{PgUserRepository, UserService, handlers};
use tracing::info;

use crate::config::AdminSeed;
use crate::state::AppState;

fn service(state: &AppState) -> UserService<PgUserRepository> {
    UserService::new(PgUserRepository::new(state.db.clone()), state.jwt.clone())
}

pub fn router(state: &AppState) -> Router {
    handlers::router(service(state))
}

/// Create or promote the configured admin account
pub async fn seed_admin(state: &AppState, seed: &AdminSeed) -> eyre::Result<()> {
    let admin = service(state)
        .ensure_admin(&seed.email, &seed.name, &seed.password)
        .await
        .map_err(|e| eyre::eyre!("Failed to seed admin account: {}", e))?;

    info!(user_id = %admin.id, email = %admin.email, "Admin account ready");
    Ok(())
}
