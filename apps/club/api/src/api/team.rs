use axum::Router;
use domain_team::{PgTeamRepository, TeamService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgTeamRepository::new(state.db.clone());
    handlers::router(TeamService::new(repository))
}
