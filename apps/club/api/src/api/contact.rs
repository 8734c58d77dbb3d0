use axum::Router;
use domain_contact::{ContactService, PgContactRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgContactRepository::new(state.db.clone());
    let service = ContactService::new(repository).with_notifier(state.notifier.clone());
    handlers::router(service)
}
