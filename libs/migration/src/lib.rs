pub use sea_orm_migration::prelude::*;

mod m20260901_000000_bootstrap;
mod m20260901_000001_create_users;
mod m20260901_000002_create_events;
mod m20260901_000003_create_posts;
mod m20260901_000004_create_team_members;
mod m20260901_000005_create_photos;
mod m20260901_000006_create_contact_messages;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000000_bootstrap::Migration),
            Box::new(m20260901_000001_create_users::Migration),
            Box::new(m20260901_000002_create_events::Migration),
            Box::new(m20260901_000003_create_posts::Migration),
            Box::new(m20260901_000004_create_team_members::Migration),
            Box::new(m20260901_000005_create_photos::Migration),
            Box::new(m20260901_000006_create_contact_messages::Migration),
        ]
    }
}

/// `BEFORE UPDATE` trigger keeping `updated_at` current
pub(crate) fn touch_trigger_sql(table: &str) -> String {
    format!(
        "CREATE TRIGGER {table}_touch_updated_at BEFORE UPDATE ON {table} \
         FOR EACH ROW EXECUTE FUNCTION util.touch_updated_at()"
    )
}

pub(crate) fn drop_touch_trigger_sql(table: &str) -> String {
    format!("DROP TRIGGER IF EXISTS {table}_touch_updated_at ON {table}")
}
