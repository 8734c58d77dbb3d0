use crate::m20260901_000002_create_events::Events;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Photos::Table)
                    .if_not_exists()
                    .col(pk_uuid(Photos::Id))
                    .col(string(Photos::Title))
                    .col(text(Photos::Caption).default(""))
                    .col(string(Photos::ImageUrl))
                    .col(uuid_null(Photos::EventId))
                    .col(timestamp_with_time_zone_null(Photos::TakenAt))
                    .col(
                        timestamp_with_time_zone(Photos::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photos_event_id")
                            .from(Photos::Table, Photos::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_photos_event_id")
                    .table(Photos::Table)
                    .col(Photos::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_photos_created_at")
                    .table(Photos::Table)
                    .col(Photos::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Photos::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Photos {
    Table,
    Id,
    Title,
    Caption,
    ImageUrl,
    EventId,
    TakenAt,
    CreatedAt,
}
