use crate::{drop_touch_trigger_sql, touch_trigger_sql};
use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(EventStatus::Enum)
                    .values([EventStatus::Draft, EventStatus::Open, EventStatus::Closed])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(pk_uuid(Events::Id))
                    .col(string(Events::Title))
                    .col(text(Events::Description).default(""))
                    .col(string(Events::Location).default(""))
                    .col(timestamp_with_time_zone(Events::StartsAt))
                    .col(timestamp_with_time_zone_null(Events::EndsAt))
                    .col(integer_null(Events::Capacity))
                    .col(integer(Events::CurrentCount).default(0))
                    .col(
                        ColumnDef::new(Events::Status)
                            .enumeration(
                                EventStatus::Enum,
                                [EventStatus::Draft, EventStatus::Open, EventStatus::Closed],
                            )
                            .not_null()
                            .default("open"),
                    )
                    .col(
                        timestamp_with_time_zone(Events::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Events::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Backstop for the counter; the service checks before it writes.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE events
                    ADD CONSTRAINT events_current_count_check
                    CHECK (current_count >= 0 AND (capacity IS NULL OR current_count <= capacity))
                "#,
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_starts_at")
                    .table(Events::Table)
                    .col(Events::StartsAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_status")
                    .table(Events::Table)
                    .col(Events::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(&touch_trigger_sql("events"))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(pk_uuid(Participants::Id))
                    .col(string(Participants::Name))
                    .col(string_uniq(Participants::Email))
                    .col(string_null(Participants::ExternalId))
                    .col(string(Participants::Program))
                    .col(integer(Participants::Year))
                    .col(
                        timestamp_with_time_zone(Participants::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // NULLs never collide, so participants without a student number are unconstrained.
        manager
            .create_index(
                Index::create()
                    .name("idx_participants_external_id")
                    .table(Participants::Table)
                    .col(Participants::ExternalId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Registrations::Table)
                    .if_not_exists()
                    .col(pk_uuid(Registrations::Id))
                    .col(uuid(Registrations::ParticipantId))
                    .col(uuid(Registrations::EventId))
                    .col(
                        timestamp_with_time_zone(Registrations::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registrations_event_id")
                            .from(Registrations::Table, Registrations::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registrations_participant_id")
                            .from(Registrations::Table, Registrations::ParticipantId)
                            .to(Participants::Table, Participants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_registrations_participant_event")
                    .table(Registrations::Table)
                    .col(Registrations::ParticipantId)
                    .col(Registrations::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_registrations_event_created_at")
                    .table(Registrations::Table)
                    .col(Registrations::EventId)
                    .col(Registrations::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Registrations::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Participants::Table).to_owned())
            .await?;

        manager
            .get_connection()
            .execute_unprepared(&drop_touch_trigger_sql("events"))
            .await?;

        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(EventStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Events {
    Table,
    Id,
    Title,
    Description,
    Location,
    StartsAt,
    EndsAt,
    Capacity,
    CurrentCount,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Participants {
    Table,
    Id,
    Name,
    Email,
    ExternalId,
    Program,
    Year,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Registrations {
    Table,
    Id,
    ParticipantId,
    EventId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum EventStatus {
    #[sea_orm(iden = "event_status")]
    Enum,
    #[sea_orm(iden = "draft")]
    Draft,
    #[sea_orm(iden = "open")]
    Open,
    #[sea_orm(iden = "closed")]
    Closed,
}
