use crate::{drop_touch_trigger_sql, touch_trigger_sql};
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(pk_uuid(TeamMembers::Id))
                    .col(string(TeamMembers::Name))
                    .col(string(TeamMembers::Position))
                    .col(text(TeamMembers::Bio).default(""))
                    .col(string_null(TeamMembers::PhotoUrl))
                    .col(string_null(TeamMembers::Email))
                    .col(integer(TeamMembers::DisplayOrder).default(0))
                    .col(boolean(TeamMembers::Active).default(true))
                    .col(
                        timestamp_with_time_zone(TeamMembers::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(TeamMembers::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_team_members_display_order")
                    .table(TeamMembers::Table)
                    .col(TeamMembers::DisplayOrder)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(&touch_trigger_sql("team_members"))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&drop_touch_trigger_sql("team_members"))
            .await?;

        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum TeamMembers {
    Table,
    Id,
    Name,
    Position,
    Bio,
    PhotoUrl,
    Email,
    DisplayOrder,
    Active,
    CreatedAt,
    UpdatedAt,
}
