//! Create exhibition table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Exhibition::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exhibition::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exhibition::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Exhibition::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Exhibition::VisitDate)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Exhibition::Location).string_len(255))
                    .col(ColumnDef::new(Exhibition::Director).string_len(100))
                    .col(ColumnDef::new(Exhibition::CastMembers).string_len(255))
                    .col(ColumnDef::new(Exhibition::VisitTime).string_len(50))
                    .col(ColumnDef::new(Exhibition::Review).text())
                    .col(
                        ColumnDef::new(Exhibition::BgColor)
                            .string_len(20)
                            .not_null(),
                    )
                    // Weak reference (lookup only, no foreign key): the
                    // cover post may be reassigned by the owner.
                    .col(ColumnDef::new(Exhibition::RepresentativePostId).string_len(32))
                    .col(
                        ColumnDef::new(Exhibition::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Exhibition::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_exhibition_user")
                            .from(Exhibition::Table, Exhibition::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, name, visit_date) - the grouping-key lookup.
        // Deliberately not unique; concurrent misses on the same key
        // can each insert a row.
        manager
            .create_index(
                Index::create()
                    .name("idx_exhibition_grouping_key")
                    .table(Exhibition::Table)
                    .col(Exhibition::UserId)
                    .col(Exhibition::Name)
                    .col(Exhibition::VisitDate)
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's tickets)
        manager
            .create_index(
                Index::create()
                    .name("idx_exhibition_user_id")
                    .table(Exhibition::Table)
                    .col(Exhibition::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Exhibition::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Exhibition {
    Table,
    Id,
    UserId,
    Name,
    VisitDate,
    Location,
    Director,
    CastMembers,
    VisitTime,
    Review,
    BgColor,
    RepresentativePostId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
