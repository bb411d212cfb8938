//! Create post table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Post::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Post::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Post::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Post::ArtistName).string_len(255))
                    .col(ColumnDef::new(Post::ImageUrl).string_len(2048).not_null())
                    .col(ColumnDef::new(Post::Description).text())
                    .col(
                        ColumnDef::new(Post::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Post::WorkDate).string_len(50).not_null())
                    .col(ColumnDef::new(Post::Genre).string_len(100))
                    .col(ColumnDef::new(Post::Style).string_len(100))
                    .col(
                        ColumnDef::new(Post::Tags)
                            .json_binary()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Post::Visibility)
                            .string_len(16)
                            .not_null()
                            .default("public"),
                    )
                    .col(ColumnDef::new(Post::ExhibitionId).string_len(32))
                    .col(
                        ColumnDef::new(Post::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_user")
                            .from(Post::Table, Post::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_exhibition")
                            .from(Post::Table, Post::ExhibitionId)
                            .to(Exhibition::Table, Exhibition::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for a user's feed)
        manager
            .create_index(
                Index::create()
                    .name("idx_post_user_id")
                    .table(Post::Table)
                    .col(Post::UserId)
                    .to_owned(),
            )
            .await?;

        // Index: exhibition_id (for listing a ticket's member posts)
        manager
            .create_index(
                Index::create()
                    .name("idx_post_exhibition_id")
                    .table(Post::Table)
                    .col(Post::ExhibitionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Post {
    Table,
    Id,
    UserId,
    Title,
    ArtistName,
    ImageUrl,
    Description,
    Rating,
    WorkDate,
    Genre,
    Style,
    Tags,
    Visibility,
    ExhibitionId,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Exhibition {
    Table,
    Id,
}
