use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Entry: listing by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_entry_user")
                    .table(Entry::Table)
                    .col(Entry::UserId)
                    .to_owned(),
            )
            .await?;

        // Entry: balance sums by (user, type)
        manager
            .create_index(
                Index::create()
                    .name("idx_entry_user_type")
                    .table(Entry::Table)
                    .col(Entry::UserId)
                    .col(Entry::EntryType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_entry_user").table(Entry::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_entry_user_type").table(Entry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Entry { Table, UserId, EntryType }
