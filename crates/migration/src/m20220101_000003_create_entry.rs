//! Create `entry` table: one income or expense record owned by a user.
//!
//! `entry_type` and `status` hold the upper-case enum names.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entry::Table)
                    .if_not_exists()
                    .col(uuid(Entry::Id).primary_key())
                    .col(uuid(Entry::UserId).not_null())
                    .col(string_len(Entry::Description, 255).not_null())
                    .col(integer(Entry::Month).not_null())
                    .col(integer(Entry::Year).not_null())
                    .col(decimal_len(Entry::Amount, 16, 2).not_null())
                    .col(string_len(Entry::EntryType, 16).not_null())
                    .col(string_len(Entry::Status, 16).not_null())
                    .col(date(Entry::RegisteredOn).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entry_user")
                            .from(Entry::Table, Entry::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Entry::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Entry {
    Table,
    Id,
    UserId,
    Description,
    Month,
    Year,
    Amount,
    EntryType,
    Status,
    RegisteredOn,
}

#[derive(DeriveIden)]
enum User { Table, Id }
