//! Initial schema: users, sheets, accounts payable and receivable.

use sea_orm::DatabaseBackend;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let sqlite = manager.get_database_backend() == DatabaseBackend::Sqlite;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::EmailValidated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::EmailValidatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::RecoverSentAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sheets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sheets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sheets::Description).string_len(255).not_null())
                    .col(ColumnDef::new(Sheets::CreatorUserId).integer().not_null())
                    .col(
                        ColumnDef::new(Sheets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Sheets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sheets_creator_user")
                            .from(Sheets::Table, Sheets::CreatorUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sheets_creator_user")
                    .table(Sheets::Table)
                    .col(Sheets::CreatorUserId)
                    .to_owned(),
            )
            .await?;

        for table in [Entry::AccountsPayable, Entry::AccountsReceivable] {
            manager
                .create_table(entry_table(table, sqlite))
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name(format!("idx_{}_sheet", table.to_string()))
                        .table(table)
                        .col(Entry::SheetId)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [Entry::AccountsReceivable, Entry::AccountsPayable] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        manager
            .drop_table(Table::drop().table(Sheets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

/// Payable and receivable tables share one shape.
fn entry_table(table: Entry, sqlite: bool) -> TableCreateStatement {
    let mut value = ColumnDef::new(Entry::Value);
    // SQLite has no fixed-point type; sea-orm reads REAL into Decimal there.
    if sqlite {
        value.double();
    } else {
        value.decimal_len(14, 4);
    }
    value.not_null();

    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(Entry::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Entry::Description).string_len(255).not_null())
        .col(&mut value)
        .col(ColumnDef::new(Entry::CreatorUserId).integer().not_null())
        .col(ColumnDef::new(Entry::SheetId).integer().not_null())
        .col(
            ColumnDef::new(Entry::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Entry::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{}_sheet", table.to_string()))
                .from(table, Entry::SheetId)
                .to(Sheets::Table, Sheets::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{}_creator_user", table.to_string()))
                .from(table, Entry::CreatorUserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Name,
    PasswordHash,
    EmailValidated,
    EmailValidatedAt,
    RecoverSentAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Sheets {
    Table,
    Id,
    Description,
    CreatorUserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum Entry {
    AccountsPayable,
    AccountsReceivable,
    Id,
    Description,
    Value,
    CreatorUserId,
    SheetId,
    CreatedAt,
    UpdatedAt,
}
