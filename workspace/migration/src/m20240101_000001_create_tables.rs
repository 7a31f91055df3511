use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create entries table
        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(pk_auto(Entries::Id))
                    .col(string(Entries::Scope).string_len(20))
                    .col(string(Entries::Kind).string_len(20))
                    .col(boolean(Entries::IsFixed))
                    .col(string(Entries::Frequency).string_len(20))
                    .col(string(Entries::Label))
                    .col(decimal(Entries::Amount).decimal_len(16, 4))
                    .col(string(Entries::Currency).string_len(20))
                    .col(string_null(Entries::Note))
                    .col(string_null(Entries::RecordedBy))
                    .col(date(Entries::Date))
                    .col(date_null(Entries::DueDate))
                    .to_owned(),
            )
            .await?;

        // Create labels table
        manager
            .create_table(
                Table::create()
                    .table(Labels::Table)
                    .if_not_exists()
                    .col(pk_auto(Labels::Id))
                    .col(string(Labels::Name).unique_key())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Labels::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Entries::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Define identifiers for all tables

#[derive(DeriveIden)]
enum Entries {
    Table,
    Id,
    Scope,
    Kind,
    IsFixed,
    Frequency,
    Label,
    Amount,
    Currency,
    Note,
    RecordedBy,
    Date,
    DueDate,
}

#[derive(DeriveIden)]
enum Labels {
    Table,
    Id,
    Name,
}
