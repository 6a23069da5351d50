use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactProfiles::ContactId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContactProfiles::Document).json().not_null())
                    .col(
                        ColumnDef::new(ContactProfiles::UpdatedAt)
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
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscriptions::ContactId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subscriptions::Document).json().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::UpdatedAt)
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
                    .table(Journals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Journals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Journals::ContactId).string().not_null())
                    .col(ColumnDef::new(Journals::ContactCode).string().not_null())
                    .col(ColumnDef::new(Journals::Document).json().not_null())
                    .col(
                        ColumnDef::new(Journals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_journals_contact_id")
                    .table(Journals::Table)
                    .col(Journals::ContactId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Journals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContactProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ContactProfiles {
    Table,
    ContactId,
    Document,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    ContactId,
    Document,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Journals {
    Table,
    Id,
    ContactId,
    ContactCode,
    Document,
    CreatedAt,
}
