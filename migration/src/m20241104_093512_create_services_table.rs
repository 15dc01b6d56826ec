use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Services::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Services::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Services::Nickname)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Services::Summary).string_len(255).not_null())
                    .col(ColumnDef::new(Services::Description).text().null())
                    .col(ColumnDef::new(Services::Url).string().null())
                    .col(
                        ColumnDef::new(Services::InDevelopment)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Services::Status)
                            .string_len(16)
                            .not_null()
                            .default("submitted"),
                    )
                    .col(ColumnDef::new(Services::Owner).string().not_null())
                    .col(ColumnDef::new(Services::DateSubmitted).date_time().not_null())
                    .col(ColumnDef::new(Services::DateModified).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Listings filter on status and sort on the date columns
        manager
            .create_index(
                Index::create()
                    .name("idx_services_status")
                    .table(Services::Table)
                    .col(Services::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_services_owner")
                    .table(Services::Table)
                    .col(Services::Owner)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_services_date_submitted")
                    .table(Services::Table)
                    .col(Services::DateSubmitted)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_services_date_modified")
                    .table(Services::Table)
                    .col(Services::DateModified)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id, // Primary key, UUID
    Name,
    Nickname,
    Summary,
    Description,
    Url,
    InDevelopment,
    Status,
    Owner,
    DateSubmitted,
    DateModified,
}
