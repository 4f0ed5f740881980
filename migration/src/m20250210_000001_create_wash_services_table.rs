use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(WashServices::Table)
                .if_not_exists()
                .col(ColumnDef::new(WashServices::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(WashServices::ProviderId).uuid().not_null())
                .col(ColumnDef::new(WashServices::Name).string().not_null())
                .col(ColumnDef::new(WashServices::Price).big_integer().not_null())
                .col(ColumnDef::new(WashServices::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(WashServices::UpdatedAt).timestamp_with_time_zone().not_null())
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_wash_services_provider_id")
                .table(WashServices::Table)
                .col(WashServices::ProviderId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(WashServices::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum WashServices {
    Table,
    Id,
    ProviderId,
    Name,
    Price,
    CreatedAt,
    UpdatedAt,
}
