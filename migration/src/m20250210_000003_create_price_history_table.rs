use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(PriceHistory::Table)
                .if_not_exists()
                .col(ColumnDef::new(PriceHistory::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(PriceHistory::ServiceId).uuid().not_null())
                .col(ColumnDef::new(PriceHistory::Price).big_integer().not_null())
                .col(ColumnDef::new(PriceHistory::OldPrice).big_integer())
                .col(ColumnDef::new(PriceHistory::ChangeType).string_len(20).not_null())
                .col(ColumnDef::new(PriceHistory::RecordedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_price_history_service")
                        .from(PriceHistory::Table, PriceHistory::ServiceId)
                        .to(WashServices::Table, WashServices::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        // Newest-first reads per service
        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_price_history_service_recorded_at")
                .table(PriceHistory::Table)
                .col(PriceHistory::ServiceId)
                .col(PriceHistory::RecordedAt)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PriceHistory::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum PriceHistory {
    Table,
    Id,
    ServiceId,
    Price,
    OldPrice,
    ChangeType,
    RecordedAt,
}

#[derive(Iden)]
enum WashServices {
    Table,
    Id,
}
