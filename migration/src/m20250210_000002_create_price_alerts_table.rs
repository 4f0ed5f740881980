use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(PriceAlerts::Table)
                .if_not_exists()
                .col(ColumnDef::new(PriceAlerts::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(PriceAlerts::UserId).string().not_null())
                .col(ColumnDef::new(PriceAlerts::ServiceId).uuid().not_null())
                .col(ColumnDef::new(PriceAlerts::TargetPrice).big_integer())
                .col(ColumnDef::new(PriceAlerts::PercentageOff).integer())
                .col(ColumnDef::new(PriceAlerts::IsActive).boolean().not_null().default(true))
                .col(ColumnDef::new(PriceAlerts::NotifyEmail).boolean().not_null().default(true))
                .col(ColumnDef::new(PriceAlerts::NotifyInApp).boolean().not_null().default(true))
                .col(ColumnDef::new(PriceAlerts::LastNotifiedAt).timestamp_with_time_zone())
                .col(ColumnDef::new(PriceAlerts::TriggeredCount).integer().not_null().default(0))
                .col(ColumnDef::new(PriceAlerts::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(PriceAlerts::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_price_alerts_service")
                        .from(PriceAlerts::Table, PriceAlerts::ServiceId)
                        .to(WashServices::Table, WashServices::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        // Create indexes
        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_price_alerts_user_id")
                .table(PriceAlerts::Table)
                .col(PriceAlerts::UserId)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_price_alerts_service_active")
                .table(PriceAlerts::Table)
                .col(PriceAlerts::ServiceId)
                .col(PriceAlerts::IsActive)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PriceAlerts::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum PriceAlerts {
    Table,
    Id,
    UserId,
    ServiceId,
    TargetPrice,
    PercentageOff,
    IsActive,
    NotifyEmail,
    NotifyInApp,
    LastNotifiedAt,
    TriggeredCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum WashServices {
    Table,
    Id,
}
