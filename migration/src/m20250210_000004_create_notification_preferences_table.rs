use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(NotificationPreferences::Table)
                .if_not_exists()
                .col(ColumnDef::new(NotificationPreferences::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(NotificationPreferences::UserId).string().not_null())
                .col(ColumnDef::new(NotificationPreferences::Kind).string_len(50).not_null())
                .col(ColumnDef::new(NotificationPreferences::Enabled).boolean().not_null().default(true))
                .col(
                    ColumnDef::new(NotificationPreferences::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .col(
                    ColumnDef::new(NotificationPreferences::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .to_owned()
        ).await?;

        // One row per (user, kind); the upsert path relies on this
        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_notification_preferences_user_kind")
                .table(NotificationPreferences::Table)
                .col(NotificationPreferences::UserId)
                .col(NotificationPreferences::Kind)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(NotificationPreferences::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum NotificationPreferences {
    Table,
    Id,
    UserId,
    Kind,
    Enabled,
    CreatedAt,
    UpdatedAt,
}
