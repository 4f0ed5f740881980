pub use sea_orm_migration::prelude::*;

mod m20250210_000001_create_wash_services_table;
mod m20250210_000002_create_price_alerts_table;
mod m20250210_000003_create_price_history_table;
mod m20250210_000004_create_notification_preferences_table;
mod m20250210_000005_create_notifications_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250210_000001_create_wash_services_table::Migration),
            Box::new(m20250210_000002_create_price_alerts_table::Migration),
            Box::new(m20250210_000003_create_price_history_table::Migration),
            Box::new(m20250210_000004_create_notification_preferences_table::Migration),
            Box::new(m20250210_000005_create_notifications_table::Migration)
        ]
    }
}
