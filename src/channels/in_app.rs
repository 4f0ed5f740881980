use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ ActiveModelTrait, DatabaseConnection, Set };
use uuid::Uuid;

use crate::db::entity::notification;
use crate::error::Result;

use super::{ NotificationChannel, NotificationMessage };

/// Stores notifications as rows the user's app fetches later.
pub struct InAppChannel {
    db: DatabaseConnection,
}

impl InAppChannel {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationChannel for InAppChannel {
    fn name(&self) -> &'static str {
        "in_app"
    }

    async fn deliver(&self, message: &NotificationMessage) -> Result<()> {
        let row = notification::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(message.user_id.clone()),
            kind: Set(message.kind.to_string()),
            title: Set(message.title.clone()),
            body: Set(message.body.clone()),
            alert_id: Set(message.alert_id),
            service_id: Set(message.service_id),
            is_read: Set(false),
            read_at: Set(None),
            created_at: Set(Utc::now()),
        };

        row.insert(&self.db).await?;
        Ok(())
    }
}
