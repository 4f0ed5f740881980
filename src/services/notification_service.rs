use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
    QueryOrder,
    QuerySelect,
    Set,
};
use uuid::Uuid;

use crate::db::entity::notification;
use crate::error::{ AppError, Result };

#[derive(Clone)]
pub struct NotificationService {
    db: DatabaseConnection,
}

impl NotificationService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List a user's in-app notifications, newest first
    pub async fn list_for_user(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: Option<u64>
    ) -> Result<Vec<notification::Model>> {
        let mut query = notification::Entity
            ::find()
            .filter(notification::Column::UserId.eq(user_id))
            .order_by_desc(notification::Column::CreatedAt);

        if unread_only {
            query = query.filter(notification::Column::IsRead.eq(false));
        }

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let notifications = query.all(&self.db).await?;
        Ok(notifications)
    }

    /// Mark one notification read. Only the owner can mark it.
    pub async fn mark_read(&self, id: Uuid, user_id: &str) -> Result<notification::Model> {
        let notification = notification::Entity
            ::find_by_id(id)
            .filter(notification::Column::UserId.eq(user_id))
            .one(&self.db).await?
            .ok_or(AppError::NotificationNotFound)?;

        // Repeated reads keep the first read_at
        if notification.is_read {
            return Ok(notification);
        }

        let mut active: notification::ActiveModel = notification.into();
        active.is_read = Set(true);
        active.read_at = Set(Some(Utc::now()));

        Ok(active.update(&self.db).await?)
    }
}
