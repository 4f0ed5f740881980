use async_trait::async_trait;
use uuid::Uuid;

use crate::enums::NotificationType;
use crate::error::Result;

pub mod email;
pub mod in_app;

pub use email::EmailChannel;
pub use in_app::InAppChannel;

/// A rendered notification ready for delivery.
#[derive(Debug, Clone)]
pub struct NotificationMessage {
    pub user_id: String,
    pub kind: NotificationType,
    pub title: String,
    pub body: String,
    pub alert_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
}

#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Channel name used in logs
    fn name(&self) -> &'static str;

    /// Deliver one message to one user
    async fn deliver(&self, message: &NotificationMessage) -> Result<()>;
}
