pub mod wash_service;
pub mod price_alert;
pub mod price_history;
pub mod notification_preference;
pub mod notification;

pub use wash_service::Entity as WashService;
pub use price_alert::Entity as PriceAlert;
pub use price_history::Entity as PriceHistory;
pub use notification_preference::Entity as NotificationPreference;
pub use notification::Entity as Notification;
