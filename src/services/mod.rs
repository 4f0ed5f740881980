pub mod price_alert_service;
pub mod price_history_service;
pub mod preference_service;
pub mod notification_service;
pub mod price_event_service;

pub use price_alert_service::PriceAlertService;
pub use price_history_service::PriceHistoryService;
pub use preference_service::PreferenceService;
pub use notification_service::NotificationService;
pub use price_event_service::PriceEventService;
