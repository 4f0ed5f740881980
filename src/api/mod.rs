use std::sync::Arc;

pub mod alerts;
pub mod price_history;
pub mod price_events;
pub mod preferences;
pub mod notifications;

use crate::services::{
    NotificationService,
    PreferenceService,
    PriceAlertService,
    PriceEventService,
    PriceHistoryService,
};

#[derive(Clone)]
pub struct AppState {
    pub alert_service: Arc<PriceAlertService>,
    pub history_service: Arc<PriceHistoryService>,
    pub preference_service: Arc<PreferenceService>,
    pub notification_service: Arc<NotificationService>,
    pub price_event_service: Arc<PriceEventService>,
}

impl AppState {
    pub fn new(
        alert_service: Arc<PriceAlertService>,
        history_service: Arc<PriceHistoryService>,
        preference_service: Arc<PreferenceService>,
        notification_service: Arc<NotificationService>,
        price_event_service: Arc<PriceEventService>
    ) -> Self {
        Self {
            alert_service,
            history_service,
            preference_service,
            notification_service,
            price_event_service,
        }
    }
}
