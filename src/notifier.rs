use std::sync::Arc;

use tracing::{ error, info };

use crate::channels::{ NotificationChannel, NotificationMessage };
use crate::db::entity::wash_service;
use crate::enums::NotificationType;
use crate::error::Result;
use crate::evaluator::{ AlertMatch, MatchedCondition, PriceChangeEvent };
use crate::services::preference_service::PreferenceService;
use crate::services::price_alert_service::PriceAlertService;

/// Turns evaluator matches into delivered notifications.
pub struct Notifier {
    alerts: PriceAlertService,
    preferences: PreferenceService,
    email: Option<Arc<dyn NotificationChannel>>,
    in_app: Arc<dyn NotificationChannel>,
}

impl Notifier {
    pub fn new(
        alerts: PriceAlertService,
        preferences: PreferenceService,
        email: Option<Arc<dyn NotificationChannel>>,
        in_app: Arc<dyn NotificationChannel>
    ) -> Self {
        Self {
            alerts,
            preferences,
            email,
            in_app,
        }
    }

    /// Deliver notifications for evaluator matches. Failures on one alert
    /// never stop the remaining alerts. Returns how many alerts were
    /// claimed and notified.
    pub async fn notify_matches(
        &self,
        service: &wash_service::Model,
        event: &PriceChangeEvent,
        matches: &[AlertMatch]
    ) -> usize {
        let mut notified = 0;

        for alert_match in matches {
            match self.notify_one(service, event, alert_match).await {
                Ok(true) => {
                    notified += 1;
                }
                Ok(false) => {}
                Err(e) => {
                    error!("Failed to notify alert {}: {}", alert_match.alert_id, e);
                }
            }
        }

        notified
    }

    async fn notify_one(
        &self,
        service: &wash_service::Model,
        event: &PriceChangeEvent,
        alert_match: &AlertMatch
    ) -> Result<bool> {
        // Preference gate: the user may have price alerts muted entirely
        if
            !self.preferences.is_enabled(
                &alert_match.user_id,
                NotificationType::PriceAlert
            ).await?
        {
            return Ok(false);
        }

        // Claim the alert before touching any channel. Losing the claim
        // means another evaluation pass already notified this alert for
        // this price change.
        if !self.alerts.mark_notified(alert_match.alert_id, event.recorded_at).await? {
            info!(
                "Alert {} already claimed for event at {}",
                alert_match.alert_id,
                event.recorded_at
            );
            return Ok(false);
        }

        // The claim stands even when a channel fails; delivery problems
        // are logged, not rolled back.
        let message = build_message(service, event, alert_match);

        if alert_match.notify_email {
            if let Some(email) = &self.email {
                if let Err(e) = email.deliver(&message).await {
                    error!(
                        "{} delivery failed for alert {}: {}",
                        email.name(),
                        alert_match.alert_id,
                        e
                    );
                }
            }
        }

        if alert_match.notify_in_app {
            if let Err(e) = self.in_app.deliver(&message).await {
                error!(
                    "{} delivery failed for alert {}: {}",
                    self.in_app.name(),
                    alert_match.alert_id,
                    e
                );
            }
        }

        Ok(true)
    }
}

fn build_message(
    service: &wash_service::Model,
    event: &PriceChangeEvent,
    alert_match: &AlertMatch
) -> NotificationMessage {
    let condition = match &alert_match.condition {
        MatchedCondition::TargetPrice { target_price } => {
            format!("reached your target of {}", target_price)
        }
        MatchedCondition::PercentageOff { required_percent, actual_percent } => {
            format!("dropped {:.1}% (you asked for {}%)", actual_percent, required_percent)
        }
    };

    let body = format!(
        "{name} is now {new} (was {old}). The price {condition}.",
        name = service.name,
        new = event.new_price,
        old = event.old_price,
        condition = condition
    );

    NotificationMessage {
        user_id: alert_match.user_id.clone(),
        kind: NotificationType::PriceAlert,
        title: format!("Price alert: {}", service.name),
        body,
        alert_id: Some(alert_match.alert_id),
        service_id: Some(alert_match.service_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn service(name: &str) -> wash_service::Model {
        wash_service::Model {
            id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            name: name.to_string(),
            price: 7500,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn price_match(condition: MatchedCondition) -> AlertMatch {
        AlertMatch {
            alert_id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            service_id: Uuid::new_v4(),
            notify_email: true,
            notify_in_app: true,
            condition,
        }
    }

    #[test]
    fn target_message_names_the_target() {
        let event = PriceChangeEvent {
            service_id: Uuid::new_v4(),
            old_price: 10_000,
            new_price: 7500,
            recorded_at: Utc::now(),
        };
        let m = price_match(MatchedCondition::TargetPrice { target_price: 8000 });

        let message = build_message(&service("Deluxe Wash"), &event, &m);

        assert_eq!(message.kind, NotificationType::PriceAlert);
        assert!(message.title.contains("Deluxe Wash"));
        assert!(message.body.contains("7500"));
        assert!(message.body.contains("target of 8000"));
        assert_eq!(message.alert_id, Some(m.alert_id));
    }

    #[test]
    fn percentage_message_reports_the_actual_drop() {
        let event = PriceChangeEvent {
            service_id: Uuid::new_v4(),
            old_price: 10_000,
            new_price: 7500,
            recorded_at: Utc::now(),
        };
        let m = price_match(MatchedCondition::PercentageOff {
            required_percent: 20,
            actual_percent: 25.0,
        });

        let message = build_message(&service("Express Shine"), &event, &m);

        assert!(message.body.contains("dropped 25.0%"));
        assert!(message.body.contains("20%"));
    }
}
