use std::sync::Arc;

use chrono::{ Duration, Utc };
use sea_orm::DatabaseConnection;
use tracing::{ info, warn };
use uuid::Uuid;

use crate::db::WashServiceRepository;
use crate::db::entity::{ price_history, wash_service };
use crate::error::{ AppError, Result };
use crate::evaluator::{ self, PriceChangeEvent };
use crate::notifier::Notifier;
use crate::services::price_alert_service::PriceAlertService;
use crate::services::price_history_service::PriceHistoryService;
use crate::validate::validate_new_price;

/// Outcome of one recorded price change.
#[derive(Debug, Clone)]
pub struct PriceEventOutcome {
    pub entry: price_history::Model,
    pub matched: usize,
    pub notified: usize,
}

/// The price-change intake: records a move, then runs evaluation and
/// notification on the same path. The background sweeper reuses the
/// evaluation half.
pub struct PriceEventService {
    services: WashServiceRepository,
    alerts: PriceAlertService,
    history: PriceHistoryService,
    notifier: Arc<Notifier>,
    renotify_cooldown: Duration,
}

impl PriceEventService {
    pub fn new(
        db: DatabaseConnection,
        notifier: Arc<Notifier>,
        renotify_cooldown_secs: i64
    ) -> Self {
        Self {
            services: WashServiceRepository::new(db.clone()),
            alerts: PriceAlertService::new(db.clone()),
            history: PriceHistoryService::new(db),
            notifier,
            renotify_cooldown: Duration::seconds(renotify_cooldown_secs),
        }
    }

    /// Record a price change reported by the marketplace: update the list
    /// price, append a history entry, evaluate alerts and notify.
    pub async fn record_price_event(
        &self,
        service_id: Uuid,
        new_price: i64
    ) -> Result<PriceEventOutcome> {
        validate_new_price(new_price)?;

        let service = self.services.find_by_id(service_id).await?;
        let old_price = service.price;
        let recorded_at = Utc::now();

        let service = self.services.update_price(service, new_price).await?;
        let entry = self.history.append(
            service_id,
            Some(old_price),
            new_price,
            recorded_at
        ).await?;

        let event = PriceChangeEvent {
            service_id,
            old_price,
            new_price,
            recorded_at,
        };

        let (matched, notified) = self.run_alerts(&service, &event).await?;

        info!(
            "Recorded price change for service {}: {} -> {} ({} matched, {} notified)",
            service_id,
            old_price,
            new_price,
            matched,
            notified
        );

        Ok(PriceEventOutcome {
            entry,
            matched,
            notified,
        })
    }

    /// Re-evaluate a service against its newest recorded price. Used by the
    /// background sweeper; an unknown service or an empty history is a
    /// logged no-op, never an error.
    pub async fn evaluate_service(&self, service_id: Uuid) -> Result<usize> {
        let service = match self.services.find_by_id(service_id).await {
            Ok(service) => service,
            Err(AppError::ServiceNotFound) => {
                warn!("Skipping evaluation for unknown service {}", service_id);
                return Ok(0);
            }
            Err(e) => {
                return Err(e);
            }
        };

        let Some(entry) = self.history.latest_entry(service_id).await? else {
            return Ok(0);
        };

        let event = PriceChangeEvent {
            service_id,
            old_price: entry.old_price.unwrap_or(entry.price),
            new_price: entry.price,
            recorded_at: entry.recorded_at,
        };

        let (_, notified) = self.run_alerts(&service, &event).await?;
        Ok(notified)
    }

    async fn run_alerts(
        &self,
        service: &wash_service::Model,
        event: &PriceChangeEvent
    ) -> Result<(usize, usize)> {
        let alerts = self.alerts.active_alerts_for_service(event.service_id).await?;
        let matches = evaluator::evaluate_alerts(&alerts, event, self.renotify_cooldown);
        let matched = matches.len();

        let notified = self.notifier.notify_matches(service, event, &matches).await;

        Ok((matched, notified))
    }
}
