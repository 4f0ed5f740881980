use std::sync::Arc;

use tokio::time::{ interval, Duration };
use tracing::{ debug, error };

use crate::services::price_alert_service::PriceAlertService;
use crate::services::price_event_service::PriceEventService;

/// Periodically re-evaluates every service that has active alerts, so a
/// notification missed on the request path is picked up on a later pass.
/// The notifier's conditional claim keeps the sweep from double-notifying
/// anything the request path already handled.
pub struct Sweeper {
    alerts: PriceAlertService,
    events: Arc<PriceEventService>,
    interval_secs: u64,
}

impl Sweeper {
    pub fn new(
        alerts: PriceAlertService,
        events: Arc<PriceEventService>,
        interval_secs: u64
    ) -> Self {
        Self {
            alerts,
            events,
            interval_secs,
        }
    }

    /// Run forever. Spawned as a background task at startup.
    pub async fn start(self) {
        let mut ticker = interval(Duration::from_secs(self.interval_secs));

        loop {
            ticker.tick().await;

            if let Err(e) = self.sweep().await {
                error!("Alert sweep failed: {}", e);
            }
        }
    }

    async fn sweep(&self) -> crate::error::Result<()> {
        let service_ids = self.alerts.active_service_ids().await?;
        debug!("Sweeping {} services with active alerts", service_ids.len());

        for service_id in service_ids {
            if let Err(e) = self.events.evaluate_service(service_id).await {
                error!("Sweep failed for service {}: {}", service_id, e);
            }
        }

        Ok(())
    }
}
