use chrono::{ DateTime, Utc };
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
use serde::Serialize;
use uuid::Uuid;

use crate::db::entity::price_history;
use crate::enums::PriceChangeType;
use crate::error::Result;

#[derive(Clone)]
pub struct PriceHistoryService {
    db: DatabaseConnection,
}

/// Derived statistics over a history window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStats {
    pub min_price: i64,
    pub max_price: i64,
    pub average_price: f64,
    pub change: i64,
    pub change_percent: f64,
}

impl PriceHistoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append one history entry. Entries are never updated or deleted.
    pub async fn append(
        &self,
        service_id: Uuid,
        old_price: Option<i64>,
        new_price: i64,
        recorded_at: DateTime<Utc>
    ) -> Result<price_history::Model> {
        let entry = price_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            service_id: Set(service_id),
            price: Set(new_price),
            old_price: Set(old_price),
            change_type: Set(PriceChangeType::of(old_price, new_price).to_string()),
            recorded_at: Set(recorded_at),
        };

        let entry = entry.insert(&self.db).await?;
        Ok(entry)
    }

    /// History for a service, newest first
    pub async fn history(
        &self,
        service_id: Uuid,
        limit: Option<u64>
    ) -> Result<Vec<price_history::Model>> {
        let mut query = price_history::Entity
            ::find()
            .filter(price_history::Column::ServiceId.eq(service_id))
            .order_by_desc(price_history::Column::RecordedAt);

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let entries = query.all(&self.db).await?;
        Ok(entries)
    }

    /// The most recent entry for a service, if any
    pub async fn latest_entry(&self, service_id: Uuid) -> Result<Option<price_history::Model>> {
        let entry = price_history::Entity
            ::find()
            .filter(price_history::Column::ServiceId.eq(service_id))
            .order_by_desc(price_history::Column::RecordedAt)
            .one(&self.db).await?;

        Ok(entry)
    }
}

/// Statistics over a newest-first history window. Change fields compare the
/// newest entry against the oldest in the window and stay 0 for windows of
/// fewer than two entries, so there is never a division by zero.
pub fn compute_stats(entries: &[price_history::Model]) -> PriceStats {
    if entries.is_empty() {
        return PriceStats {
            min_price: 0,
            max_price: 0,
            average_price: 0.0,
            change: 0,
            change_percent: 0.0,
        };
    }

    let mut min_price = i64::MAX;
    let mut max_price = i64::MIN;
    let mut sum: i128 = 0;

    for entry in entries {
        min_price = min_price.min(entry.price);
        max_price = max_price.max(entry.price);
        sum += entry.price as i128;
    }

    let average_price = (sum as f64) / (entries.len() as f64);

    let (change, change_percent) = if entries.len() < 2 {
        (0, 0.0)
    } else {
        let newest = entries[0].price;
        let oldest = entries[entries.len() - 1].price;
        let change = newest - oldest;
        let change_percent = if oldest != 0 {
            ((change as f64) / (oldest as f64)) * 100.0
        } else {
            0.0
        };
        (change, change_percent)
    };

    PriceStats {
        min_price,
        max_price,
        average_price,
        change,
        change_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(price: i64) -> price_history::Model {
        price_history::Model {
            id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            price,
            old_price: None,
            change_type: "no_change".to_string(),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn empty_window_yields_zero_stats() {
        let stats = compute_stats(&[]);
        assert_eq!(stats, PriceStats {
            min_price: 0,
            max_price: 0,
            average_price: 0.0,
            change: 0,
            change_percent: 0.0,
        });
    }

    #[test]
    fn single_entry_has_no_change() {
        let stats = compute_stats(&[entry(7500)]);

        assert_eq!(stats.min_price, 7500);
        assert_eq!(stats.max_price, 7500);
        assert!((stats.average_price - 7500.0).abs() < 1e-9);
        assert_eq!(stats.change, 0);
        assert_eq!(stats.change_percent, 0.0);
    }

    #[test]
    fn window_stats_compare_newest_against_oldest() {
        // Newest first: 12000 now, 10000 at the start of the window
        let entries = vec![entry(12_000), entry(8000), entry(10_000)];
        let stats = compute_stats(&entries);

        assert_eq!(stats.min_price, 8000);
        assert_eq!(stats.max_price, 12_000);
        assert!((stats.average_price - 10_000.0).abs() < 1e-9);
        assert_eq!(stats.change, 2000);
        assert!((stats.change_percent - 20.0).abs() < 1e-9);
    }

    #[test]
    fn drops_report_negative_change() {
        let entries = vec![entry(7500), entry(10_000)];
        let stats = compute_stats(&entries);

        assert_eq!(stats.change, -2500);
        assert!((stats.change_percent + 25.0).abs() < 1e-9);
    }
}
