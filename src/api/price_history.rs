use axum::{ extract::{ Path, Query, State }, Json };
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::db::entity::price_history;
use crate::error::Result;
use crate::services::price_history_service::{ compute_stats, PriceStats };

use super::AppState;

const DEFAULT_HISTORY_LIMIT: u64 = 100;

#[derive(Deserialize)]
pub struct HistoryQueryParams {
    pub limit: Option<u64>,
}

pub async fn get_price_history(
    State(state): State<AppState>,
    Path(service_id): Path<Uuid>,
    Query(params): Query<HistoryQueryParams>
) -> Result<Json<PriceHistoryResponse>> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let entries = state.history_service.history(service_id, Some(limit)).await?;
    let stats = compute_stats(&entries);

    Ok(
        Json(PriceHistoryResponse {
            entries: entries
                .into_iter()
                .map(|entry| entry.into())
                .collect(),
            stats,
        })
    )
}

#[derive(Serialize)]
pub struct PriceHistoryResponse {
    pub entries: Vec<PriceHistoryEntry>,
    pub stats: PriceStats,
}

#[derive(Serialize)]
pub struct PriceHistoryEntry {
    pub id: Uuid,
    pub service_id: Uuid,
    pub price: i64,
    pub old_price: Option<i64>,
    pub change_type: String,
    pub recorded_at: String,
}

impl From<price_history::Model> for PriceHistoryEntry {
    fn from(entry: price_history::Model) -> Self {
        Self {
            id: entry.id,
            service_id: entry.service_id,
            price: entry.price,
            old_price: entry.old_price,
            change_type: entry.change_type,
            recorded_at: entry.recorded_at.to_rfc3339(),
        }
    }
}
