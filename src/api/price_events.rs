use axum::{ extract::{ Path, State }, Json };
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::error::Result;

use super::AppState;
use super::price_history::PriceHistoryEntry;

#[derive(Deserialize)]
pub struct PriceEventRequest {
    pub price: i64,
}

#[derive(Serialize)]
pub struct PriceEventResponse {
    pub entry: PriceHistoryEntry,
    pub matched_alerts: usize,
    pub notifications_sent: usize,
}

/// Price-change intake from the marketplace's service catalog.
pub async fn record_price_event(
    State(state): State<AppState>,
    Path(service_id): Path<Uuid>,
    Json(request): Json<PriceEventRequest>
) -> Result<Json<PriceEventResponse>> {
    let outcome = state.price_event_service.record_price_event(service_id, request.price).await?;

    Ok(
        Json(PriceEventResponse {
            entry: outcome.entry.into(),
            matched_alerts: outcome.matched,
            notifications_sent: outcome.notified,
        })
    )
}
