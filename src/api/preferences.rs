use std::collections::HashMap;

use axum::{ extract::{ Path, State }, Json };
use serde::{ Deserialize, Serialize };

use crate::enums::NotificationType;
use crate::error::Result;
use crate::services::preference_service::PreferenceState;
use crate::validate::parse_preference_updates;

use super::AppState;

#[derive(Deserialize)]
pub struct UpdatePreferenceRequest {
    pub enabled: bool,
}

pub async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>
) -> Result<Json<Vec<PreferenceResponse>>> {
    let preferences = state.preference_service.get_all(&user_id).await?;

    let response: Vec<PreferenceResponse> = preferences
        .into_iter()
        .map(|pref| pref.into())
        .collect();

    Ok(Json(response))
}

pub async fn update_preference(
    State(state): State<AppState>,
    Path((user_id, kind)): Path<(String, String)>,
    Json(request): Json<UpdatePreferenceRequest>
) -> Result<Json<PreferenceResponse>> {
    let kind: NotificationType = kind.parse()?;
    let preference = state.preference_service.update(&user_id, kind, request.enabled).await?;

    Ok(Json(preference.into()))
}

/// Bulk update from a `{ kind: enabled }` map. Every kind is validated
/// before the transaction starts, so one bad kind changes nothing.
pub async fn bulk_update_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<HashMap<String, bool>>
) -> Result<Json<Vec<PreferenceResponse>>> {
    let updates = parse_preference_updates(&request)?;
    let preferences = state.preference_service.bulk_update(&user_id, &updates).await?;

    let response: Vec<PreferenceResponse> = preferences
        .into_iter()
        .map(|pref| pref.into())
        .collect();

    Ok(Json(response))
}

#[derive(Serialize)]
pub struct PreferenceResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub enabled: bool,
}

impl From<PreferenceState> for PreferenceResponse {
    fn from(pref: PreferenceState) -> Self {
        Self {
            kind: pref.kind.to_string(),
            enabled: pref.enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_serializes_kind_as_type() {
        let response = PreferenceResponse {
            kind: NotificationType::PriceAlert.to_string(),
            enabled: false,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "price_alert");
        assert_eq!(json["enabled"], false);
    }
}
