use axum::{ extract::{ Path, Query, State }, http::StatusCode, Json };
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::db::entity::price_alert;
use crate::error::Result;
use crate::services::price_alert_service::{ AlertUpdate, NewAlert };

use super::AppState;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CreateAlertRequest {
    pub user_id: String,
    pub service_id: Uuid,
    #[serde(default)]
    pub target_price: Option<i64>,
    #[serde(default)]
    pub percentage_off: Option<i32>,
    #[serde(default = "default_true")]
    pub notify_email: bool,
    #[serde(default = "default_true")]
    pub notify_in_app: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAlertRequest {
    #[serde(default)]
    pub target_price: Option<i64>,
    #[serde(default)]
    pub percentage_off: Option<i32>,
    #[serde(default)]
    pub notify_email: Option<bool>,
    #[serde(default)]
    pub notify_in_app: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListAlertsParams {
    pub user_id: String,
    #[serde(default)]
    pub active_only: bool,
}

#[derive(Deserialize)]
pub struct OwnerParams {
    pub user_id: String,
}

pub async fn create_alert(
    State(state): State<AppState>,
    Json(request): Json<CreateAlertRequest>
) -> Result<Json<AlertResponse>> {
    let alert = state.alert_service.create_alert(NewAlert {
        user_id: request.user_id,
        service_id: request.service_id,
        target_price: request.target_price,
        percentage_off: request.percentage_off,
        notify_email: request.notify_email,
        notify_in_app: request.notify_in_app,
    }).await?;

    Ok(Json(alert.into()))
}

pub async fn list_alerts(
    State(state): State<AppState>,
    Query(params): Query<ListAlertsParams>
) -> Result<Json<Vec<AlertResponse>>> {
    let alerts = state.alert_service.list_user_alerts(&params.user_id, params.active_only).await?;

    let response: Vec<AlertResponse> = alerts
        .into_iter()
        .map(|alert| alert.into())
        .collect();

    Ok(Json(response))
}

pub async fn get_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<Uuid>,
    Query(params): Query<OwnerParams>
) -> Result<Json<AlertResponse>> {
    let alert = state.alert_service.get_alert(alert_id, &params.user_id).await?;

    Ok(Json(alert.into()))
}

pub async fn update_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<Uuid>,
    Query(params): Query<OwnerParams>,
    Json(request): Json<UpdateAlertRequest>
) -> Result<Json<AlertResponse>> {
    let update = AlertUpdate {
        target_price: request.target_price,
        percentage_off: request.percentage_off,
        notify_email: request.notify_email,
        notify_in_app: request.notify_in_app,
        is_active: request.is_active,
    };

    let alert = state.alert_service.update_alert(alert_id, &params.user_id, update).await?;

    Ok(Json(alert.into()))
}

pub async fn delete_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<Uuid>,
    Query(params): Query<OwnerParams>
) -> Result<StatusCode> {
    state.alert_service.delete_alert(alert_id, &params.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct AlertResponse {
    pub id: Uuid,
    pub user_id: String,
    pub service_id: Uuid,
    pub target_price: Option<i64>,
    pub percentage_off: Option<i32>,
    pub is_active: bool,
    pub notify_email: bool,
    pub notify_in_app: bool,
    pub last_notified_at: Option<String>,
    pub triggered_count: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<price_alert::Model> for AlertResponse {
    fn from(alert: price_alert::Model) -> Self {
        Self {
            id: alert.id,
            user_id: alert.user_id,
            service_id: alert.service_id,
            target_price: alert.target_price,
            percentage_off: alert.percentage_off,
            is_active: alert.is_active,
            notify_email: alert.notify_email,
            notify_in_app: alert.notify_in_app,
            last_notified_at: alert.last_notified_at.map(|t| t.to_rfc3339()),
            triggered_count: alert.triggered_count,
            created_at: alert.created_at.to_rfc3339(),
            updated_at: alert.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults_channels_on() {
        let request: CreateAlertRequest = serde_json
            ::from_str(
                r#"{
                    "user_id": "user-1",
                    "service_id": "00000000-0000-0000-0000-000000000001",
                    "target_price": 8000
                }"#
            )
            .unwrap();

        assert!(request.notify_email);
        assert!(request.notify_in_app);
        assert_eq!(request.target_price, Some(8000));
        assert_eq!(request.percentage_off, None);
    }

    #[test]
    fn create_request_respects_explicit_flags() {
        let request: CreateAlertRequest = serde_json
            ::from_str(
                r#"{
                    "user_id": "user-1",
                    "service_id": "00000000-0000-0000-0000-000000000001",
                    "percentage_off": 15,
                    "notify_email": false
                }"#
            )
            .unwrap();

        assert!(!request.notify_email);
        assert!(request.notify_in_app);
        assert_eq!(request.percentage_off, Some(15));
    }

    #[test]
    fn update_request_leaves_absent_fields_unset() {
        let request: UpdateAlertRequest = serde_json
            ::from_str(r#"{ "is_active": false }"#)
            .unwrap();

        assert_eq!(request.is_active, Some(false));
        assert_eq!(request.target_price, None);
        assert_eq!(request.notify_email, None);
    }
}
