use axum::{ extract::{ Path, Query, State }, Json };
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::db::entity::notification;
use crate::error::Result;

use super::AppState;

const DEFAULT_NOTIFICATION_LIMIT: u64 = 50;

#[derive(Deserialize)]
pub struct NotificationQueryParams {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct OwnerParams {
    pub user_id: String,
}

pub async fn list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<NotificationQueryParams>
) -> Result<Json<Vec<NotificationResponse>>> {
    let limit = params.limit.unwrap_or(DEFAULT_NOTIFICATION_LIMIT);
    let notifications = state.notification_service.list_for_user(
        &user_id,
        params.unread_only,
        Some(limit)
    ).await?;

    let response: Vec<NotificationResponse> = notifications
        .into_iter()
        .map(|notification| notification.into())
        .collect();

    Ok(Json(response))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
    Query(params): Query<OwnerParams>
) -> Result<Json<NotificationResponse>> {
    let notification = state.notification_service.mark_read(
        notification_id,
        &params.user_id
    ).await?;

    Ok(Json(notification.into()))
}

#[derive(Serialize)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub body: String,
    pub alert_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub is_read: bool,
    pub read_at: Option<String>,
    pub created_at: String,
}

impl From<notification::Model> for NotificationResponse {
    fn from(notification: notification::Model) -> Self {
        Self {
            id: notification.id,
            user_id: notification.user_id,
            kind: notification.kind,
            title: notification.title,
            body: notification.body,
            alert_id: notification.alert_id,
            service_id: notification.service_id,
            is_read: notification.is_read,
            read_at: notification.read_at.map(|t| t.to_rfc3339()),
            created_at: notification.created_at.to_rfc3339(),
        }
    }
}
