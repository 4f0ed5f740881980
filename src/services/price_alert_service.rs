use chrono::{ DateTime, Utc };
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    Condition,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
    QueryOrder,
    QuerySelect,
    Set,
};
use sea_orm::sea_query::{ Expr, ExprTrait };
use uuid::Uuid;

use crate::db::entity::{ price_alert, wash_service };
use crate::error::{ AppError, Result };
use crate::validate::validate_alert_rules;

#[derive(Clone)]
pub struct PriceAlertService {
    db: DatabaseConnection,
}

/// Input for a new alert, already decoded from the API layer.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub user_id: String,
    pub service_id: Uuid,
    pub target_price: Option<i64>,
    pub percentage_off: Option<i32>,
    pub notify_email: bool,
    pub notify_in_app: bool,
}

/// Fields a partial update can change; None leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct AlertUpdate {
    pub target_price: Option<i64>,
    pub percentage_off: Option<i32>,
    pub notify_email: Option<bool>,
    pub notify_in_app: Option<bool>,
    pub is_active: Option<bool>,
}

impl PriceAlertService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new price alert
    pub async fn create_alert(&self, req: NewAlert) -> Result<price_alert::Model> {
        validate_alert_rules(
            req.target_price,
            req.percentage_off,
            req.notify_email,
            req.notify_in_app
        )?;

        // The watched service must exist
        wash_service::Entity
            ::find_by_id(req.service_id)
            .one(&self.db).await?
            .ok_or(AppError::ServiceNotFound)?;

        let now = Utc::now();

        let alert = price_alert::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(req.user_id),
            service_id: Set(req.service_id),
            target_price: Set(req.target_price),
            percentage_off: Set(req.percentage_off),
            is_active: Set(true),
            notify_email: Set(req.notify_email),
            notify_in_app: Set(req.notify_in_app),
            last_notified_at: Set(None),
            triggered_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let alert = alert.insert(&self.db).await?;
        Ok(alert)
    }

    /// List all alerts for a user
    pub async fn list_user_alerts(
        &self,
        user_id: &str,
        active_only: bool
    ) -> Result<Vec<price_alert::Model>> {
        let mut query = price_alert::Entity
            ::find()
            .filter(price_alert::Column::UserId.eq(user_id))
            .order_by_desc(price_alert::Column::CreatedAt);

        if active_only {
            query = query.filter(price_alert::Column::IsActive.eq(true));
        }

        let alerts = query.all(&self.db).await?;
        Ok(alerts)
    }

    /// Get a specific alert by ID
    pub async fn get_alert(&self, id: Uuid, user_id: &str) -> Result<price_alert::Model> {
        price_alert::Entity
            ::find_by_id(id)
            .filter(price_alert::Column::UserId.eq(user_id))
            .one(&self.db).await?
            .ok_or(AppError::AlertNotFound)
    }

    /// Partially update an alert. The resulting state is re-validated, so
    /// an update can never leave an alert without a condition or a channel.
    pub async fn update_alert(
        &self,
        id: Uuid,
        user_id: &str,
        update: AlertUpdate
    ) -> Result<price_alert::Model> {
        let alert = self.get_alert(id, user_id).await?;

        let target_price = update.target_price.or(alert.target_price);
        let percentage_off = update.percentage_off.or(alert.percentage_off);
        let notify_email = update.notify_email.unwrap_or(alert.notify_email);
        let notify_in_app = update.notify_in_app.unwrap_or(alert.notify_in_app);

        validate_alert_rules(target_price, percentage_off, notify_email, notify_in_app)?;

        let mut active: price_alert::ActiveModel = alert.into();
        if let Some(target) = update.target_price {
            active.target_price = Set(Some(target));
        }
        if let Some(percent) = update.percentage_off {
            active.percentage_off = Set(Some(percent));
        }
        if let Some(flag) = update.notify_email {
            active.notify_email = Set(flag);
        }
        if let Some(flag) = update.notify_in_app {
            active.notify_in_app = Set(flag);
        }
        if let Some(flag) = update.is_active {
            active.is_active = Set(flag);
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    /// Delete an alert
    pub async fn delete_alert(&self, id: Uuid, user_id: &str) -> Result<()> {
        let result = price_alert::Entity
            ::delete_many()
            .filter(price_alert::Column::Id.eq(id))
            .filter(price_alert::Column::UserId.eq(user_id))
            .exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::AlertNotFound);
        }

        Ok(())
    }

    /// Active alerts watching a service, oldest first (evaluation order).
    pub async fn active_alerts_for_service(
        &self,
        service_id: Uuid
    ) -> Result<Vec<price_alert::Model>> {
        let alerts = price_alert::Entity
            ::find()
            .filter(price_alert::Column::ServiceId.eq(service_id))
            .filter(price_alert::Column::IsActive.eq(true))
            .order_by_asc(price_alert::Column::CreatedAt)
            .all(&self.db).await?;

        Ok(alerts)
    }

    /// Distinct services that currently have at least one active alert.
    pub async fn active_service_ids(&self) -> Result<Vec<Uuid>> {
        let ids: Vec<Uuid> = price_alert::Entity
            ::find()
            .select_only()
            .column(price_alert::Column::ServiceId)
            .filter(price_alert::Column::IsActive.eq(true))
            .distinct()
            .into_tuple()
            .all(&self.db).await?;

        Ok(ids)
    }

    /// Claim an alert for one price-change event. A single conditional
    /// UPDATE touching only the notification-state columns: whichever
    /// evaluation pass gets here first wins, every later pass sees zero
    /// rows affected and skips delivery.
    pub async fn mark_notified(
        &self,
        alert_id: Uuid,
        event_recorded_at: DateTime<Utc>
    ) -> Result<bool> {
        let result = price_alert::Entity
            ::update_many()
            .col_expr(price_alert::Column::LastNotifiedAt, Expr::value(event_recorded_at))
            .col_expr(
                price_alert::Column::TriggeredCount,
                Expr::col(price_alert::Column::TriggeredCount).add(1)
            )
            .col_expr(price_alert::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(price_alert::Column::Id.eq(alert_id))
            .filter(
                Condition::any()
                    .add(price_alert::Column::LastNotifiedAt.is_null())
                    .add(price_alert::Column::LastNotifiedAt.lt(event_recorded_at))
            )
            .exec(&self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
