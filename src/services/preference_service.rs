use chrono::Utc;
use sea_orm::{
    ColumnTrait,
    ConnectionTrait,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
    Set,
    TransactionTrait,
};
use sea_orm::sea_query::OnConflict;
use uuid::Uuid;

use crate::db::entity::notification_preference;
use crate::enums::NotificationType;
use crate::error::Result;

#[derive(Clone)]
pub struct PreferenceService {
    db: DatabaseConnection,
}

/// One entry in the merged per-user preference view.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceState {
    pub kind: NotificationType,
    pub enabled: bool,
}

impl PreferenceService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stored rows merged with defaults: every notification type appears
    /// exactly once, kinds without a row report enabled.
    pub async fn get_all(&self, user_id: &str) -> Result<Vec<PreferenceState>> {
        let stored = notification_preference::Entity
            ::find()
            .filter(notification_preference::Column::UserId.eq(user_id))
            .all(&self.db).await?;

        Ok(merge_with_defaults(&stored))
    }

    /// Set one preference. A single insert-or-update on the (user_id, kind)
    /// unique index, so repeated calls and races collapse onto one row.
    pub async fn update(
        &self,
        user_id: &str,
        kind: NotificationType,
        enabled: bool
    ) -> Result<PreferenceState> {
        self.upsert_on(&self.db, user_id, kind, enabled).await?;

        Ok(PreferenceState { kind, enabled })
    }

    /// Apply an already-validated set of changes inside one transaction.
    /// The caller validates every kind first, so either all rows change or
    /// none do.
    pub async fn bulk_update(
        &self,
        user_id: &str,
        updates: &[(NotificationType, bool)]
    ) -> Result<Vec<PreferenceState>> {
        let txn = self.db.begin().await?;

        for (kind, enabled) in updates {
            self.upsert_on(&txn, user_id, *kind, *enabled).await?;
        }

        txn.commit().await?;

        self.get_all(user_id).await
    }

    /// The notifier's gate. An absent row means the kind is enabled.
    pub async fn is_enabled(&self, user_id: &str, kind: NotificationType) -> Result<bool> {
        let row = notification_preference::Entity
            ::find()
            .filter(notification_preference::Column::UserId.eq(user_id))
            .filter(notification_preference::Column::Kind.eq(kind.as_str()))
            .one(&self.db).await?;

        Ok(row.map(|r| r.enabled).unwrap_or(true))
    }

    async fn upsert_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: &str,
        kind: NotificationType,
        enabled: bool
    ) -> Result<()> {
        let now = Utc::now();

        let row = notification_preference::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.to_string()),
            kind: Set(kind.to_string()),
            enabled: Set(enabled),
            created_at: Set(now),
            updated_at: Set(now),
        };

        notification_preference::Entity
            ::insert(row)
            .on_conflict(
                OnConflict::columns([
                    notification_preference::Column::UserId,
                    notification_preference::Column::Kind,
                ])
                    .update_columns([
                        notification_preference::Column::Enabled,
                        notification_preference::Column::UpdatedAt,
                    ])
                    .to_owned()
            )
            .exec(conn).await?;

        Ok(())
    }
}

/// Pure merge of stored preference rows with the default-on kinds.
pub fn merge_with_defaults(stored: &[notification_preference::Model]) -> Vec<PreferenceState> {
    NotificationType::all()
        .iter()
        .map(|kind| {
            let enabled = stored
                .iter()
                .find(|row| row.kind == kind.as_str())
                .map(|row| row.enabled)
                .unwrap_or(true);

            PreferenceState { kind: *kind, enabled }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(kind: &str, enabled: bool) -> notification_preference::Model {
        notification_preference::Model {
            id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            kind: kind.to_string(),
            enabled,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn absent_rows_default_to_enabled() {
        let merged = merge_with_defaults(&[]);

        assert_eq!(merged.len(), NotificationType::all().len());
        assert!(merged.iter().all(|p| p.enabled));
    }

    #[test]
    fn stored_rows_win_over_defaults() {
        let merged = merge_with_defaults(&[stored("promotion", false)]);

        for pref in &merged {
            let expected = pref.kind != NotificationType::Promotion;
            assert_eq!(pref.enabled, expected, "kind {}", pref.kind);
        }
    }

    #[test]
    fn every_kind_appears_exactly_once() {
        let merged = merge_with_defaults(&[
            stored("price_alert", false),
            stored("review_reply", true),
        ]);

        let kinds: Vec<NotificationType> = merged.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, NotificationType::all().to_vec());
    }

    #[test]
    fn unknown_stored_kinds_are_ignored() {
        let merged = merge_with_defaults(&[stored("postcard", false)]);

        assert_eq!(merged.len(), NotificationType::all().len());
        assert!(merged.iter().all(|p| p.enabled));
    }
}
