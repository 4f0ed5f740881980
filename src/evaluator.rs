use chrono::{ DateTime, Duration, Utc };
use uuid::Uuid;

use crate::db::entity::price_alert;

/// A single price move on a wash service.
#[derive(Debug, Clone, Copy)]
pub struct PriceChangeEvent {
    pub service_id: Uuid,
    pub old_price: i64,
    pub new_price: i64,
    pub recorded_at: DateTime<Utc>,
}

/// Which configured condition matched.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchedCondition {
    TargetPrice {
        target_price: i64,
    },
    PercentageOff {
        required_percent: i32,
        actual_percent: f64,
    },
}

/// One alert that should be notified for an event.
#[derive(Debug, Clone)]
pub struct AlertMatch {
    pub alert_id: Uuid,
    pub user_id: String,
    pub service_id: Uuid,
    pub notify_email: bool,
    pub notify_in_app: bool,
    pub condition: MatchedCondition,
}

/// Decides which of a service's alerts fire for a price-change event.
///
/// The caller passes the alerts already scoped to the event's service.
/// Matches come back ordered by alert creation time, oldest first.
pub fn evaluate_alerts(
    alerts: &[price_alert::Model],
    event: &PriceChangeEvent,
    cooldown: Duration
) -> Vec<AlertMatch> {
    let mut ordered: Vec<&price_alert::Model> = alerts.iter().collect();
    ordered.sort_by_key(|alert| alert.created_at);

    ordered
        .into_iter()
        .filter(|alert| alert.is_active)
        .filter(|alert| !within_cooldown(alert.last_notified_at, event.recorded_at, cooldown))
        .filter_map(|alert| {
            matched_condition(alert, event).map(|condition| AlertMatch {
                alert_id: alert.id,
                user_id: alert.user_id.clone(),
                service_id: alert.service_id,
                notify_email: alert.notify_email,
                notify_in_app: alert.notify_in_app,
                condition,
            })
        })
        .collect()
}

fn within_cooldown(
    last_notified_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    cooldown: Duration
) -> bool {
    match last_notified_at {
        Some(last) if cooldown > Duration::zero() => now - last < cooldown,
        _ => false,
    }
}

/// When both conditions are configured, either one fires the alert; the
/// target condition is checked first and wins the reported match.
fn matched_condition(
    alert: &price_alert::Model,
    event: &PriceChangeEvent
) -> Option<MatchedCondition> {
    if let Some(target) = alert.target_price {
        if target_rule_fires(alert, event, target) {
            return Some(MatchedCondition::TargetPrice { target_price: target });
        }
    }

    if let Some(percent) = alert.percentage_off {
        if percentage_rule_fires(event, percent) {
            return Some(MatchedCondition::PercentageOff {
                required_percent: percent,
                actual_percent: actual_drop_percent(event),
            });
        }
    }

    None
}

/// Edge-triggered: fires when the price crosses down through the target,
/// not while it merely stays below. An alert that has never notified gets
/// one shot even without a fresh crossing.
fn target_rule_fires(
    alert: &price_alert::Model,
    event: &PriceChangeEvent,
    target: i64
) -> bool {
    event.new_price <= target && (event.old_price > target || alert.last_notified_at.is_none())
}

/// Fires when the drop from the old price reaches the configured percent.
/// Compared in cross-multiplied integer form so the boundary is exact.
fn percentage_rule_fires(event: &PriceChangeEvent, percent: i32) -> bool {
    if event.old_price <= 0 || event.new_price >= event.old_price {
        return false;
    }

    ((event.old_price - event.new_price) as i128) * 100 >=
        (percent as i128) * (event.old_price as i128)
}

fn actual_drop_percent(event: &PriceChangeEvent) -> f64 {
    if event.old_price <= 0 {
        return 0.0;
    }

    (((event.old_price - event.new_price) as f64) / (event.old_price as f64)) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(target_price: Option<i64>, percentage_off: Option<i32>) -> price_alert::Model {
        price_alert::Model {
            id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            service_id: Uuid::new_v4(),
            target_price,
            percentage_off,
            is_active: true,
            notify_email: true,
            notify_in_app: true,
            last_notified_at: None,
            triggered_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn event(old_price: i64, new_price: i64) -> PriceChangeEvent {
        PriceChangeEvent {
            service_id: Uuid::new_v4(),
            old_price,
            new_price,
            recorded_at: Utc::now(),
        }
    }

    fn no_cooldown() -> Duration {
        Duration::zero()
    }

    #[test]
    fn target_fires_on_downward_crossing() {
        let alerts = vec![alert(Some(8000), None)];
        let matches = evaluate_alerts(&alerts, &event(10_000, 7500), no_cooldown());

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].condition, MatchedCondition::TargetPrice { target_price: 8000 });
    }

    #[test]
    fn target_fires_on_exact_boundary() {
        let alerts = vec![alert(Some(8000), None)];
        let matches = evaluate_alerts(&alerts, &event(10_000, 8000), no_cooldown());

        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn target_does_not_refire_below_target_after_notifying() {
        let mut a = alert(Some(8000), None);
        a.last_notified_at = Some(Utc::now() - Duration::days(1));

        let matches = evaluate_alerts(&[a], &event(7500, 7000), no_cooldown());
        assert!(matches.is_empty());
    }

    #[test]
    fn target_fires_below_target_when_never_notified() {
        let alerts = vec![alert(Some(8000), None)];
        let matches = evaluate_alerts(&alerts, &event(7500, 7000), no_cooldown());

        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn target_ignores_price_above_target() {
        let alerts = vec![alert(Some(8000), None)];
        let matches = evaluate_alerts(&alerts, &event(10_000, 9000), no_cooldown());

        assert!(matches.is_empty());
    }

    #[test]
    fn percentage_fires_on_exact_boundary() {
        let alerts = vec![alert(None, Some(10))];
        let matches = evaluate_alerts(&alerts, &event(10_000, 9000), no_cooldown());

        assert_eq!(matches.len(), 1);
        match &matches[0].condition {
            MatchedCondition::PercentageOff { required_percent, actual_percent } => {
                assert_eq!(*required_percent, 10);
                assert!((actual_percent - 10.0).abs() < 1e-9);
            }
            other => panic!("expected percentage match, got {:?}", other),
        }
    }

    #[test]
    fn percentage_does_not_fire_just_under_boundary() {
        let alerts = vec![alert(None, Some(10))];
        let matches = evaluate_alerts(&alerts, &event(10_000, 9001), no_cooldown());

        assert!(matches.is_empty());
    }

    #[test]
    fn percentage_ignores_increases() {
        let alerts = vec![alert(None, Some(10))];
        let matches = evaluate_alerts(&alerts, &event(10_000, 12_000), no_cooldown());

        assert!(matches.is_empty());
    }

    #[test]
    fn either_condition_fires_when_both_configured() {
        // 25% drop but still above the target: only the percentage rule matches
        let alerts = vec![alert(Some(5000), Some(20))];
        let matches = evaluate_alerts(&alerts, &event(10_000, 7500), no_cooldown());

        assert_eq!(matches.len(), 1);
        assert!(matches!(
            matches[0].condition,
            MatchedCondition::PercentageOff { required_percent: 20, .. }
        ));
    }

    #[test]
    fn target_condition_wins_the_report_when_both_match() {
        let alerts = vec![alert(Some(8000), Some(10))];
        let matches = evaluate_alerts(&alerts, &event(10_000, 7500), no_cooldown());

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].condition, MatchedCondition::TargetPrice { target_price: 8000 });
    }

    #[test]
    fn inactive_alerts_are_skipped() {
        let mut a = alert(Some(8000), None);
        a.is_active = false;

        let matches = evaluate_alerts(&[a], &event(10_000, 7500), no_cooldown());
        assert!(matches.is_empty());
    }

    #[test]
    fn recently_notified_alerts_wait_out_the_cooldown() {
        let mut a = alert(None, Some(10));
        a.last_notified_at = Some(Utc::now() - Duration::minutes(10));

        let matches = evaluate_alerts(&[a], &event(10_000, 8000), Duration::hours(1));
        assert!(matches.is_empty());
    }

    #[test]
    fn cooldown_expiry_allows_notifying_again() {
        let mut a = alert(None, Some(10));
        a.last_notified_at = Some(Utc::now() - Duration::hours(2));

        let matches = evaluate_alerts(&[a], &event(10_000, 8000), Duration::hours(1));
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn zero_cooldown_disables_the_window() {
        let mut a = alert(None, Some(10));
        a.last_notified_at = Some(Utc::now());

        let matches = evaluate_alerts(&[a], &event(10_000, 8000), Duration::zero());
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn matches_come_back_in_creation_order() {
        let now = Utc::now();

        let mut third = alert(Some(8000), None);
        third.created_at = now;
        let mut first = alert(Some(8000), None);
        first.created_at = now - Duration::hours(2);
        let mut second = alert(Some(8000), None);
        second.created_at = now - Duration::hours(1);

        let expected = vec![first.id, second.id, third.id];
        let alerts = vec![third, first, second];

        let matches = evaluate_alerts(&alerts, &event(10_000, 7500), no_cooldown());
        let got: Vec<Uuid> = matches.iter().map(|m| m.alert_id).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn reports_the_actual_drop_percent() {
        let alerts = vec![alert(None, Some(10))];
        let matches = evaluate_alerts(&alerts, &event(10_000, 7500), no_cooldown());

        match &matches[0].condition {
            MatchedCondition::PercentageOff { actual_percent, .. } => {
                assert!((actual_percent - 25.0).abs() < 1e-9);
            }
            other => panic!("expected percentage match, got {:?}", other),
        }
    }
}
