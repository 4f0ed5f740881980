use std::collections::HashMap;

use crate::enums::NotificationType;
use crate::error::{AppError, FieldError, Result};

pub const MIN_TARGET_PRICE: i64 = 1_000;
pub const MAX_TARGET_PRICE: i64 = 1_000_000;
pub const MIN_PERCENTAGE_OFF: i32 = 1;
pub const MAX_PERCENTAGE_OFF: i32 = 100;

/// Collects field-level failures so a request reports every problem at once
/// instead of failing on the first.
#[derive(Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Validator::default()
    }

    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
    }

    pub fn finish(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

/// Validates a full alert state. Used for creation and for the resulting
/// state of a partial update, so an update can never leave an alert invalid.
pub fn validate_alert_rules(
    target_price: Option<i64>,
    percentage_off: Option<i32>,
    notify_email: bool,
    notify_in_app: bool,
) -> Result<()> {
    let mut v = Validator::new();

    v.check(
        target_price.is_some() || percentage_off.is_some(),
        "target_price",
        "At least one of target_price or percentage_off is required",
    );

    if let Some(target) = target_price {
        v.check(
            (MIN_TARGET_PRICE..=MAX_TARGET_PRICE).contains(&target),
            "target_price",
            "target_price must be between 1000 and 1000000",
        );
    }

    if let Some(percent) = percentage_off {
        v.check(
            (MIN_PERCENTAGE_OFF..=MAX_PERCENTAGE_OFF).contains(&percent),
            "percentage_off",
            "percentage_off must be between 1 and 100",
        );
    }

    v.check(
        notify_email || notify_in_app,
        "notify_email",
        "At least one notification channel must be enabled",
    );

    v.finish()
}

/// Validates an incoming list price before it is recorded.
pub fn validate_new_price(price: i64) -> Result<()> {
    let mut v = Validator::new();
    v.check(price >= 1, "price", "price must be at least 1");
    v.finish()
}

/// Parses a bulk preference-update map. Every kind is validated before any
/// row is written; one unknown kind rejects the whole map.
pub fn parse_preference_updates(
    updates: &HashMap<String, bool>,
) -> Result<Vec<(NotificationType, bool)>> {
    let mut v = Validator::new();
    let mut parsed = Vec::with_capacity(updates.len());

    for (kind, enabled) in updates {
        match kind.parse::<NotificationType>() {
            Ok(parsed_kind) => parsed.push((parsed_kind, *enabled)),
            Err(_) => v.check(false, kind, "Unknown notification type"),
        }
    }

    v.finish()?;

    // HashMap iteration order is arbitrary; upserts apply in a stable order
    parsed.sort_by_key(|(kind, _)| kind.as_str());
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_fields(result: Result<()>) -> Vec<String> {
        match result {
            Err(AppError::Validation(errors)) => {
                errors.into_iter().map(|e| e.field).collect()
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_target_only_alert() {
        assert!(validate_alert_rules(Some(5000), None, true, true).is_ok());
    }

    #[test]
    fn accepts_percentage_only_alert() {
        assert!(validate_alert_rules(None, Some(10), false, true).is_ok());
    }

    #[test]
    fn accepts_both_conditions() {
        assert!(validate_alert_rules(Some(5000), Some(10), true, false).is_ok());
    }

    #[test]
    fn rejects_alert_with_no_condition() {
        let fields = validation_fields(validate_alert_rules(None, None, true, true));
        assert_eq!(fields, vec!["target_price"]);
    }

    #[test]
    fn rejects_target_price_out_of_bounds() {
        assert!(validate_alert_rules(Some(999), None, true, true).is_err());
        assert!(validate_alert_rules(Some(1_000_001), None, true, true).is_err());
        assert!(validate_alert_rules(Some(1_000), None, true, true).is_ok());
        assert!(validate_alert_rules(Some(1_000_000), None, true, true).is_ok());
    }

    #[test]
    fn rejects_percentage_out_of_bounds() {
        assert!(validate_alert_rules(None, Some(0), true, true).is_err());
        assert!(validate_alert_rules(None, Some(101), true, true).is_err());
        assert!(validate_alert_rules(None, Some(1), true, true).is_ok());
        assert!(validate_alert_rules(None, Some(100), true, true).is_ok());
    }

    #[test]
    fn rejects_alert_with_all_channels_off() {
        let fields = validation_fields(validate_alert_rules(Some(5000), None, false, false));
        assert_eq!(fields, vec!["notify_email"]);
    }

    #[test]
    fn collects_every_failure() {
        let fields = validation_fields(validate_alert_rules(None, None, false, false));
        assert_eq!(fields, vec!["target_price", "notify_email"]);
    }

    #[test]
    fn rejects_non_positive_price() {
        assert!(validate_new_price(0).is_err());
        assert!(validate_new_price(-500).is_err());
        assert!(validate_new_price(1).is_ok());
    }

    #[test]
    fn parses_preference_updates_in_stable_order() {
        let mut updates = HashMap::new();
        updates.insert("promotion".to_string(), false);
        updates.insert("booking_update".to_string(), true);
        updates.insert("price_alert".to_string(), false);

        let parsed = parse_preference_updates(&updates).unwrap();
        assert_eq!(
            parsed,
            vec![
                (NotificationType::BookingUpdate, true),
                (NotificationType::PriceAlert, false),
                (NotificationType::Promotion, false),
            ]
        );
    }

    #[test]
    fn one_unknown_kind_rejects_the_whole_map() {
        let mut updates = HashMap::new();
        updates.insert("price_alert".to_string(), false);
        updates.insert("smoke_signal".to_string(), true);

        let fields = validation_fields(parse_preference_updates(&updates).map(|_| ()));
        assert_eq!(fields, vec!["smoke_signal"]);
    }

    #[test]
    fn empty_update_map_is_a_no_op() {
        let parsed = parse_preference_updates(&HashMap::new()).unwrap();
        assert!(parsed.is_empty());
    }
}
