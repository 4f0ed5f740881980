use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// ─── NotificationType ────────────────────────────────────────────────

/// Notification categories the marketplace sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    PriceAlert,
    BookingUpdate,
    Promotion,
    ReviewReply,
}

impl NotificationType {
    /// Canonical string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::PriceAlert => "price_alert",
            NotificationType::BookingUpdate => "booking_update",
            NotificationType::Promotion => "promotion",
            NotificationType::ReviewReply => "review_reply",
        }
    }

    pub fn all() -> &'static [NotificationType] {
        &[
            NotificationType::PriceAlert,
            NotificationType::BookingUpdate,
            NotificationType::Promotion,
            NotificationType::ReviewReply,
        ]
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price_alert" => Ok(NotificationType::PriceAlert),
            "booking_update" => Ok(NotificationType::BookingUpdate),
            "promotion" => Ok(NotificationType::Promotion),
            "review_reply" => Ok(NotificationType::ReviewReply),
            _ => Err(AppError::InvalidInput(format!(
                "Invalid notification type: {}. Supported: price_alert, booking_update, promotion, review_reply",
                s
            ))),
        }
    }
}

// ─── PriceChangeType ─────────────────────────────────────────────────

/// Direction of a recorded price move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceChangeType {
    Increase,
    Decrease,
    NoChange,
}

impl PriceChangeType {
    /// Classify a price move. A missing old price means this is the first
    /// recorded entry for the service.
    pub fn of(old_price: Option<i64>, new_price: i64) -> PriceChangeType {
        match old_price {
            Some(old) if new_price > old => PriceChangeType::Increase,
            Some(old) if new_price < old => PriceChangeType::Decrease,
            _ => PriceChangeType::NoChange,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceChangeType::Increase => "increase",
            PriceChangeType::Decrease => "decrease",
            PriceChangeType::NoChange => "no_change",
        }
    }
}

impl fmt::Display for PriceChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceChangeType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "increase" => Ok(PriceChangeType::Increase),
            "decrease" => Ok(PriceChangeType::Decrease),
            "no_change" => Ok(PriceChangeType::NoChange),
            _ => Err(AppError::InvalidInput(format!(
                "Invalid price change type: {}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_type_round_trips() {
        for kind in NotificationType::all() {
            assert_eq!(NotificationType::from_str(kind.as_str()).unwrap(), *kind);
        }
    }

    #[test]
    fn notification_type_rejects_unknown() {
        assert!(NotificationType::from_str("carrier_pigeon").is_err());
    }

    #[test]
    fn price_change_type_round_trips() {
        for kind in [
            PriceChangeType::Increase,
            PriceChangeType::Decrease,
            PriceChangeType::NoChange,
        ] {
            assert_eq!(PriceChangeType::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn classifies_price_moves() {
        assert_eq!(PriceChangeType::of(Some(5000), 6000), PriceChangeType::Increase);
        assert_eq!(PriceChangeType::of(Some(5000), 4000), PriceChangeType::Decrease);
        assert_eq!(PriceChangeType::of(Some(5000), 5000), PriceChangeType::NoChange);
    }

    #[test]
    fn first_entry_is_no_change() {
        assert_eq!(PriceChangeType::of(None, 5000), PriceChangeType::NoChange);
    }
}
