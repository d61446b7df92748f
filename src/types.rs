use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::LockerError;

/// locker row id in the persistence layer
pub type LockerId = i64;

/// member row id in the persistence layer
pub type MemberId = i64;

/// identifier assigned to a stored payment
pub type PaymentId = Uuid;

/// how the member paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Other => "other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = LockerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "transfer" => Ok(PaymentMethod::Transfer),
            "other" => Ok(PaymentMethod::Other),
            _ => Err(LockerError::UnknownPaymentMethod {
                value: s.to_string(),
            }),
        }
    }
}

/// whether a payment opens a new rental or continues an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentalKind {
    /// rental starts on the requested start date
    New,
    /// rental continues from the end of the current period
    Extension { current_end: NaiveDate },
}

impl RentalKind {
    /// build from the loose `(is_extension, current_end_date)` pair;
    /// an extension without a known end date falls back to a new rental
    pub fn from_flag(is_extension: bool, current_end_date: Option<NaiveDate>) -> Self {
        match (is_extension, current_end_date) {
            (true, Some(current_end)) => RentalKind::Extension { current_end },
            _ => RentalKind::New,
        }
    }

    pub fn is_extension(&self) -> bool {
        matches!(self, RentalKind::Extension { .. })
    }

    /// an extension of a rental that ended before `today` restarts as a
    /// new rental, so no paid period lies wholly in the past
    pub fn anchored(self, today: NaiveDate) -> Self {
        match self {
            RentalKind::Extension { current_end } if current_end < today => RentalKind::New,
            kind => kind,
        }
    }
}

/// rental status relative to a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentalStatus {
    /// rental not started yet
    Upcoming { days_until_start: i64 },
    /// rental running with time to spare
    Active { days_left: i64 },
    /// rental ends within the expiring-soon window
    ExpiringSoon { days_left: i64 },
    /// rental end date has passed
    Expired { days_overdue: i64 },
}

impl RentalStatus {
    pub fn is_expired(&self) -> bool {
        matches!(self, RentalStatus::Expired { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!(" Card ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!("TRANSFER".parse::<PaymentMethod>().unwrap(), PaymentMethod::Transfer);
        assert_eq!("other".parse::<PaymentMethod>().unwrap(), PaymentMethod::Other);
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
        assert!("".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_serde() {
        let json = serde_json::to_string(&PaymentMethod::Transfer).unwrap();
        assert_eq!(json, "\"transfer\"");
        let back: PaymentMethod = serde_json::from_str("\"card\"").unwrap();
        assert_eq!(back, PaymentMethod::Card);
    }

    #[test]
    fn test_rental_kind_from_flag() {
        let end = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(
            RentalKind::from_flag(true, Some(end)),
            RentalKind::Extension { current_end: end }
        );
        assert_eq!(RentalKind::from_flag(true, None), RentalKind::New);
        assert_eq!(RentalKind::from_flag(false, Some(end)), RentalKind::New);
        assert!(RentalKind::from_flag(true, Some(end)).is_extension());
    }

    #[test]
    fn test_lapsed_extension_restarts() {
        let end = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let kind = RentalKind::Extension { current_end: end };

        assert_eq!(kind.anchored(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()), kind);
        assert_eq!(kind.anchored(end), kind);
        assert_eq!(kind.anchored(NaiveDate::from_ymd_opt(2025, 3, 16).unwrap()), RentalKind::New);
        assert_eq!(RentalKind::New.anchored(end), RentalKind::New);
    }
}
