pub mod builder;
pub mod desk;
pub mod store;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculator::PaymentCalculation;
use crate::decimal::{Money, Rate};
use crate::errors::{LockerError, Result};
use crate::types::{LockerId, MemberId, PaymentId, PaymentMethod};

pub use builder::LockerPaymentBuilder;
pub use desk::PaymentDesk;
pub use store::InMemoryPaymentStore;

/// payment row handed to the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockerPaymentRecord {
    pub locker_id: LockerId,
    pub member_id: MemberId,
    pub member_name: String,
    pub locker_number: String,
    pub months: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// final amount charged, after discount
    pub amount: Money,
    pub original_amount: Money,
    pub discount_rate: Rate,
    pub discount_amount: Money,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LockerPaymentRecord {
    /// pricing fields as a calculation value
    pub fn calculation(&self) -> PaymentCalculation {
        PaymentCalculation {
            original_amount: self.original_amount,
            discount_rate: self.discount_rate,
            discount_amount: self.discount_amount,
            final_amount: self.amount,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    /// true if the two rental periods share at least one day
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date < end && start < self.end_date
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// persistence layer reply to a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<PaymentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionReceipt {
    pub fn accepted(payment_id: PaymentId) -> Self {
        Self {
            success: true,
            payment_id: Some(payment_id),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            payment_id: None,
            error: Some(error.into()),
        }
    }

    pub fn into_result(self) -> Result<PaymentId> {
        match (self.success, self.payment_id) {
            (true, Some(id)) => Ok(id),
            (true, None) => Err(LockerError::Storage {
                message: "store reported success without a payment id".to_string(),
            }),
            (false, _) => Err(LockerError::Storage {
                message: self.error.unwrap_or_else(|| "unknown storage failure".to_string()),
            }),
        }
    }
}

/// persistence collaborator for locker payments
pub trait PaymentStore {
    /// store the payment and extend the locker's rental
    fn submit_locker_payment(&mut self, record: &LockerPaymentRecord) -> SubmissionReceipt;

    /// end date of the latest stored rental for the locker
    fn current_end_date(&self, locker_id: LockerId) -> Option<NaiveDate>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record() -> LockerPaymentRecord {
        LockerPaymentRecord {
            locker_id: 7,
            member_id: 42,
            member_name: "Kim".to_string(),
            locker_number: "A-07".to_string(),
            months: 3,
            start_date: date(2025, 1, 15),
            end_date: date(2025, 4, 15),
            amount: Money::from_major(142_500),
            original_amount: Money::from_major(150_000),
            discount_rate: Rate::from_percentage(5),
            discount_amount: Money::from_major(7_500),
            payment_method: PaymentMethod::Cash,
            notes: None,
        }
    }

    #[test]
    fn test_record_json_shape() {
        let value = serde_json::to_value(record()).unwrap();

        assert_eq!(value["lockerId"], 7);
        assert_eq!(value["memberName"], "Kim");
        assert_eq!(value["lockerNumber"], "A-07");
        assert_eq!(value["startDate"], "2025-01-15");
        assert_eq!(value["endDate"], "2025-04-15");
        assert_eq!(value["paymentMethod"], "cash");
        assert!(value.get("notes").is_none());
        assert!(value.get("discountAmount").is_some());
    }

    #[test]
    fn test_overlap() {
        let r = record();
        assert!(r.overlaps(date(2025, 4, 14), date(2025, 5, 14)));
        assert!(r.overlaps(date(2024, 12, 1), date(2025, 1, 16)));
        // back-to-back periods do not overlap
        assert!(!r.overlaps(date(2025, 4, 15), date(2025, 7, 15)));
        assert!(!r.overlaps(date(2024, 12, 15), date(2025, 1, 15)));
    }

    #[test]
    fn test_calculation_view() {
        let calc = record().calculation();
        assert_eq!(calc.final_amount, Money::from_major(142_500));
        assert_eq!(calc.covered_months(), 3);
    }

    #[test]
    fn test_receipt_into_result() {
        let id = Uuid::new_v4();
        assert_eq!(SubmissionReceipt::accepted(id).into_result().unwrap(), id);

        let err = SubmissionReceipt::failed("disk full").into_result().unwrap_err();
        assert!(matches!(err, LockerError::Storage { ref message } if message == "disk full"));

        let odd = SubmissionReceipt {
            success: true,
            payment_id: None,
            error: None,
        };
        assert!(odd.into_result().is_err());
    }
}
