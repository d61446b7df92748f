use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculator::{PaymentCalculation, PaymentCalculator};
use crate::dates::months_between;
use crate::decimal::Money;
use crate::payment::LockerPaymentRecord;
use crate::types::{LockerId, MemberId, RentalKind, RentalStatus};

/// a member's current hold on a locker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockerRental {
    pub locker_id: LockerId,
    pub locker_number: String,
    pub member_id: MemberId,
    pub member_name: String,
    pub start_date: NaiveDate,
    /// last day the locker may be used
    pub end_date: NaiveDate,
}

impl LockerRental {
    pub fn from_record(record: &LockerPaymentRecord) -> Self {
        Self {
            locker_id: record.locker_id,
            locker_number: record.locker_number.clone(),
            member_id: record.member_id,
            member_name: record.member_name.clone(),
            start_date: record.start_date,
            end_date: record.end_date,
        }
    }

    /// status on `today`; ends within `expiring_soon_days` count as expiring
    pub fn status(&self, today: NaiveDate, expiring_soon_days: i64) -> RentalStatus {
        if today < self.start_date {
            return RentalStatus::Upcoming {
                days_until_start: (self.start_date - today).num_days(),
            };
        }

        let days_left = (self.end_date - today).num_days();
        if days_left < 0 {
            RentalStatus::Expired {
                days_overdue: -days_left,
            }
        } else if days_left <= expiring_soon_days {
            RentalStatus::ExpiringSoon { days_left }
        } else {
            RentalStatus::Active { days_left }
        }
    }

    /// whole months left, counted from the later of today and the start
    pub fn remaining_months(&self, today: NaiveDate) -> i32 {
        months_between(today.max(self.start_date), self.end_date).max(0)
    }

    /// price an extension; an expired rental restarts on `today` instead
    /// of its old end date
    pub fn extension_quote(
        &self,
        calculator: &PaymentCalculator,
        months: i32,
        monthly_fee: Money,
        today: NaiveDate,
    ) -> PaymentCalculation {
        let kind = RentalKind::Extension {
            current_end: self.end_date,
        }
        .anchored(today);
        calculator.calculate(months, monthly_fee, today, kind)
    }

    /// rental after an extension has been paid
    pub fn extended(&self, calc: &PaymentCalculation) -> Self {
        Self {
            start_date: self.start_date.min(calc.start_date),
            end_date: calc.end_date,
            ..self.clone()
        }
    }
}
