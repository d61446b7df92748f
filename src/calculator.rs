use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dates::add_months;
use crate::decimal::{Money, Rate};
use crate::discount::DiscountPolicy;
use crate::types::RentalKind;

/// full pricing breakdown and rental period for one payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCalculation {
    pub original_amount: Money,
    pub discount_rate: Rate,
    pub discount_amount: Money,
    pub final_amount: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PaymentCalculation {
    /// number of months the period covers (day-insensitive)
    pub fn covered_months(&self) -> i32 {
        crate::dates::months_between(self.start_date, self.end_date)
    }

    pub fn has_discount(&self) -> bool {
        !self.discount_amount.is_zero()
    }
}

/// prices locker rentals against a discount policy
#[derive(Debug, Clone, Default)]
pub struct PaymentCalculator {
    policy: DiscountPolicy,
}

impl PaymentCalculator {
    pub fn new(policy: DiscountPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DiscountPolicy {
        &self.policy
    }

    /// price a rental of `months` at `monthly_fee`
    ///
    /// Extensions start exactly where the current period ends; new rentals
    /// start on `start_date`. Months are not range-checked here, that is the
    /// validator's job.
    pub fn calculate(
        &self,
        months: i32,
        monthly_fee: Money,
        start_date: NaiveDate,
        kind: RentalKind,
    ) -> PaymentCalculation {
        let original_amount = monthly_fee.times(months);
        let discount_rate = self.policy.resolve(months);
        let discount_amount = original_amount.percentage_floor(discount_rate);
        let final_amount = original_amount - discount_amount;

        let effective_start = match kind {
            RentalKind::Extension { current_end } => current_end,
            RentalKind::New => start_date,
        };
        let end_date = add_months(effective_start, months);

        debug!(
            months,
            %monthly_fee,
            %original_amount,
            %discount_rate,
            %final_amount,
            %effective_start,
            %end_date,
            extension = kind.is_extension(),
            "locker payment calculated"
        );

        PaymentCalculation {
            original_amount,
            discount_rate,
            discount_amount,
            final_amount,
            start_date: effective_start,
            end_date,
        }
    }
}

/// price a rental with the standard discount tiers
pub fn calculate_full_payment(
    months: i32,
    monthly_fee: Money,
    start_date: NaiveDate,
    is_extension: bool,
    current_end_date: Option<NaiveDate>,
) -> PaymentCalculation {
    PaymentCalculator::default().calculate(
        months,
        monthly_fee,
        start_date,
        RentalKind::from_flag(is_extension, current_end_date),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::DiscountTier;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_three_month_rental() {
        let calc = calculate_full_payment(3, Money::from_major(50_000), date(2025, 1, 15), false, None);

        assert_eq!(calc.original_amount, Money::from_major(150_000));
        assert_eq!(calc.discount_rate, Rate::from_percentage(5));
        assert_eq!(calc.discount_amount, Money::from_major(7_500));
        assert_eq!(calc.final_amount, Money::from_major(142_500));
        assert_eq!(calc.start_date, date(2025, 1, 15));
        assert_eq!(calc.end_date, date(2025, 4, 15));
        assert_eq!(calc.covered_months(), 3);
        assert!(calc.has_discount());
    }

    #[test]
    fn test_extension_anchors_on_current_end() {
        let calc = calculate_full_payment(
            3,
            Money::from_major(50_000),
            date(2025, 1, 15),
            true,
            Some(date(2025, 3, 15)),
        );

        assert_eq!(calc.start_date, date(2025, 3, 15));
        assert_eq!(calc.end_date, date(2025, 6, 15));
        assert_eq!(calc.final_amount, Money::from_major(142_500));
    }

    #[test]
    fn test_extension_without_end_date_uses_start() {
        let calc = calculate_full_payment(1, Money::from_major(30_000), date(2025, 1, 31), true, None);

        assert_eq!(calc.start_date, date(2025, 1, 31));
        assert_eq!(calc.end_date, date(2025, 2, 28));
        assert!(!calc.has_discount());
    }

    #[test]
    fn test_invariants_hold_across_inputs() {
        let calculator = PaymentCalculator::default();
        let start = date(2025, 1, 31);

        for months in 1..=24 {
            for fee in [1, 999, 33_333, 50_000, 123_457] {
                let calc = calculator.calculate(months, Money::from_major(fee), start, RentalKind::New);

                assert_eq!(calc.original_amount, Money::from_major(fee * months as i64));
                assert_eq!(calc.final_amount, calc.original_amount - calc.discount_amount);
                assert_eq!(
                    calc.discount_amount.as_decimal(),
                    (calc.original_amount.as_decimal() * calc.discount_rate.as_percentage()
                        / rust_decimal::Decimal::ONE_HUNDRED)
                        .floor()
                );
                assert_eq!(calc.end_date, add_months(start, months));
            }
        }
    }

    #[test]
    fn test_discount_is_floored() {
        // 6 * 33333 = 199998, 10% = 19999.8
        let calc = calculate_full_payment(6, Money::from_major(33_333), date(2025, 5, 1), false, None);
        assert_eq!(calc.discount_amount, Money::from_major(19_999));
        assert_eq!(calc.final_amount, Money::from_major(179_999));
    }

    #[test]
    fn test_idempotent() {
        let a = calculate_full_payment(12, Money::from_major(40_000), date(2025, 2, 28), false, None);
        let b = calculate_full_payment(12, Money::from_major(40_000), date(2025, 2, 28), false, None);
        assert_eq!(a, b);
        assert_eq!(a.discount_rate, Rate::from_percentage(15));
        assert_eq!(a.end_date, date(2026, 2, 28));
    }

    #[test]
    fn test_custom_policy() {
        let policy = DiscountPolicy::new(vec![DiscountTier::new(2, 50)]).unwrap();
        let calculator = PaymentCalculator::new(policy);

        let calc = calculator.calculate(2, Money::from_major(10_000), date(2025, 1, 1), RentalKind::New);
        assert_eq!(calc.discount_amount, Money::from_major(10_000));
        assert_eq!(calc.final_amount, Money::from_major(10_000));
    }

    #[test]
    fn test_zero_months_is_total() {
        let calc = calculate_full_payment(0, Money::from_major(50_000), date(2025, 1, 15), false, None);
        assert_eq!(calc.original_amount, Money::ZERO);
        assert_eq!(calc.final_amount, Money::ZERO);
        assert_eq!(calc.end_date, date(2025, 1, 15));
    }

    #[test]
    fn test_extreme_inputs_do_not_panic() {
        let calc = calculate_full_payment(i32::MAX, Money::from_major(i64::MAX), date(2025, 1, 15), false, None);

        assert_eq!(calc.discount_rate, Rate::from_percentage(15));
        assert_eq!(calc.final_amount, calc.original_amount - calc.discount_amount);
        assert_eq!(calc.end_date, NaiveDate::MAX);
    }

    #[test]
    fn test_serializes_camel_case() {
        let calc = calculate_full_payment(3, Money::from_major(50_000), date(2025, 1, 15), false, None);
        let value = serde_json::to_value(&calc).unwrap();

        assert_eq!(value["startDate"], "2025-01-15");
        assert_eq!(value["endDate"], "2025-04-15");
        assert!(value.get("finalAmount").is_some());
        assert!(value.get("discountRate").is_some());
    }
}
