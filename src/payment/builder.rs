use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;

use crate::calculator::PaymentCalculation;
use crate::config::PricingConfig;
use crate::decimal::Money;
use crate::errors::{LockerError, Result};
use crate::payment::LockerPaymentRecord;
use crate::types::{LockerId, MemberId, PaymentMethod, RentalKind};
use crate::validation::PaymentDraft;

/// builder for locker payment records
///
/// Prices the rental, validates the assembled draft (the amount checked is
/// the discounted final amount) and only then yields a record.
#[derive(Debug, Clone, Default)]
pub struct LockerPaymentBuilder {
    pub(crate) locker_id: Option<LockerId>,
    locker_number: Option<String>,
    pub(crate) member_id: Option<MemberId>,
    member_name: Option<String>,
    months: Option<i32>,
    monthly_fee: Option<Money>,
    start_date: Option<NaiveDate>,
    pub(crate) kind: Option<RentalKind>,
    payment_method: Option<PaymentMethod>,
    notes: Option<String>,
    pricing: Option<PricingConfig>,
}

impl LockerPaymentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locker(mut self, locker_id: LockerId, locker_number: impl Into<String>) -> Self {
        self.locker_id = Some(locker_id);
        self.locker_number = Some(locker_number.into());
        self
    }

    pub fn member(mut self, member_id: MemberId, member_name: impl Into<String>) -> Self {
        self.member_id = Some(member_id);
        self.member_name = Some(member_name.into());
        self
    }

    pub fn months(mut self, months: i32) -> Self {
        self.months = Some(months);
        self
    }

    /// overrides the fee from the pricing config
    pub fn monthly_fee(mut self, fee: Money) -> Self {
        self.monthly_fee = Some(fee);
        self
    }

    /// requested start; defaults to the validation day
    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// continue a rental that currently ends on `current_end`; if that day
    /// is already past when the payment is built, the rental restarts on the
    /// requested start date instead
    pub fn extension_of(mut self, current_end: NaiveDate) -> Self {
        self.kind = Some(RentalKind::Extension { current_end });
        self
    }

    pub fn payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() { None } else { Some(notes) };
        self
    }

    pub fn pricing(mut self, config: PricingConfig) -> Self {
        self.pricing = Some(config);
        self
    }

    pub(crate) fn has_pricing(&self) -> bool {
        self.pricing.is_some()
    }

    pub(crate) fn rental_kind(&self, today: NaiveDate) -> RentalKind {
        self.kind.unwrap_or(RentalKind::New).anchored(today)
    }

    /// price the rental without validating; `None` until months and a fee are set
    pub fn quote(&self, today: NaiveDate) -> Option<PaymentCalculation> {
        let months = self.months?;
        let fee = self.resolve_fee()?;
        let start = self.start_date.unwrap_or(today);
        let calculator = self.pricing.as_ref().map(|p| p.calculator()).unwrap_or_default();
        Some(calculator.calculate(months, fee, start, self.rental_kind(today)))
    }

    /// build against an explicit "today"
    pub fn build(self, today: NaiveDate) -> Result<LockerPaymentRecord> {
        let locker_id = self.locker_id.ok_or(LockerError::MissingField { field: "locker_id" })?;
        let member_id = self.member_id.ok_or(LockerError::MissingField { field: "member_id" })?;
        let fee = self
            .resolve_fee()
            .ok_or(LockerError::MissingField { field: "monthly_fee" })?;
        if fee.is_negative() {
            return Err(LockerError::InvalidMonthlyFee { fee });
        }

        let calc = self.quote(today);
        let draft = PaymentDraft {
            months: self.months,
            payment_method: self.payment_method,
            start_date: Some(self.start_date.unwrap_or(today)),
            amount: calc.as_ref().map(|c| c.final_amount),
        };

        let validator = self.pricing.as_ref().map(|p| p.validator()).unwrap_or_default();
        let result = validator.validate(&draft, today);
        if !result.is_valid {
            return Err(LockerError::Validation(result));
        }

        // validation guarantees months, method and amount are present
        let (Some(calc), Some(months), Some(payment_method)) = (calc, self.months, self.payment_method)
        else {
            return Err(LockerError::MissingField { field: "months" });
        };

        Ok(LockerPaymentRecord {
            locker_id,
            member_id,
            member_name: self.member_name.unwrap_or_default(),
            locker_number: self.locker_number.unwrap_or_default(),
            months,
            start_date: calc.start_date,
            end_date: calc.end_date,
            amount: calc.final_amount,
            original_amount: calc.original_amount,
            discount_rate: calc.discount_rate,
            discount_amount: calc.discount_amount,
            payment_method,
            notes: self.notes,
        })
    }

    /// build using the provider's current day
    ///
    /// The day is the UTC calendar date of `time.now()`. A desk running in
    /// another time zone should compute its local date and call
    /// [`build`](Self::build) instead.
    pub fn build_with_time(self, time: &SafeTimeProvider) -> Result<LockerPaymentRecord> {
        let today = time.now().date_naive();
        self.build(today)
    }

    fn resolve_fee(&self) -> Option<Money> {
        self.monthly_fee
            .or_else(|| self.pricing.as_ref().map(|p| p.monthly_fee))
    }
}
