use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Money;
use crate::types::PaymentMethod;

/// payment fields as submitted by the rental form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    pub months: Option<i32>,
    pub payment_method: Option<PaymentMethod>,
    pub start_date: Option<NaiveDate>,
    pub amount: Option<Money>,
}

/// form field a validation message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentField {
    Months,
    PaymentMethod,
    StartDate,
    Amount,
}

impl PaymentField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentField::Months => "months",
            PaymentField::PaymentMethod => "paymentMethod",
            PaymentField::StartDate => "startDate",
            PaymentField::Amount => "amount",
        }
    }
}

impl fmt::Display for PaymentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: PaymentField,
    pub message: String,
}

/// outcome of validating a draft; lists every failing field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn error_for(&self, field: PaymentField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has_error(&self, field: PaymentField) -> bool {
        self.error_for(field).is_some()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("ok");
        }
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

/// checks payment drafts against duration bounds and the current day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentValidator {
    pub min_months: i32,
    pub max_months: i32,
}

impl Default for PaymentValidator {
    fn default() -> Self {
        Self {
            min_months: 1,
            max_months: 12,
        }
    }
}

impl PaymentValidator {
    pub fn new(min_months: i32, max_months: i32) -> Self {
        Self { min_months, max_months }
    }

    /// validate every field; `today` is the calendar day past dates are
    /// compared against (today itself is allowed)
    pub fn validate(&self, draft: &PaymentDraft, today: NaiveDate) -> ValidationResult {
        let mut errors = Vec::new();
        let mut fail = |field, message: String| errors.push(FieldError { field, message });

        match draft.months {
            None => fail(PaymentField::Months, "rental duration is required".to_string()),
            Some(m) if m < self.min_months => {
                fail(PaymentField::Months, format!("minimum {}", plural_months(self.min_months)))
            }
            Some(m) if m > self.max_months => {
                fail(PaymentField::Months, format!("maximum {}", plural_months(self.max_months)))
            }
            Some(_) => {}
        }

        if draft.payment_method.is_none() {
            fail(PaymentField::PaymentMethod, "payment method is required".to_string());
        }

        match draft.start_date {
            None => fail(PaymentField::StartDate, "start date is required".to_string()),
            Some(start) if start < today => {
                fail(PaymentField::StartDate, "start date cannot be in the past".to_string())
            }
            Some(_) => {}
        }

        match draft.amount {
            None => fail(PaymentField::Amount, "amount is required".to_string()),
            Some(amount) if !amount.is_positive() => {
                fail(PaymentField::Amount, "amount must be greater than zero".to_string())
            }
            Some(_) => {}
        }

        ValidationResult::from_errors(errors)
    }

    /// validate against the provider's current day
    ///
    /// The day is the UTC calendar date of `time.now()`; east of UTC an early
    /// morning submission still sees the previous day. Callers that know
    /// their local date should pass it to [`validate`](Self::validate).
    pub fn validate_now(&self, draft: &PaymentDraft, time: &SafeTimeProvider) -> ValidationResult {
        self.validate(draft, time.now().date_naive())
    }
}

fn plural_months(n: i32) -> String {
    if n == 1 {
        "1 month".to_string()
    } else {
        format!("{n} months")
    }
}

/// validate with the default 1..=12 month bounds
pub fn validate_payment_data(draft: &PaymentDraft, today: NaiveDate) -> ValidationResult {
    PaymentValidator::default().validate(draft, today)
}
