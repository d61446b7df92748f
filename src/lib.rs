pub mod calculator;
pub mod config;
pub mod dates;
pub mod decimal;
pub mod discount;
pub mod errors;
pub mod events;
pub mod payment;
pub mod rental;
pub mod types;
pub mod validation;

// re-export key types
pub use calculator::{calculate_full_payment, PaymentCalculation, PaymentCalculator};
pub use config::PricingConfig;
pub use dates::{add_months, format_date, months_between, parse_date};
pub use decimal::{Money, Rate};
pub use discount::{resolve_discount_rate, DiscountPolicy, DiscountTier};
pub use errors::{LockerError, Result};
pub use events::{Event, EventStore};
pub use payment::{
    InMemoryPaymentStore, LockerPaymentBuilder, LockerPaymentRecord, PaymentDesk, PaymentStore,
    SubmissionReceipt,
};
pub use rental::LockerRental;
pub use types::{LockerId, MemberId, PaymentId, PaymentMethod, RentalKind, RentalStatus};
pub use validation::{
    validate_payment_data, FieldError, PaymentDraft, PaymentField, PaymentValidator,
    ValidationResult,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
