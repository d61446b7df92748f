use thiserror::Error;

use crate::decimal::Money;
use crate::types::LockerId;
use crate::validation::ValidationResult;

#[derive(Error, Debug)]
pub enum LockerError {
    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("payment validation failed: {0}")]
    Validation(ValidationResult),

    #[error("missing field: {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("invalid monthly fee: {fee}")]
    InvalidMonthlyFee {
        fee: Money,
    },

    #[error("unknown payment method: {value}")]
    UnknownPaymentMethod {
        value: String,
    },

    #[error("locker {locker_id} already rented for an overlapping period")]
    OverlappingRental {
        locker_id: LockerId,
    },

    #[error("storage error: {message}")]
    Storage {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LockerError>;
