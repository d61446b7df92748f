use hourglass_rs::SafeTimeProvider;
use tracing::{info, warn};

use crate::calculator::PaymentCalculation;
use crate::config::PricingConfig;
use crate::errors::{LockerError, Result};
use crate::events::{Event, EventStore};
use crate::payment::{LockerPaymentBuilder, LockerPaymentRecord, PaymentStore};
use crate::types::{LockerId, PaymentId, RentalKind};

/// front desk flow: price, validate, then hand off to the store
pub struct PaymentDesk<S: PaymentStore> {
    pub config: PricingConfig,
    pub events: EventStore,
    store: S,
}

impl<S: PaymentStore> PaymentDesk<S> {
    pub fn new(config: PricingConfig, store: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            events: EventStore::new(),
            store,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// price a rental with the desk's config, no validation
    pub fn quote(&self, months: i32, start: chrono::NaiveDate, kind: RentalKind) -> PaymentCalculation {
        self.config
            .calculator()
            .calculate(months, self.config.monthly_fee, start, kind)
    }

    /// build, validate and store a payment
    pub fn submit(&mut self, builder: LockerPaymentBuilder, time: &SafeTimeProvider) -> Result<PaymentId> {
        let builder = if builder.has_pricing() {
            builder
        } else {
            builder.pricing(self.config.clone())
        };
        let locker_id = builder.locker_id.unwrap_or_default();
        let member_id = builder.member_id.unwrap_or_default();
        let now = time.now();
        let today = now.date_naive();
        let is_extension = builder.rental_kind(today).is_extension();

        let record = match builder.build(today) {
            Ok(record) => record,
            Err(LockerError::Validation(result)) => {
                warn!(locker_id, member_id, errors = %result, "locker payment rejected");
                self.events.emit(Event::PaymentRejected {
                    locker_id,
                    member_id,
                    errors: result.errors.clone(),
                    timestamp: now,
                });
                return Err(LockerError::Validation(result));
            }
            Err(e) => return Err(e),
        };

        self.events.emit(Event::PaymentCalculated {
            locker_id: record.locker_id,
            member_id: record.member_id,
            months: record.months,
            original_amount: record.original_amount,
            discount_rate: record.discount_rate,
            final_amount: record.amount,
            start_date: record.start_date,
            end_date: record.end_date,
            is_extension,
            timestamp: now,
        });

        self.store_record(&record, time)
    }

    /// extend the locker's latest rental; a locker with no stored rental, or
    /// one whose rental has already ended, gets a new one starting on the
    /// requested date
    pub fn submit_extension(
        &mut self,
        builder: LockerPaymentBuilder,
        time: &SafeTimeProvider,
    ) -> Result<PaymentId> {
        let locker_id = builder
            .locker_id
            .ok_or(LockerError::MissingField { field: "locker_id" })?;

        let builder = match self.store.current_end_date(locker_id) {
            Some(current_end) => builder.extension_of(current_end),
            None => builder,
        };
        self.submit(builder, time)
    }

    pub fn current_end_date(&self, locker_id: LockerId) -> Option<chrono::NaiveDate> {
        self.store.current_end_date(locker_id)
    }

    fn store_record(&mut self, record: &LockerPaymentRecord, time: &SafeTimeProvider) -> Result<PaymentId> {
        let receipt = self.store.submit_locker_payment(record);
        let now = time.now();

        match receipt.into_result() {
            Ok(payment_id) => {
                info!(
                    %payment_id,
                    locker_id = record.locker_id,
                    member_id = record.member_id,
                    amount = %record.amount,
                    "locker payment stored"
                );
                self.events.emit(Event::PaymentSubmitted {
                    payment_id,
                    locker_id: record.locker_id,
                    member_id: record.member_id,
                    amount: record.amount,
                    payment_method: record.payment_method,
                    timestamp: now,
                });
                Ok(payment_id)
            }
            Err(e) => {
                warn!(locker_id = record.locker_id, error = %e, "locker payment submission failed");
                self.events.emit(Event::SubmissionFailed {
                    locker_id: record.locker_id,
                    member_id: record.member_id,
                    error: e.to_string(),
                    timestamp: now,
                });
                Err(e)
            }
        }
    }
}
