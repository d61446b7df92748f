use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::LockerError;
use crate::payment::{LockerPaymentRecord, PaymentStore, SubmissionReceipt};
use crate::types::{LockerId, MemberId, PaymentId};

/// in-memory payment store for tests and demos
#[derive(Debug, Default)]
pub struct InMemoryPaymentStore {
    payments: Vec<(PaymentId, LockerPaymentRecord)>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    pub fn get(&self, payment_id: PaymentId) -> Option<&LockerPaymentRecord> {
        self.payments
            .iter()
            .find(|(id, _)| *id == payment_id)
            .map(|(_, record)| record)
    }

    pub fn payments_for_locker(&self, locker_id: LockerId) -> impl Iterator<Item = &LockerPaymentRecord> {
        self.payments
            .iter()
            .map(|(_, record)| record)
            .filter(move |record| record.locker_id == locker_id)
    }

    pub fn payments_for_member(&self, member_id: MemberId) -> impl Iterator<Item = &LockerPaymentRecord> {
        self.payments
            .iter()
            .map(|(_, record)| record)
            .filter(move |record| record.member_id == member_id)
    }
}

impl PaymentStore for InMemoryPaymentStore {
    fn submit_locker_payment(&mut self, record: &LockerPaymentRecord) -> SubmissionReceipt {
        let clash = self
            .payments_for_locker(record.locker_id)
            .any(|existing| existing.overlaps(record.start_date, record.end_date));
        if clash {
            let err = LockerError::OverlappingRental {
                locker_id: record.locker_id,
            };
            return SubmissionReceipt::failed(err.to_string());
        }

        let payment_id = Uuid::new_v4();
        self.payments.push((payment_id, record.clone()));
        SubmissionReceipt::accepted(payment_id)
    }

    fn current_end_date(&self, locker_id: LockerId) -> Option<NaiveDate> {
        self.payments_for_locker(locker_id).map(|r| r.end_date).max()
    }
}
