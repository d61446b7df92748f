use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{LockerId, MemberId, PaymentId, PaymentMethod};
use crate::validation::FieldError;

/// all events that can be emitted by the payment desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    PaymentCalculated {
        locker_id: LockerId,
        member_id: MemberId,
        months: i32,
        original_amount: Money,
        discount_rate: Rate,
        final_amount: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
        is_extension: bool,
        timestamp: DateTime<Utc>,
    },
    PaymentRejected {
        locker_id: LockerId,
        member_id: MemberId,
        errors: Vec<FieldError>,
        timestamp: DateTime<Utc>,
    },
    PaymentSubmitted {
        payment_id: PaymentId,
        locker_id: LockerId,
        member_id: MemberId,
        amount: Money,
        payment_method: PaymentMethod,
        timestamp: DateTime<Utc>,
    },
    SubmissionFailed {
        locker_id: LockerId,
        member_id: MemberId,
        error: String,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
