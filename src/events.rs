use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::PlanId;

/// all events that can be emitted by a loan plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanEvent {
    // lifecycle events
    PlanCreated {
        plan_id: PlanId,
        name: String,
        loan_amount: Money,
        timestamp: DateTime<Utc>,
    },
    PlanRenamed {
        plan_id: PlanId,
        old_name: String,
        new_name: String,
        timestamp: DateTime<Utc>,
    },

    // calculation events
    ScheduleGenerated {
        plan_id: PlanId,
        monthly_payment: Money,
        total_interest: Money,
        months: u32,
        timestamp: DateTime<Utc>,
    },
    ScheduleRecalculated {
        plan_id: PlanId,
        one_time_payment_count: usize,
        months: u32,
        timestamp: DateTime<Utc>,
    },

    // extra payment events
    RecurringExtraChanged {
        plan_id: PlanId,
        old_amount: Money,
        new_amount: Money,
        timestamp: DateTime<Utc>,
    },
    OneTimePaymentSet {
        plan_id: PlanId,
        month: u32,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    OneTimePaymentRemoved {
        plan_id: PlanId,
        month: u32,
        amount: Money,
        timestamp: DateTime<Utc>,
    },

    // progress events
    PaidMonthsChanged {
        plan_id: PlanId,
        old_paid_months: u32,
        new_paid_months: u32,
        remaining_balance: Money,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<PlanEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: PlanEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<PlanEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[PlanEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
