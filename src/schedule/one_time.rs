use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::LoanInputs;
use crate::decimal::Money;
use crate::errors::{PlannerError, Result};
use crate::types::{MortgageResult, PaymentScheduleRow};

use super::recalculate_schedule_from_month;

/// one-time extra payments keyed by month
///
/// Amounts are always positive; setting a month to zero removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OneTimePayments(BTreeMap<u32, Money>);

impl OneTimePayments {
    pub fn new() -> Self {
        Self::default()
    }

    /// record a payment for `month`, replacing any existing one
    ///
    /// Returns the amount previously recorded for that month.
    pub fn set(&mut self, month: u32, amount: Money) -> Result<Option<Money>> {
        if month == 0 {
            return Err(PlannerError::InvalidMonth {
                month,
                schedule_len: 0,
            });
        }

        if amount.is_negative() {
            return Err(PlannerError::InvalidPaymentAmount { amount });
        }

        if amount.is_zero() {
            return Ok(self.0.remove(&month));
        }

        Ok(self.0.insert(month, amount))
    }

    pub fn remove(&mut self, month: u32) -> Option<Money> {
        self.0.remove(&month)
    }

    pub fn get(&self, month: u32) -> Option<Money> {
        self.0.get(&month).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// payments in ascending month order
    pub fn iter(&self) -> impl Iterator<Item = (u32, Money)> + '_ {
        self.0.iter().map(|(month, amount)| (*month, *amount))
    }

    pub fn total(&self) -> Money {
        self.0.values().sum()
    }

    /// fold every payment over the generator's schedule, earliest month first
    ///
    /// Always starts from `base.schedule`, so repeated calls with different
    /// payment sets never compound on each other. Returns the base rows
    /// unchanged when there are no payments.
    pub fn apply(&self, base: &MortgageResult, inputs: &LoanInputs) -> Vec<PaymentScheduleRow> {
        let monthly_rate = inputs.monthly_rate();

        self.iter()
            .fold(base.schedule.to_vec(), |schedule, (month, amount)| {
                recalculate_schedule_from_month(
                    &schedule,
                    month,
                    amount,
                    monthly_rate,
                    base.monthly_payment,
                    inputs.recurring_extra_payment,
                )
            })
    }
}

impl FromIterator<(u32, Money)> for OneTimePayments {
    /// zero and negative amounts are skipped
    fn from_iter<I: IntoIterator<Item = (u32, Money)>>(iter: I) -> Self {
        OneTimePayments(
            iter.into_iter()
                .filter(|(month, amount)| *month > 0 && amount.is_positive())
                .collect(),
        )
    }
}
