use serde::{Deserialize, Serialize};
use std::ops::Deref;
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a saved loan plan
pub type PlanId = Uuid;

/// one period of an amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScheduleRow {
    /// 1-indexed period number
    pub month: u32,
    /// interest plus principal paid this period
    pub payment_amount: Money,
    pub principal_payment: Money,
    /// interest on the balance before this period's payment
    pub interest_payment: Money,
    /// balance after this period's payment, in whole cents
    pub remaining_balance: Money,
    /// one-time payment applied in this period, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_time_extra_payment: Option<Money>,
}

impl PaymentScheduleRow {
    /// balance before this period's payments
    pub fn opening_balance(&self) -> Money {
        self.remaining_balance
            + self.principal_payment
            + self.one_time_extra_payment.unwrap_or(Money::ZERO)
    }
}

/// schedule exactly as the generator produced it
///
/// Only the generator builds one and it is never deserialized, so a
/// `BaseSchedule` never reflects one-time payments. Read access goes
/// through `Deref<Target = [PaymentScheduleRow]>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BaseSchedule(Vec<PaymentScheduleRow>);

impl BaseSchedule {
    pub(crate) fn new(rows: Vec<PaymentScheduleRow>) -> Self {
        BaseSchedule(rows)
    }

    pub fn rows(&self) -> &[PaymentScheduleRow] {
        &self.0
    }

    /// copy of the rows for callers that need an owned schedule
    pub fn to_vec(&self) -> Vec<PaymentScheduleRow> {
        self.0.clone()
    }
}

impl Deref for BaseSchedule {
    type Target = [PaymentScheduleRow];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// output of a full schedule generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageResult {
    /// fixed nominal payment, unaffected by extra payments
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub schedule: BaseSchedule,
    /// payoff month when the loan ends before its contractual term
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_month: Option<u32>,
}

impl MortgageResult {
    /// result for a loan with nothing left to amortize
    pub fn empty() -> Self {
        Self {
            monthly_payment: Money::ZERO,
            total_interest: Money::ZERO,
            total_payment: Money::ZERO,
            schedule: BaseSchedule::default(),
            final_month: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }

    /// number of periods actually paid
    pub fn payoff_months(&self) -> u32 {
        self.schedule.len() as u32
    }
}
