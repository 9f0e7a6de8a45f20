use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::schedule::is_paid_off;
use crate::types::PaymentScheduleRow;

/// totals recomputed from the rows of a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    /// one-time payments recorded on the rows
    pub total_one_time_extra: Money,
    /// interest, principal and one-time payments together
    pub total_payment: Money,
    pub months: u32,
    /// set when the last row leaves the loan paid off
    pub final_month: Option<u32>,
}

impl ScheduleSummary {
    pub fn from_schedule(schedule: &[PaymentScheduleRow], monthly_payment: Money) -> Self {
        let total_interest: Money = schedule.iter().map(|r| r.interest_payment).sum();
        let total_principal: Money = schedule.iter().map(|r| r.principal_payment).sum();
        let total_one_time_extra: Money = schedule
            .iter()
            .filter_map(|r| r.one_time_extra_payment)
            .sum();

        let months = schedule.len() as u32;
        let final_month = schedule
            .last()
            .filter(|last| is_paid_off(last.remaining_balance))
            .map(|_| months);

        Self {
            monthly_payment,
            total_interest: total_interest.round_cents(),
            total_principal: total_principal.round_cents(),
            total_one_time_extra: total_one_time_extra.round_cents(),
            total_payment: (total_interest + total_principal + total_one_time_extra).round_cents(),
            months,
            final_month,
        }
    }

    /// what this schedule saves compared with `baseline`
    pub fn savings_against(&self, baseline: &ScheduleSummary) -> Savings {
        Savings {
            interest_saved: (baseline.total_interest - self.total_interest).non_negative(),
            months_saved: baseline.months.saturating_sub(self.months),
        }
    }
}

/// interest and time saved by extra payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    pub interest_saved: Money,
    pub months_saved: u32,
}

/// where a borrower stands after a number of payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffProgress {
    pub paid_months: u32,
    pub remaining_balance: Money,
    pub remaining_months: u32,
    /// share of the loan amount repaid, 0 to 100
    pub percentage_paid: Decimal,
}

impl PayoffProgress {
    /// progress after `paid_months` rows of `schedule` have been paid
    ///
    /// Nothing paid reports the full `loan_amount`; paying past the end of
    /// the schedule reports a zero balance.
    pub fn at(schedule: &[PaymentScheduleRow], loan_amount: Money, paid_months: u32) -> Self {
        let len = schedule.len() as u32;

        let (remaining_balance, remaining_months) = if paid_months == 0 {
            (loan_amount, len)
        } else if paid_months >= len {
            (Money::ZERO, 0)
        } else {
            (
                schedule[(paid_months - 1) as usize].remaining_balance,
                len - paid_months,
            )
        };

        let percentage_paid = if loan_amount.is_positive() {
            ((loan_amount - remaining_balance).as_decimal() / loan_amount.as_decimal()
                * Decimal::ONE_HUNDRED)
                .round_dp(2)
        } else {
            Decimal::ZERO
        };

        Self {
            paid_months,
            remaining_balance,
            remaining_months,
            percentage_paid,
        }
    }

    pub fn is_paid_off(&self) -> bool {
        self.remaining_months == 0 && is_paid_off(self.remaining_balance)
    }
}
