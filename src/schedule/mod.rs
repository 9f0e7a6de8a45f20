pub mod generator;
pub mod one_time;
pub mod recalculate;

use rust_decimal::Decimal;

use crate::config::PAYOFF_EPSILON;
use crate::decimal::{Money, Rate};
use crate::types::PaymentScheduleRow;

pub use generator::generate_amortization_schedule;
pub use one_time::OneTimePayments;
pub use recalculate::recalculate_schedule_from_month;

/// fixed monthly payment that retires `loan_amount` over `months` periods
///
/// M = P * r * (1 + r)^n / ((1 + r)^n - 1), or P / n when r is zero.
pub fn calculate_monthly_payment(loan_amount: Money, monthly_rate: Rate, months: u32) -> Money {
    if months == 0 {
        return loan_amount;
    }

    let r = monthly_rate.as_decimal();

    if r.is_zero() {
        return loan_amount / Decimal::from(months);
    }

    // (1 + r)^n, falling back to the interest-only limit when it overflows
    let base = Decimal::ONE + r;
    let mut compound = Decimal::ONE;
    for _ in 0..months {
        match compound.checked_mul(base) {
            Some(next) => compound = next,
            None => return loan_amount * r,
        }
    }

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return loan_amount / Decimal::from(months);
    }

    match r.checked_mul(compound).and_then(|n| n.checked_div(denominator)) {
        Some(factor) => loan_amount * factor,
        None => loan_amount * r,
    }
}

/// true once a balance is small enough to count as paid off
pub fn is_paid_off(balance: Money) -> bool {
    balance <= PAYOFF_EPSILON
}

/// interest/principal split of a single period, at working precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSplit {
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

impl PeriodSplit {
    /// split one period's payment against an opening balance
    ///
    /// Principal never exceeds the opening balance and never goes below
    /// zero. Nothing is rounded here; the running balance keeps the full
    /// working precision of [`Money`].
    pub fn compute(
        opening_balance: Money,
        monthly_rate: Rate,
        payment: Money,
        recurring_extra: Money,
    ) -> Self {
        let interest = opening_balance * monthly_rate;
        let principal = (payment - interest + recurring_extra)
            .min(opening_balance)
            .non_negative();

        Self {
            interest,
            principal,
            closing_balance: opening_balance - principal,
        }
    }

    /// fold whatever balance is left into this period's principal
    pub fn settle(self) -> Self {
        Self {
            principal: self.principal + self.closing_balance,
            closing_balance: Money::ZERO,
            ..self
        }
    }

    /// settle when this is the last period or the balance is within a cent
    pub fn settle_if(self, last_period: bool) -> Self {
        if last_period || is_paid_off(self.closing_balance) {
            self.settle()
        } else {
            self
        }
    }

    /// the period as stored in a schedule, amounts in whole cents
    ///
    /// Principal is the drop between the rounded opening and closing
    /// balances, so the principal column always sums to the amount
    /// amortized. `opening_balance` excludes any one-time payment.
    pub fn to_row(
        &self,
        month: u32,
        opening_balance: Money,
        one_time_extra_payment: Option<Money>,
    ) -> PaymentScheduleRow {
        let interest_payment = self.interest.round_cents();
        let remaining_balance = self.closing_balance.round_cents();
        let principal_payment = opening_balance.round_cents() - remaining_balance;

        PaymentScheduleRow {
            month,
            payment_amount: interest_payment + principal_payment,
            principal_payment,
            interest_payment,
            remaining_balance,
            one_time_extra_payment,
        }
    }
}
