use crate::config::{LoanInputs, MAX_TERM_MONTHS};
use crate::decimal::Money;
use crate::types::{BaseSchedule, MortgageResult};

use super::{calculate_monthly_payment, is_paid_off, PeriodSplit};

/// generate the full amortization schedule for a set of loan inputs
///
/// Never fails. A loan fully covered by its down payment yields
/// [`MortgageResult::empty`]; a zero rate amortizes straight-line. The
/// schedule stops early the first month the balance is at or below one
/// cent, in which case `final_month` records the payoff month. The last
/// period of the term pays off whatever balance remains.
pub fn generate_amortization_schedule(inputs: &LoanInputs) -> MortgageResult {
    let loan_amount = inputs.loan_amount();

    if !loan_amount.is_positive() {
        tracing::debug!(
            principal = %inputs.principal,
            down_payment = %inputs.down_payment,
            "loan fully covered by down payment, empty schedule"
        );
        return MortgageResult::empty();
    }

    let term = inputs.loan_term_months;
    let monthly_rate = inputs.monthly_rate();
    let monthly_payment = calculate_monthly_payment(loan_amount, monthly_rate, term);

    let mut schedule = Vec::with_capacity(term.min(MAX_TERM_MONTHS) as usize);
    let mut remaining_balance = loan_amount;
    let mut total_interest_paid = Money::ZERO;
    let mut final_month = term;

    for month in 1..=term {
        if is_paid_off(remaining_balance) {
            final_month = month - 1;
            break;
        }

        let opening_balance = remaining_balance;
        let split = PeriodSplit::compute(
            opening_balance,
            monthly_rate,
            monthly_payment,
            inputs.recurring_extra_payment,
        )
        .settle_if(month == term);

        let row = split.to_row(month, opening_balance, None);
        remaining_balance = split.closing_balance;
        total_interest_paid += row.interest_payment;
        schedule.push(row);
    }

    let total_interest = total_interest_paid.round_cents();

    tracing::debug!(
        loan_amount = %loan_amount,
        monthly_payment = %monthly_payment,
        rows = schedule.len(),
        total_interest = %total_interest,
        "amortization schedule generated"
    );

    MortgageResult {
        monthly_payment,
        total_interest,
        total_payment: (total_interest_paid + loan_amount).round_cents(),
        schedule: BaseSchedule::new(schedule),
        final_month: (final_month < term).then_some(final_month),
    }
}

impl LoanInputs {
    /// convenience for [`generate_amortization_schedule`]
    pub fn generate(&self) -> MortgageResult {
        generate_amortization_schedule(self)
    }
}
