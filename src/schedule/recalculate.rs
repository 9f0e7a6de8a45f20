use crate::decimal::{Money, Rate};
use crate::types::PaymentScheduleRow;

use super::{is_paid_off, PeriodSplit};

/// re-derive a schedule from `target_month` onward after a one-time payment
///
/// The balance before `target_month` comes from the previous row, or for
/// month 1 from the first row's opening balance. The
/// one-time payment comes off that balance before the month is amortized,
/// and every later month is walked again with the recurring extra applied.
/// The schedule is cut at the first row whose opening balance is paid off,
/// and the last row of `base_schedule` pays off whatever remains. Rows
/// before `target_month` are copied unchanged.
///
/// A `target_month` of zero or past the end of `base_schedule` returns an
/// unchanged copy.
///
/// A payment already recorded on the target row is replaced, not added
/// to, so `base_schedule` should normally be a generator schedule.
/// [`super::OneTimePayments::apply`] folds every payment over one through
/// [`crate::types::BaseSchedule`].
pub fn recalculate_schedule_from_month(
    base_schedule: &[PaymentScheduleRow],
    target_month: u32,
    one_time_payment: Money,
    monthly_rate: Rate,
    base_monthly_payment: Money,
    recurring_extra_payment: Money,
) -> Vec<PaymentScheduleRow> {
    if target_month < 1 || target_month as usize > base_schedule.len() {
        tracing::debug!(
            target_month,
            rows = base_schedule.len(),
            "target month outside schedule, nothing to recalculate"
        );
        return base_schedule.to_vec();
    }

    let month_index = (target_month - 1) as usize;

    let balance_before_month = if month_index > 0 {
        base_schedule[month_index - 1].remaining_balance
    } else {
        base_schedule[0].opening_balance()
    };

    let mut remaining_balance = (balance_before_month - one_time_payment).non_negative();

    let mut updated: Vec<PaymentScheduleRow> = base_schedule[..month_index].to_vec();
    updated.reserve(base_schedule.len() - month_index);
    let last_index = base_schedule.len() - 1;

    for index in month_index..base_schedule.len() {
        if is_paid_off(remaining_balance) {
            break;
        }

        let opening_balance = remaining_balance;
        let split = PeriodSplit::compute(
            opening_balance,
            monthly_rate,
            base_monthly_payment,
            recurring_extra_payment,
        )
        .settle_if(index == last_index);

        remaining_balance = split.closing_balance;

        let one_time_extra_payment =
            (index == month_index && one_time_payment.is_positive()).then_some(one_time_payment);

        updated.push(split.to_row(index as u32 + 1, opening_balance, one_time_extra_payment));
    }

    tracing::debug!(
        target_month,
        one_time_payment = %one_time_payment,
        rows_before = base_schedule.len(),
        rows_after = updated.len(),
        "schedule recalculated from month"
    );

    updated
}
