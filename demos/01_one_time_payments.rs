/// one-time payments - fold lump sums over the base schedule
use mortgage_planner_rs::{
    format_currency, LoanInputs, Money, OneTimePayments, ScheduleSummary,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let inputs = LoanInputs::builder()
        .principal(Money::from_major(300_000))
        .rate_percent(dec!(6))
        .term_months(360)
        .recurring_extra_payment(Money::from_major(100))
        .build()?;

    let base = inputs.generate();
    let baseline = ScheduleSummary::from_schedule(&base.schedule, base.monthly_payment);

    let mut payments = OneTimePayments::new();
    payments.set(12, Money::from_major(50_000))?;
    payments.set(60, Money::from_major(10_000))?;

    // always folded over the untouched base schedule
    let updated = payments.apply(&base, &inputs);
    let summary = ScheduleSummary::from_schedule(&updated, base.monthly_payment);
    let savings = summary.savings_against(&baseline);

    println!("base:    {} months, {} interest", baseline.months, format_currency(baseline.total_interest));
    println!("updated: {} months, {} interest", summary.months, format_currency(summary.total_interest));
    println!(
        "saved:   {} months, {} interest",
        savings.months_saved,
        format_currency(savings.interest_saved)
    );

    for row in updated.iter().filter(|r| r.one_time_extra_payment.is_some()) {
        println!(
            "month {:>3}: lump sum {} leaves {}",
            row.month,
            format_currency(row.one_time_extra_payment.unwrap_or(Money::ZERO)),
            format_currency(row.remaining_balance),
        );
    }

    Ok(())
}
