/// quick start - generate a schedule and print the first year
use mortgage_planner_rs::{format_currency, generate_amortization_schedule, LoanInputs, Money};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // $300,000 at 6% over 30 years
    let inputs = LoanInputs::builder()
        .principal(Money::from_major(300_000))
        .rate_percent(dec!(6))
        .term_years(30)
        .build()?;

    let result = generate_amortization_schedule(&inputs);

    println!("monthly payment: {}", format_currency(result.monthly_payment));
    println!("total interest:  {}", format_currency(result.total_interest));
    println!("total payment:   {}\n", format_currency(result.total_payment));

    for row in result.schedule.iter().take(12) {
        println!(
            "month {:>3}  interest {:>12}  principal {:>12}  balance {:>14}",
            row.month,
            format_currency(row.interest_payment),
            format_currency(row.principal_payment),
            format_currency(row.remaining_balance),
        );
    }

    Ok(())
}
