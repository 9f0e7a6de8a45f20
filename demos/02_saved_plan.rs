/// saved plan - track progress and persist a plan as json
use chrono::{Duration, TimeZone, Utc};
use mortgage_planner_rs::{
    format_currency, LoanInputs, LoanPlan, Money, SafeTimeProvider, SavedPlan, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let inputs = LoanInputs::thirty_year_fixed(Money::from_major(450_000), dec!(6.5));
    let mut plan = LoanPlan::new("Main street", inputs, &time)?;

    plan.set_one_time_payment(24, Money::from_major(25_000), &time)?;

    controller.advance(Duration::days(365));
    let progress = plan.set_paid_months(12, &time)?;

    println!(
        "after {} payments: {} left over {} months ({}% paid)",
        progress.paid_months,
        format_currency(progress.remaining_balance),
        progress.remaining_months,
        progress.percentage_paid,
    );

    let json = plan.to_json_pretty()?;
    let restored = LoanPlan::from_saved(SavedPlan::from_json(&json)?, &time)?;
    assert_eq!(restored.effective_schedule(), plan.effective_schedule());

    println!("restored plan {} ({}) with {} events recorded", restored.name, restored.id, plan.events.len());
    for event in plan.events.events() {
        println!("  {:?}", event);
    }

    Ok(())
}
