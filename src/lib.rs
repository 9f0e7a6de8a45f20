pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod format;
pub mod plan;
pub mod schedule;
pub mod summary;
pub mod types;

// re-export key types
pub use config::{LoanInputs, LoanInputsBuilder, MAX_ANNUAL_RATE_PERCENT, MAX_TERM_MONTHS, PAYOFF_EPSILON};
pub use decimal::{Money, Rate};
pub use errors::{PlannerError, Result};
pub use events::{EventStore, PlanEvent};
pub use format::{format_currency, format_number};
pub use plan::{LoanPlan, SavedPlan};
pub use schedule::{
    calculate_monthly_payment, generate_amortization_schedule, recalculate_schedule_from_month,
    OneTimePayments, PeriodSplit,
};
pub use summary::{PayoffProgress, Savings, ScheduleSummary};
pub use types::{BaseSchedule, MortgageResult, PaymentScheduleRow, PlanId};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
