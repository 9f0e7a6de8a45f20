use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{PlannerError, Result};

/// longest contractual term accepted by validation
pub const MAX_TERM_MONTHS: u32 = 600;

/// highest nominal annual rate accepted by validation, in percent
pub const MAX_ANNUAL_RATE_PERCENT: u32 = 100;

/// balances at or below this are treated as paid off
pub const PAYOFF_EPSILON: Money = Money::CENT;

/// loan inputs for a single calculation
///
/// Constructing the struct directly performs no validation; the schedule
/// engine degrades gracefully on nonsensical values. Use
/// [`LoanInputs::builder`] or [`LoanInputs::validate`] at the input
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInputs {
    /// original face value before the down payment
    pub principal: Money,
    /// nominal annual rate in percent (6.5 means 6.5%)
    pub annual_interest_rate: Decimal,
    pub loan_term_months: u32,
    #[serde(default)]
    pub down_payment: Money,
    /// added to the principal portion of every period
    #[serde(default)]
    pub recurring_extra_payment: Money,
}

impl LoanInputs {
    pub fn new(principal: Money, annual_interest_rate: Decimal, loan_term_months: u32) -> Self {
        Self {
            principal,
            annual_interest_rate,
            loan_term_months,
            down_payment: Money::ZERO,
            recurring_extra_payment: Money::ZERO,
        }
    }

    pub fn builder() -> LoanInputsBuilder {
        LoanInputsBuilder::new()
    }

    /// amount actually amortized: principal less down payment, never negative
    pub fn loan_amount(&self) -> Money {
        (self.principal - self.down_payment).non_negative()
    }

    pub fn annual_rate(&self) -> Rate {
        Rate::from_percent(self.annual_interest_rate)
    }

    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate().monthly_rate()
    }

    /// check the bounds the input form enforces
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(PlannerError::InvalidPrincipal {
                principal: self.principal,
            });
        }

        if self.annual_interest_rate < Decimal::ZERO
            || self.annual_interest_rate > Decimal::from(MAX_ANNUAL_RATE_PERCENT)
        {
            return Err(PlannerError::InvalidInterestRate {
                rate: self.annual_rate(),
                max_percent: MAX_ANNUAL_RATE_PERCENT,
            });
        }

        if self.loan_term_months == 0 || self.loan_term_months > MAX_TERM_MONTHS {
            return Err(PlannerError::InvalidTerm {
                months: self.loan_term_months,
                max_months: MAX_TERM_MONTHS,
            });
        }

        if self.down_payment.is_negative() {
            return Err(PlannerError::InvalidDownPayment {
                amount: self.down_payment,
            });
        }

        if self.recurring_extra_payment.is_negative() {
            return Err(PlannerError::InvalidRecurringExtra {
                amount: self.recurring_extra_payment,
            });
        }

        Ok(())
    }

    /// typical 30 year fixed mortgage with 20% down
    pub fn thirty_year_fixed(price: Money, annual_interest_rate: Decimal) -> Self {
        Self {
            principal: price,
            annual_interest_rate,
            loan_term_months: 360,
            down_payment: (price * dec!(0.20)).round_cents(),
            recurring_extra_payment: Money::ZERO,
        }
    }
}

/// builder for loan inputs
#[derive(Debug, Default)]
pub struct LoanInputsBuilder {
    principal: Option<Money>,
    annual_interest_rate: Option<Decimal>,
    loan_term_months: Option<u32>,
    down_payment: Option<Money>,
    recurring_extra_payment: Option<Money>,
}

impl LoanInputsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    /// annual rate in percent
    pub fn rate_percent(mut self, rate: Decimal) -> Self {
        self.annual_interest_rate = Some(rate);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.annual_interest_rate = Some(rate.as_percentage());
        self
    }

    pub fn term_months(mut self, months: u32) -> Self {
        self.loan_term_months = Some(months);
        self
    }

    pub fn term_years(mut self, years: u32) -> Self {
        self.loan_term_months = Some(years * 12);
        self
    }

    pub fn down_payment(mut self, amount: Money) -> Self {
        self.down_payment = Some(amount);
        self
    }

    pub fn recurring_extra_payment(mut self, amount: Money) -> Self {
        self.recurring_extra_payment = Some(amount);
        self
    }

    pub fn build(self) -> Result<LoanInputs> {
        let principal = self.principal.ok_or(PlannerError::InvalidConfiguration {
            message: "principal is required".to_string(),
        })?;
        let annual_interest_rate =
            self.annual_interest_rate
                .ok_or(PlannerError::InvalidConfiguration {
                    message: "interest rate is required".to_string(),
                })?;
        let loan_term_months = self.loan_term_months.ok_or(PlannerError::InvalidConfiguration {
            message: "loan term is required".to_string(),
        })?;

        let inputs = LoanInputs {
            principal,
            annual_interest_rate,
            loan_term_months,
            down_payment: self.down_payment.unwrap_or(Money::ZERO),
            recurring_extra_payment: self.recurring_extra_payment.unwrap_or(Money::ZERO),
        };

        inputs.validate()?;
        Ok(inputs)
    }
}
