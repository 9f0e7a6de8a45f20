use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("invalid principal: {principal} must be greater than zero")]
    InvalidPrincipal {
        principal: Money,
    },

    #[error("invalid interest rate: {rate} outside 0% to {max_percent}%")]
    InvalidInterestRate {
        rate: Rate,
        max_percent: u32,
    },

    #[error("invalid loan term: {months} months outside 1 to {max_months}")]
    InvalidTerm {
        months: u32,
        max_months: u32,
    },

    #[error("invalid down payment: {amount}")]
    InvalidDownPayment {
        amount: Money,
    },

    #[error("invalid recurring extra payment: {amount}")]
    InvalidRecurringExtra {
        amount: Money,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("invalid month: {month} (schedule has {schedule_len} rows)")]
    InvalidMonth {
        month: u32,
        schedule_len: usize,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
