use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LoanInputs;
use crate::decimal::Money;
use crate::errors::{PlannerError, Result};
use crate::events::{EventStore, PlanEvent};
use crate::schedule::{generate_amortization_schedule, OneTimePayments};
use crate::summary::{PayoffProgress, Savings, ScheduleSummary};
use crate::types::{MortgageResult, PaymentScheduleRow, PlanId};

/// a named loan plan with its schedule and extra payments
///
/// The generator's result is kept untouched; the schedule reflecting
/// one-time payments is re-derived from it after every change.
#[derive(Debug)]
pub struct LoanPlan {
    pub id: PlanId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    inputs: LoanInputs,
    result: MortgageResult,
    one_time_payments: OneTimePayments,
    updated_schedule: Option<Vec<PaymentScheduleRow>>,
    paid_months: u32,
    pub events: EventStore,
}

impl LoanPlan {
    /// create a plan and generate its schedule
    pub fn new(name: impl Into<String>, inputs: LoanInputs, time: &SafeTimeProvider) -> Result<Self> {
        inputs.validate()?;

        let now = time.now();
        let mut plan = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            result: generate_amortization_schedule(&inputs),
            inputs,
            one_time_payments: OneTimePayments::new(),
            updated_schedule: None,
            paid_months: 0,
            events: EventStore::new(),
        };

        plan.events.emit(PlanEvent::PlanCreated {
            plan_id: plan.id,
            name: plan.name.clone(),
            loan_amount: plan.inputs.loan_amount(),
            timestamp: now,
        });
        plan.emit_generated(now);

        tracing::info!(plan_id = %plan.id, name = %plan.name, "loan plan created");

        Ok(plan)
    }

    /// replace the loan inputs and regenerate, keeping one-time payments
    pub fn calculate(&mut self, inputs: LoanInputs, time: &SafeTimeProvider) -> Result<()> {
        inputs.validate()?;

        let now = time.now();
        self.inputs = inputs;
        self.result = generate_amortization_schedule(&self.inputs);
        self.emit_generated(now);
        self.recompute(now);

        Ok(())
    }

    /// change the recurring extra payment and regenerate
    pub fn set_recurring_extra(&mut self, amount: Money, time: &SafeTimeProvider) -> Result<()> {
        if amount.is_negative() {
            return Err(PlannerError::InvalidRecurringExtra { amount });
        }

        let old_amount = self.inputs.recurring_extra_payment;
        let inputs = LoanInputs {
            recurring_extra_payment: amount,
            ..self.inputs.clone()
        };
        self.calculate(inputs, time)?;

        self.events.emit(PlanEvent::RecurringExtraChanged {
            plan_id: self.id,
            old_amount,
            new_amount: amount,
            timestamp: time.now(),
        });

        Ok(())
    }

    /// record a one-time payment; zero removes the month's payment
    ///
    /// The month must fall within the schedule currently followed, so a
    /// month already past payoff is rejected. A payment recorded earlier
    /// can still be cleared wherever it sits.
    pub fn set_one_time_payment(
        &mut self,
        month: u32,
        amount: Money,
        time: &SafeTimeProvider,
    ) -> Result<()> {
        let schedule_len = self.effective_schedule().len();
        let outside = month == 0 || month as usize > schedule_len;
        if outside && !(amount.is_zero() && self.one_time_payments.get(month).is_some()) {
            return Err(PlannerError::InvalidMonth { month, schedule_len });
        }

        let previous = self.one_time_payments.set(month, amount)?;
        let now = time.now();

        match (amount.is_zero(), previous) {
            (true, Some(removed)) => self.events.emit(PlanEvent::OneTimePaymentRemoved {
                plan_id: self.id,
                month,
                amount: removed,
                timestamp: now,
            }),
            (true, None) => return Ok(()),
            (false, _) => self.events.emit(PlanEvent::OneTimePaymentSet {
                plan_id: self.id,
                month,
                amount,
                timestamp: now,
            }),
        }

        self.recompute(now);
        Ok(())
    }

    pub fn remove_one_time_payment(&mut self, month: u32, time: &SafeTimeProvider) -> Option<Money> {
        let removed = self.one_time_payments.remove(month)?;
        let now = time.now();

        self.events.emit(PlanEvent::OneTimePaymentRemoved {
            plan_id: self.id,
            month,
            amount: removed,
            timestamp: now,
        });
        self.recompute(now);

        Some(removed)
    }

    pub fn clear_one_time_payments(&mut self, time: &SafeTimeProvider) {
        if self.one_time_payments.is_empty() {
            return;
        }

        let now = time.now();
        let removed: Vec<(u32, Money)> = self.one_time_payments.iter().collect();
        self.one_time_payments.clear();

        for (month, amount) in removed {
            self.events.emit(PlanEvent::OneTimePaymentRemoved {
                plan_id: self.id,
                month,
                amount,
                timestamp: now,
            });
        }
        self.recompute(now);
    }

    /// mark how many payments have been made so far
    pub fn set_paid_months(&mut self, paid_months: u32, time: &SafeTimeProvider) -> Result<PayoffProgress> {
        let schedule_len = self.effective_schedule().len();
        if paid_months as usize > schedule_len {
            return Err(PlannerError::InvalidMonth {
                month: paid_months,
                schedule_len,
            });
        }

        let old_paid_months = self.paid_months;
        self.paid_months = paid_months;
        let progress = self.progress();

        let now = time.now();
        self.updated_at = now;
        self.events.emit(PlanEvent::PaidMonthsChanged {
            plan_id: self.id,
            old_paid_months,
            new_paid_months: paid_months,
            remaining_balance: progress.remaining_balance,
            timestamp: now,
        });

        Ok(progress)
    }

    pub fn rename(&mut self, name: impl Into<String>, time: &SafeTimeProvider) {
        let new_name = name.into();
        let old_name = std::mem::replace(&mut self.name, new_name.clone());
        let now = time.now();
        self.updated_at = now;

        self.events.emit(PlanEvent::PlanRenamed {
            plan_id: self.id,
            old_name,
            new_name,
            timestamp: now,
        });
    }

    pub fn inputs(&self) -> &LoanInputs {
        &self.inputs
    }

    /// generator output without one-time payments
    pub fn result(&self) -> &MortgageResult {
        &self.result
    }

    pub fn one_time_payments(&self) -> &OneTimePayments {
        &self.one_time_payments
    }

    /// schedule with one-time payments, if any are recorded
    pub fn updated_schedule(&self) -> Option<&[PaymentScheduleRow]> {
        self.updated_schedule.as_deref()
    }

    /// the schedule the borrower actually follows
    pub fn effective_schedule(&self) -> &[PaymentScheduleRow] {
        self.updated_schedule
            .as_deref()
            .unwrap_or(self.result.schedule.rows())
    }

    pub fn paid_months(&self) -> u32 {
        self.paid_months
    }

    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary::from_schedule(self.effective_schedule(), self.result.monthly_payment)
    }

    /// interest and months saved by the one-time payments
    pub fn savings(&self) -> Savings {
        let baseline = ScheduleSummary::from_schedule(&self.result.schedule, self.result.monthly_payment);
        self.summary().savings_against(&baseline)
    }

    pub fn progress(&self) -> PayoffProgress {
        PayoffProgress::at(self.effective_schedule(), self.inputs.loan_amount(), self.paid_months)
    }

    /// serializable snapshot of the plan
    pub fn to_saved(&self) -> SavedPlan {
        SavedPlan {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
            inputs: self.inputs.clone(),
            result: Some(self.result.clone()),
            updated_schedule: self.updated_schedule.clone(),
            one_time_payments: self.one_time_payments.clone(),
            paid_months: self.paid_months,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_saved())?)
    }

    /// restore a plan from a saved snapshot
    ///
    /// The generator result is always rebuilt from the saved inputs, and a
    /// stored result that disagrees with them is discarded. The schedule
    /// with one-time payments is re-derived from the rebuilt result.
    pub fn from_saved(saved: SavedPlan, time: &SafeTimeProvider) -> Result<Self> {
        saved.inputs.validate()?;

        let now = time.now();
        let result = generate_amortization_schedule(&saved.inputs);
        if saved.result.as_ref().is_some_and(|stored| *stored != result) {
            tracing::warn!(
                plan_id = %saved.id,
                "stored schedule does not match plan inputs, regenerated"
            );
        }

        let mut plan = Self {
            id: saved.id,
            name: saved.name,
            created_at: saved.created_at,
            updated_at: now,
            inputs: saved.inputs,
            result,
            one_time_payments: saved.one_time_payments,
            updated_schedule: None,
            paid_months: 0,
            events: EventStore::new(),
        };

        plan.emit_generated(now);
        plan.recompute(now);
        plan.paid_months = saved.paid_months.min(plan.effective_schedule().len() as u32);

        Ok(plan)
    }

    /// re-derive the updated schedule from the untouched generator result
    fn recompute(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;

        if self.one_time_payments.is_empty() {
            self.updated_schedule = None;
        } else {
            let updated = self.one_time_payments.apply(&self.result, &self.inputs);
            self.events.emit(PlanEvent::ScheduleRecalculated {
                plan_id: self.id,
                one_time_payment_count: self.one_time_payments.len(),
                months: updated.len() as u32,
                timestamp: now,
            });
            self.updated_schedule = Some(updated);
        }

        let effective_len = self.effective_schedule().len() as u32;
        if self.paid_months > effective_len {
            self.paid_months = effective_len;
        }

        tracing::debug!(
            plan_id = %self.id,
            one_time_payments = self.one_time_payments.len(),
            months = effective_len,
            "plan schedule recomputed"
        );
    }

    fn emit_generated(&mut self, now: DateTime<Utc>) {
        self.events.emit(PlanEvent::ScheduleGenerated {
            plan_id: self.id,
            monthly_payment: self.result.monthly_payment,
            total_interest: self.result.total_interest,
            months: self.result.payoff_months(),
            timestamp: now,
        });
    }
}

/// serialized form of a loan plan
///
/// `result` is written for readers of the snapshot and skipped when
/// loading; [`LoanPlan::from_saved`] regenerates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlan {
    pub id: PlanId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub inputs: LoanInputs,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub result: Option<MortgageResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_schedule: Option<Vec<PaymentScheduleRow>>,
    #[serde(default)]
    pub one_time_payments: OneTimePayments,
    #[serde(default)]
    pub paid_months: u32,
}

impl SavedPlan {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hourglass_rs::TimeSource;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        ))
    }

    fn mortgage() -> LoanInputs {
        LoanInputs::new(Money::from_major(300_000), dec!(6), 360)
    }

    #[test]
    fn test_new_plan_generates_schedule() {
        let time = test_time();
        let plan = LoanPlan::new("House", mortgage(), &time).unwrap();

        assert_eq!(plan.result().schedule.len(), 360);
        assert!(plan.updated_schedule().is_none());
        assert_eq!(plan.effective_schedule().len(), 360);
        assert_eq!(plan.created_at, time.now());
        assert!(matches!(plan.events.events()[0], PlanEvent::PlanCreated { .. }));
        assert!(matches!(plan.events.events()[1], PlanEvent::ScheduleGenerated { months: 360, .. }));
    }

    #[test]
    fn test_new_plan_rejects_invalid_inputs() {
        let time = test_time();
        let inputs = LoanInputs::new(Money::from_major(100_000), dec!(5), 700);

        assert!(matches!(
            LoanPlan::new("Too long", inputs, &time),
            Err(PlannerError::InvalidTerm { months: 700, .. })
        ));
    }

    #[test]
    fn test_one_time_payment_updates_schedule() {
        let time = test_time();
        let mut plan = LoanPlan::new("House", mortgage(), &time).unwrap();

        plan.set_one_time_payment(12, Money::from_major(50_000), &time).unwrap();

        let updated = plan.updated_schedule().unwrap();
        assert!(updated.len() < 360);
        assert_eq!(updated[11].one_time_extra_payment, Some(Money::from_major(50_000)));
        // base stays pristine
        assert_eq!(plan.result().schedule.len(), 360);
        assert!(plan.result().schedule.iter().all(|r| r.one_time_extra_payment.is_none()));

        let savings = plan.savings();
        assert!(savings.months_saved > 0);
        assert!(savings.interest_saved.is_positive());
    }

    #[test]
    fn test_removing_last_payment_restores_base() {
        let time = test_time();
        let mut plan = LoanPlan::new("House", mortgage(), &time).unwrap();

        plan.set_one_time_payment(24, Money::from_major(10_000), &time).unwrap();
        assert!(plan.updated_schedule().is_some());

        plan.set_one_time_payment(24, Money::ZERO, &time).unwrap();
        assert!(plan.updated_schedule().is_none());
        assert_eq!(plan.effective_schedule(), plan.result().schedule.rows());
        assert!(matches!(
            plan.events.events().last(),
            Some(PlanEvent::OneTimePaymentRemoved { month: 24, .. })
        ));
    }

    #[test]
    fn test_one_time_payment_month_bounds() {
        let time = test_time();
        let mut plan = LoanPlan::new("House", mortgage(), &time).unwrap();

        assert!(matches!(
            plan.set_one_time_payment(0, Money::from_major(1_000), &time),
            Err(PlannerError::InvalidMonth { month: 0, schedule_len: 360 })
        ));
        assert!(plan.set_one_time_payment(361, Money::from_major(1_000), &time).is_err());
        assert!(plan.set_one_time_payment(360, Money::from_major(1_000), &time).is_ok());
    }

    #[test]
    fn test_payments_reapplied_after_input_change() {
        let time = test_time();
        let mut plan = LoanPlan::new("House", mortgage(), &time).unwrap();
        plan.set_one_time_payment(6, Money::from_major(20_000), &time).unwrap();

        plan.set_recurring_extra(Money::from_major(300), &time).unwrap();

        let expected = plan.one_time_payments().apply(plan.result(), plan.inputs());
        assert_eq!(plan.updated_schedule().unwrap(), &expected[..]);
        assert_eq!(plan.inputs().recurring_extra_payment, Money::from_major(300));
        assert!(plan.result().final_month.is_some());
    }

    #[test]
    fn test_remove_and_clear() {
        let time = test_time();
        let mut plan = LoanPlan::new("House", mortgage(), &time).unwrap();
        plan.set_one_time_payment(6, Money::from_major(1_000), &time).unwrap();
        plan.set_one_time_payment(18, Money::from_major(2_000), &time).unwrap();

        assert_eq!(plan.remove_one_time_payment(6, &time), Some(Money::from_major(1_000)));
        assert_eq!(plan.remove_one_time_payment(6, &time), None);
        assert_eq!(plan.one_time_payments().len(), 1);

        plan.clear_one_time_payments(&time);
        assert!(plan.one_time_payments().is_empty());
        assert!(plan.updated_schedule().is_none());
    }

    #[test]
    fn test_paid_months_progress() {
        let time = test_time();
        let inputs = LoanInputs::new(Money::from_major(12_000), dec!(0), 12);
        let mut plan = LoanPlan::new("Car", inputs, &time).unwrap();

        let progress = plan.set_paid_months(6, &time).unwrap();
        assert_eq!(progress.remaining_balance, Money::from_major(6_000));
        assert_eq!(progress.remaining_months, 6);
        assert_eq!(progress.percentage_paid, dec!(50));

        assert!(plan.set_paid_months(13, &time).is_err());
        assert_eq!(plan.paid_months(), 6);
    }

    #[test]
    fn test_paid_months_clamped_when_schedule_shrinks() {
        let time = test_time();
        let inputs = LoanInputs::new(Money::from_major(12_000), dec!(0), 12);
        let mut plan = LoanPlan::new("Car", inputs, &time).unwrap();
        plan.set_paid_months(10, &time).unwrap();

        // 1,000 a month plus 5,000 in month 2 clears the loan in month 7
        plan.set_one_time_payment(2, Money::from_major(5_000), &time).unwrap();

        assert_eq!(plan.effective_schedule().len(), 7);
        assert_eq!(plan.paid_months(), 7);
        assert!(plan.progress().is_paid_off());
    }

    #[test]
    fn test_rename_updates_timestamp() {
        let time = test_time();
        let control = time.test_control().unwrap();
        let mut plan = LoanPlan::new("Loan 1", mortgage(), &time).unwrap();

        control.advance(chrono::Duration::days(3));
        plan.rename("Lake house", &time);

        assert_eq!(plan.name, "Lake house");
        assert_eq!(plan.updated_at - plan.created_at, chrono::Duration::days(3));
    }

    #[test]
    fn test_saved_plan_round_trip() {
        let time = test_time();
        let mut plan = LoanPlan::new("House", mortgage(), &time).unwrap();
        plan.set_one_time_payment(12, Money::from_major(50_000), &time).unwrap();
        plan.set_paid_months(24, &time).unwrap();

        let json = plan.to_json_pretty().unwrap();
        assert!(json.contains("\"oneTimePayments\""));
        assert!(json.contains("\"updatedSchedule\""));

        let restored = LoanPlan::from_saved(SavedPlan::from_json(&json).unwrap(), &time).unwrap();

        assert_eq!(restored.id, plan.id);
        assert_eq!(restored.name, "House");
        assert_eq!(restored.result(), plan.result());
        assert_eq!(restored.updated_schedule(), plan.updated_schedule());
        assert_eq!(restored.paid_months(), 24);
    }

    #[test]
    fn test_saved_plan_without_result_regenerates() {
        let time = test_time();
        let json = r#"{
            "id": "6f1c3f5e-2d4b-4f7a-9b8e-0a1b2c3d4e5f",
            "name": "Imported",
            "createdAt": "2024-01-01T00:00:00Z",
            "inputs": {"principal": "120000", "annualInterestRate": "0", "loanTermMonths": 120},
            "oneTimePayments": {"60": "10000"}
        }"#;

        let plan = LoanPlan::from_saved(SavedPlan::from_json(json).unwrap(), &time).unwrap();

        assert_eq!(plan.result().schedule.len(), 120);
        // 59 months leave 61,000; the lump sum plus 1,000 in month 60 leaves 50,000
        let updated = plan.updated_schedule().unwrap();
        assert_eq!(updated[59].remaining_balance, Money::from_major(50_000));
        assert_eq!(updated.len(), 110);
        assert!(matches!(plan.events.events()[0], PlanEvent::ScheduleGenerated { .. }));
    }

    #[test]
    fn test_saved_plan_ignores_mismatched_result() {
        let time = test_time();
        let mut plan = LoanPlan::new("House", mortgage(), &time).unwrap();
        plan.set_one_time_payment(1, Money::from_major(10_000), &time).unwrap();

        let other = LoanInputs::new(Money::from_major(50_000), dec!(2), 60);
        let mut saved = plan.to_saved();
        saved.result = Some(generate_amortization_schedule(&other));

        let restored = LoanPlan::from_saved(saved.clone(), &time).unwrap();
        assert_eq!(restored.result().schedule.len(), 360);
        assert_eq!(restored.result(), plan.result());
        assert_eq!(restored.updated_schedule(), plan.updated_schedule());
        assert_eq!(restored.effective_schedule()[0].interest_payment, Money::from_major(1_450));

        // the same snapshot through json
        let json = serde_json::to_string(&saved).unwrap();
        assert!(json.contains("\"result\""));
        let loaded = SavedPlan::from_json(&json).unwrap();
        assert!(loaded.result.is_none());
        let restored = LoanPlan::from_saved(loaded, &time).unwrap();
        assert_eq!(restored.result(), plan.result());
    }

    #[test]
    fn test_one_time_payment_past_payoff_rejected() {
        let time = test_time();
        let inputs = LoanInputs::new(Money::from_major(12_000), dec!(0), 12);
        let mut plan = LoanPlan::new("Car", inputs, &time).unwrap();

        // 1,000 a month plus 5,000 in month 2 clears the loan in month 7
        plan.set_one_time_payment(2, Money::from_major(5_000), &time).unwrap();
        assert_eq!(plan.effective_schedule().len(), 7);

        assert!(matches!(
            plan.set_one_time_payment(9, Money::from_major(500), &time),
            Err(PlannerError::InvalidMonth { month: 9, schedule_len: 7 })
        ));
        assert!(plan.set_one_time_payment(7, Money::from_major(500), &time).is_ok());
        assert_eq!(plan.one_time_payments().len(), 2);
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        assert!(matches!(
            SavedPlan::from_json("{not json"),
            Err(PlannerError::Serialization(_))
        ));
    }
}
