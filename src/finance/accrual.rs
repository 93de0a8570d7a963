// 🔁 Periodic Accrual - the stepper behind every loan/savings widget
//
// balance = balance * (1 + rate) ± flow, period after period.
// Deposits grow a balance for the full count; payments stop once the
// balance reaches zero. Payment loops without a period count are capped at
// MAX_PAYOFF_PERIODS and report PayoffTooLong instead of spinning.

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

/// Iteration cap for open-ended payoff loops (100 years of months)
pub const MAX_PAYOFF_PERIODS: u32 = 1200;

/// Residual below half a cent is folded into the final payment
const BALANCE_EPSILON: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    /// Added after interest (contributions)
    Deposit,
    /// Added before interest, so it earns a period of growth (annuity due)
    DepositDue,
    /// Subtracted after interest (loan payments, payouts)
    Payment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRow {
    pub period: u32,
    pub opening_balance: f64,
    pub interest: f64,
    /// Deposit or payment actually applied this period
    pub flow: f64,
    pub closing_balance: f64,
}

impl PeriodRow {
    /// Part of a payment that reduced the balance
    pub fn principal(&self) -> f64 {
        self.flow - self.interest
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualSchedule {
    pub rows: Vec<PeriodRow>,
    pub total_interest: f64,
    pub total_flow: f64,
    pub ending_balance: f64,
}

impl AccrualSchedule {
    pub fn periods(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn is_paid_off(&self) -> bool {
        self.ending_balance <= BALANCE_EPSILON
    }
}

/// Parameters of one accrual run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accrual {
    pub principal: f64,
    pub rate: f64,
    pub flow_amount: f64,
    pub flow: Flow,
}

impl Accrual {
    pub fn deposits(principal: f64, rate: f64, deposit: f64) -> Self {
        Accrual {
            principal,
            rate,
            flow_amount: deposit,
            flow: Flow::Deposit,
        }
    }

    pub fn deposits_due(principal: f64, rate: f64, deposit: f64) -> Self {
        Accrual {
            principal,
            rate,
            flow_amount: deposit,
            flow: Flow::DepositDue,
        }
    }

    pub fn payments(principal: f64, rate: f64, payment: f64) -> Self {
        Accrual {
            principal,
            rate,
            flow_amount: payment,
            flow: Flow::Payment,
        }
    }

    /// Advance one period from `balance`
    fn step(&self, period: u32, balance: f64) -> PeriodRow {
        let base = match self.flow {
            Flow::DepositDue => balance + self.flow_amount,
            _ => balance,
        };
        let interest = base * self.rate;
        let grown = base + interest;

        let (flow, closing) = match self.flow {
            Flow::Deposit => (self.flow_amount, grown + self.flow_amount),
            Flow::DepositDue => (self.flow_amount, grown),
            Flow::Payment => {
                let mut paid = self.flow_amount.min(grown).max(0.0);
                if grown - paid <= BALANCE_EPSILON {
                    paid = grown;
                }
                (paid, grown - paid)
            }
        };

        PeriodRow {
            period,
            opening_balance: balance,
            interest,
            flow,
            closing_balance: closing,
        }
    }

    /// Run for at most `periods`, stopping early once a payment loop hits zero
    pub fn run(&self, periods: u32) -> AccrualSchedule {
        let mut rows = Vec::with_capacity(periods as usize);
        let mut balance = self.principal.max(0.0);

        for period in 1..=periods {
            if self.flow == Flow::Payment && balance <= 0.0 {
                break;
            }
            let row = self.step(period, balance);
            balance = row.closing_balance;
            rows.push(row);
        }

        summarize(rows, balance)
    }

    /// Run a payment loop until the balance is zero, capped at `max_periods`
    pub fn payoff(&self, max_periods: u32) -> CalcResult<AccrualSchedule> {
        if self.flow != Flow::Payment {
            return Err(CalcError::MalformedInput(
                "payoff requires a payment flow".to_string(),
            ));
        }

        let first_interest = self.principal * self.rate;
        if self.principal > 0.0 && self.flow_amount <= first_interest {
            return Err(CalcError::PaymentTooLow {
                payment: self.flow_amount,
                interest: first_interest,
            });
        }

        let schedule = self.run(max_periods);
        if !schedule.is_paid_off() {
            return Err(CalcError::PayoffTooLong { max_periods });
        }
        Ok(schedule)
    }
}

fn summarize(rows: Vec<PeriodRow>, ending_balance: f64) -> AccrualSchedule {
    let total_interest = rows.iter().map(|r| r.interest).sum();
    let total_flow = rows.iter().map(|r| r.flow).sum();
    AccrualSchedule {
        rows,
        total_interest,
        total_flow,
        ending_balance,
    }
}

/// Standard payoff with the default cap
pub fn payoff(principal: f64, rate: f64, payment: f64) -> CalcResult<AccrualSchedule> {
    Accrual::payments(principal, rate, payment).payoff(MAX_PAYOFF_PERIODS)
}

/// Collapse period rows into per-year rows (`periods_per_year` rows each)
pub fn yearly_rows(schedule: &AccrualSchedule, periods_per_year: u32) -> Vec<PeriodRow> {
    let per_year = periods_per_year.max(1) as usize;
    schedule
        .rows
        .chunks(per_year)
        .enumerate()
        .map(|(i, chunk)| {
            let first = &chunk[0];
            let last = &chunk[chunk.len() - 1];
            PeriodRow {
                period: i as u32 + 1,
                opening_balance: first.opening_balance,
                interest: chunk.iter().map(|r| r.interest).sum(),
                flow: chunk.iter().map(|r| r.flow).sum(),
                closing_balance: last.closing_balance,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::formulas::{annuity_payment, compound_amount};
    use proptest::prelude::*;

    #[test]
    fn test_closed_form_compound_example() {
        // 10000 at 6% compounded monthly for 12 months
        let schedule = Accrual::deposits(10_000.0, 0.06 / 12.0, 0.0).run(12);
        let expected = compound_amount(10_000.0, 0.06, 12, 1.0);

        assert_eq!(schedule.periods(), 12);
        assert!((schedule.ending_balance - expected).abs() < 1e-6);
        assert!((schedule.ending_balance - 10_616.78).abs() < 0.005);
        assert!((schedule.total_interest - 616.78).abs() < 0.005);
    }

    #[test]
    fn test_annuity_payment_pays_off_exactly() {
        let rate = 0.05 / 12.0;
        let pmt = annuity_payment(20_000.0, rate, 48);
        let schedule = payoff(20_000.0, rate, pmt).unwrap();

        assert_eq!(schedule.periods(), 48);
        assert_eq!(schedule.ending_balance, 0.0);
        assert!((schedule.total_flow - (20_000.0 + schedule.total_interest)).abs() < 1e-6);
    }

    #[test]
    fn test_final_payment_is_truncated() {
        let schedule = payoff(250.0, 0.0, 100.0).unwrap();
        assert_eq!(schedule.periods(), 3);
        assert_eq!(schedule.rows[2].flow, 50.0);
        assert_eq!(schedule.total_flow, 250.0);
    }

    #[test]
    fn test_payment_below_interest_is_rejected() {
        let err = payoff(10_000.0, 0.02, 150.0).unwrap_err();
        assert!(matches!(err, CalcError::PaymentTooLow { .. }));
    }

    #[test]
    fn test_cap_reports_payoff_too_long() {
        // Barely above interest: would take far longer than 1200 months
        let err = payoff(100_000.0, 0.01, 1000.0001).unwrap_err();
        assert_eq!(err, CalcError::PayoffTooLong { max_periods: MAX_PAYOFF_PERIODS });
    }

    #[test]
    fn test_zero_principal_is_already_paid() {
        let schedule = payoff(0.0, 0.01, 10.0).unwrap();
        assert_eq!(schedule.periods(), 0);
        assert!(schedule.is_paid_off());
    }

    #[test]
    fn test_deposit_due_earns_an_extra_period() {
        let ordinary = Accrual::deposits(0.0, 0.05, 1_000.0).run(10);
        let due = Accrual::deposits_due(0.0, 0.05, 1_000.0).run(10);
        assert!((due.ending_balance - ordinary.ending_balance * 1.05).abs() < 1e-6);
        assert_eq!(due.total_flow, 10_000.0);
    }

    #[test]
    fn test_yearly_rows_sum_periods() {
        let schedule = Accrual::deposits(1_000.0, 0.01, 10.0).run(24);
        let years = yearly_rows(&schedule, 12);

        assert_eq!(years.len(), 2);
        assert_eq!(years[0].opening_balance, 1_000.0);
        assert_eq!(years[1].closing_balance, schedule.ending_balance);
        assert!((years[0].flow - 120.0).abs() < 1e-9);
        let interest: f64 = years.iter().map(|y| y.interest).sum();
        assert!((interest - schedule.total_interest).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_payoff_terminates_at_zero(
            principal in 100.0f64..500_000.0,
            annual_rate in 0.0f64..0.30,
            months in 1u32..360,
            bump in 0.0f64..500.0,
        ) {
            let rate = annual_rate / 12.0;
            let payment = annuity_payment(principal, rate, months) + bump;
            let schedule = payoff(principal, rate, payment).unwrap();

            prop_assert!(schedule.periods() <= months);
            prop_assert_eq!(schedule.ending_balance, 0.0);
            let tol = 1e-6 * principal.max(1.0);
            prop_assert!((schedule.total_flow - (principal + schedule.total_interest)).abs() <= tol);
        }

        #[test]
        fn prop_growth_is_non_decreasing(
            principal in 0.0f64..1_000_000.0,
            annual_rate in 0.0f64..0.25,
            deposit in 0.0f64..5_000.0,
            periods in 1u32..600,
        ) {
            let schedule = Accrual::deposits(principal, annual_rate / 12.0, deposit).run(periods);
            let mut previous = principal;
            for row in &schedule.rows {
                prop_assert!(row.closing_balance >= previous);
                previous = row.closing_balance;
            }
        }
    }
}
