// 🏦 Loan Calculator - level payment, amortization schedule, extra payments

use super::{Calculator, MAX_TERM_MONTHS};
use crate::error::CalcResult;
use crate::export::{fmt2, money, percent, Report};
use crate::finance::{annuity_payment, payoff, Accrual, PeriodRow};
use crate::validate::{require_non_negative, require_percent, require_positive, require_term};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub amount: f64,
    pub annual_rate_percent: f64,
    pub term_months: u32,
    /// Paid on top of the scheduled payment every month
    #[serde(default)]
    pub extra_payment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOutput {
    pub monthly_payment: f64,
    /// Scheduled payment plus the extra
    pub actual_payment: f64,
    pub months: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub months_saved: u32,
    pub interest_saved: f64,
    pub annual_rate_percent: f64,
    pub schedule: Vec<PeriodRow>,
}

pub struct LoanCalculator;

impl Calculator for LoanCalculator {
    const KEY: &'static str = "loan";
    const TITLE: &'static str = "Loan Calculator";

    type Input = LoanInput;
    type Output = LoanOutput;

    fn validate(input: &LoanInput) -> CalcResult<()> {
        require_positive("amount", input.amount)?;
        require_percent("annual_rate_percent", input.annual_rate_percent)?;
        require_term("term_months", input.term_months, MAX_TERM_MONTHS)?;
        require_non_negative("extra_payment", input.extra_payment)?;
        Ok(())
    }

    fn compute(input: &LoanInput) -> CalcResult<LoanOutput> {
        let rate = input.annual_rate_percent / 100.0 / 12.0;
        let payment = annuity_payment(input.amount, rate, input.term_months);
        let scheduled = Accrual::payments(input.amount, rate, payment).run(input.term_months);

        let schedule = if input.extra_payment > 0.0 {
            payoff(input.amount, rate, payment + input.extra_payment)?
        } else {
            scheduled.clone()
        };

        Ok(LoanOutput {
            monthly_payment: payment,
            actual_payment: payment + input.extra_payment,
            months: schedule.periods(),
            total_interest: schedule.total_interest,
            total_paid: schedule.total_flow,
            months_saved: scheduled.periods().saturating_sub(schedule.periods()),
            interest_saved: (scheduled.total_interest - schedule.total_interest).max(0.0),
            annual_rate_percent: input.annual_rate_percent,
            schedule: schedule.rows,
        })
    }
}

impl Report for LoanOutput {
    fn summary(&self) -> Vec<(String, String)> {
        let mut lines = vec![
            ("Monthly payment".to_string(), money(self.monthly_payment)),
            ("Interest rate".to_string(), percent(self.annual_rate_percent)),
            ("Number of payments".to_string(), self.months.to_string()),
            ("Total interest".to_string(), money(self.total_interest)),
            ("Total paid".to_string(), money(self.total_paid)),
        ];
        if self.actual_payment > self.monthly_payment {
            lines.push(("Payment with extra".to_string(), money(self.actual_payment)));
            lines.push(("Months saved".to_string(), self.months_saved.to_string()));
            lines.push(("Interest saved".to_string(), money(self.interest_saved)));
        }
        lines
    }

    fn headers(&self) -> Vec<String> {
        ["Month", "Payment", "Principal", "Interest", "Balance"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.schedule
            .iter()
            .map(|r| {
                vec![
                    r.period.to_string(),
                    fmt2(r.flow),
                    fmt2(r.principal()),
                    fmt2(r.interest),
                    fmt2(r.closing_balance),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;

    fn input(extra: f64) -> LoanInput {
        LoanInput {
            amount: 200_000.0,
            annual_rate_percent: 6.0,
            term_months: 360,
            extra_payment: extra,
        }
    }

    #[test]
    fn test_thirty_year_loan() {
        let out = LoanCalculator::calculate(&input(0.0)).unwrap();
        assert!((out.monthly_payment - 1199.10).abs() < 0.01);
        assert_eq!(out.months, 360);
        assert_eq!(out.schedule.last().unwrap().closing_balance, 0.0);
        assert!((out.total_paid - (200_000.0 + out.total_interest)).abs() < 1e-6);
        assert_eq!(out.months_saved, 0);
    }

    #[test]
    fn test_extra_payment_shortens_loan() {
        let base = LoanCalculator::calculate(&input(0.0)).unwrap();
        let extra = LoanCalculator::calculate(&input(200.0)).unwrap();

        assert!(extra.months < base.months);
        assert_eq!(extra.months_saved, base.months - extra.months);
        assert!(extra.total_interest < base.total_interest);
        assert!((extra.interest_saved - (base.total_interest - extra.total_interest)).abs() < 1e-6);
    }

    #[test]
    fn test_validation() {
        let mut bad = input(0.0);
        bad.amount = 0.0;
        assert_eq!(LoanCalculator::calculate(&bad).unwrap_err().field(), Some("amount"));

        let mut bad = input(0.0);
        bad.term_months = 0;
        assert_eq!(LoanCalculator::calculate(&bad).unwrap_err().field(), Some("term_months"));

        let mut bad = input(-1.0);
        bad.extra_payment = -1.0;
        assert!(matches!(
            LoanCalculator::calculate(&bad),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_report_projection() {
        let out = LoanCalculator::calculate(&LoanInput {
            amount: 1_200.0,
            annual_rate_percent: 0.0,
            term_months: 12,
            extra_payment: 0.0,
        })
        .unwrap();

        let rows = out.rows();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0], vec!["1", "100.00", "100.00", "0.00", "1100.00"]);
        assert_eq!(rows[11][4], "0.00");
        assert_eq!(out.summary()[0], ("Monthly payment".to_string(), "$100.00".to_string()));
    }
}
