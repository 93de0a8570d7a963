// 💰 Savings Calculators - certificate of deposit and compound interest

use super::{Calculator, MAX_TERM_MONTHS, MAX_TERM_YEARS};
use crate::error::{CalcError, CalcResult};
use crate::export::{fmt2, money, percent, Report};
use crate::finance::{compound_amount, effective_annual_rate, yearly_rows, Accrual, Compounding, PeriodRow};
use crate::validate::{require_non_negative, require_percent, require_positive, require_term};
use serde::{Deserialize, Serialize};

fn yearly_headers() -> Vec<String> {
    ["Year", "Opening", "Deposits", "Interest", "Closing"]
        .iter()
        .map(|h| h.to_string())
        .collect()
}

fn yearly_table(rows: &[PeriodRow]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| {
            vec![
                r.period.to_string(),
                fmt2(r.opening_balance),
                fmt2(r.flow),
                fmt2(r.interest),
                fmt2(r.closing_balance),
            ]
        })
        .collect()
}

// ============================================================================
// CERTIFICATE OF DEPOSIT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdInput {
    pub deposit: f64,
    pub annual_rate_percent: f64,
    #[serde(default)]
    pub compounding: Compounding,
    pub term_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdOutput {
    pub ending_balance: f64,
    pub total_interest: f64,
    pub apy_percent: f64,
    pub compounding: Compounding,
    pub yearly: Vec<PeriodRow>,
}

pub struct CdCalculator;

impl Calculator for CdCalculator {
    const KEY: &'static str = "cd";
    const TITLE: &'static str = "CD Calculator";

    type Input = CdInput;
    type Output = CdOutput;

    fn validate(input: &CdInput) -> CalcResult<()> {
        require_positive("deposit", input.deposit)?;
        require_percent("annual_rate_percent", input.annual_rate_percent)?;
        require_term("term_months", input.term_months, MAX_TERM_MONTHS)?;
        Ok(())
    }

    fn compute(input: &CdInput) -> CalcResult<CdOutput> {
        let rate = input.annual_rate_percent / 100.0;
        let n = input.compounding.periods_per_year();
        let balance_at = |months: u32| compound_amount(input.deposit, rate, n, months as f64 / 12.0);

        // Daily compounding does not divide into months, so each year-end is
        // evaluated in closed form rather than stepped
        let years = (input.term_months + 11) / 12;
        let yearly: Vec<PeriodRow> = (1..=years)
            .map(|year| {
                let opening = balance_at((year - 1) * 12);
                let closing = balance_at((year * 12).min(input.term_months));
                PeriodRow {
                    period: year,
                    opening_balance: opening,
                    interest: closing - opening,
                    flow: 0.0,
                    closing_balance: closing,
                }
            })
            .collect();

        let ending_balance = balance_at(input.term_months);
        Ok(CdOutput {
            ending_balance,
            total_interest: ending_balance - input.deposit,
            apy_percent: effective_annual_rate(rate, n) * 100.0,
            compounding: input.compounding,
            yearly,
        })
    }
}

impl Report for CdOutput {
    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Ending balance".to_string(), money(self.ending_balance)),
            ("Total interest".to_string(), money(self.total_interest)),
            ("APY".to_string(), percent(self.apy_percent)),
            ("Compounding".to_string(), self.compounding.as_str().to_string()),
        ]
    }

    fn headers(&self) -> Vec<String> {
        yearly_headers()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        yearly_table(&self.yearly)
    }
}

// ============================================================================
// COMPOUND INTEREST
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    #[serde(default)]
    pub compounding: Compounding,
    pub years: u32,
    /// Deposited at the end of each compounding period
    #[serde(default)]
    pub contribution_per_period: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundOutput {
    pub ending_balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub yearly: Vec<PeriodRow>,
}

pub struct CompoundCalculator;

impl Calculator for CompoundCalculator {
    const KEY: &'static str = "compound";
    const TITLE: &'static str = "Compound Interest Calculator";

    type Input = CompoundInput;
    type Output = CompoundOutput;

    fn validate(input: &CompoundInput) -> CalcResult<()> {
        require_non_negative("principal", input.principal)?;
        require_percent("annual_rate_percent", input.annual_rate_percent)?;
        require_term("years", input.years, MAX_TERM_YEARS)?;
        require_non_negative("contribution_per_period", input.contribution_per_period)?;
        if input.principal == 0.0 && input.contribution_per_period == 0.0 {
            return Err(CalcError::invalid(
                "principal",
                "enter a starting principal or a contribution",
            ));
        }
        Ok(())
    }

    fn compute(input: &CompoundInput) -> CalcResult<CompoundOutput> {
        let n = input.compounding.periods_per_year();
        let rate = input.annual_rate_percent / 100.0 / n as f64;
        let schedule = Accrual::deposits(input.principal, rate, input.contribution_per_period)
            .run(n * input.years);

        Ok(CompoundOutput {
            ending_balance: schedule.ending_balance,
            total_contributions: input.principal + schedule.total_flow,
            total_interest: schedule.total_interest,
            yearly: yearly_rows(&schedule, n),
        })
    }
}

impl Report for CompoundOutput {
    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Ending balance".to_string(), money(self.ending_balance)),
            ("Total contributions".to_string(), money(self.total_contributions)),
            ("Total interest".to_string(), money(self.total_interest)),
        ]
    }

    fn headers(&self) -> Vec<String> {
        yearly_headers()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        yearly_table(&self.yearly)
    }
}
