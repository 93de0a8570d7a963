// 🏖️ Retirement Calculators - IRA growth, annuity accumulation, annuity payout

use super::{Calculator, MAX_TERM_YEARS};
use crate::error::{CalcError, CalcResult};
use crate::export::{fmt2, money, Report};
use crate::finance::{annuity_payment, Accrual, PeriodRow};
use crate::validate::{require_non_negative, require_percent, require_positive, require_term};
use serde::{Deserialize, Serialize};

const MAX_AGE: u32 = 120;

// ============================================================================
// IRA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IraAccount {
    /// Withdrawals taxed at retirement
    Traditional,
    /// Withdrawals tax free
    Roth,
}

impl Default for IraAccount {
    fn default() -> Self {
        IraAccount::Traditional
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IraInput {
    pub current_age: u32,
    pub retirement_age: u32,
    #[serde(default)]
    pub current_balance: f64,
    pub annual_contribution: f64,
    pub annual_return_percent: f64,
    #[serde(default)]
    pub account: IraAccount,
    #[serde(default)]
    pub retirement_tax_rate_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IraOutput {
    pub years: u32,
    pub balance_at_retirement: f64,
    pub total_contributions: f64,
    pub total_growth: f64,
    pub after_tax_balance: f64,
    pub account: IraAccount,
    pub start_age: u32,
    pub yearly: Vec<PeriodRow>,
}

pub struct IraCalculator;

impl Calculator for IraCalculator {
    const KEY: &'static str = "ira";
    const TITLE: &'static str = "IRA Calculator";

    type Input = IraInput;
    type Output = IraOutput;

    fn validate(input: &IraInput) -> CalcResult<()> {
        if input.current_age > MAX_AGE {
            return Err(CalcError::invalid("current_age", format!("cannot exceed {}", MAX_AGE)));
        }
        if input.retirement_age <= input.current_age || input.retirement_age > MAX_AGE {
            return Err(CalcError::invalid(
                "retirement_age",
                format!("must be after the current age and at most {}", MAX_AGE),
            ));
        }
        require_non_negative("current_balance", input.current_balance)?;
        require_non_negative("annual_contribution", input.annual_contribution)?;
        require_percent("annual_return_percent", input.annual_return_percent)?;
        require_percent("retirement_tax_rate_percent", input.retirement_tax_rate_percent)?;
        Ok(())
    }

    fn compute(input: &IraInput) -> CalcResult<IraOutput> {
        let years = input.retirement_age - input.current_age;
        let rate = input.annual_return_percent / 100.0;
        let schedule = Accrual::deposits(input.current_balance, rate, input.annual_contribution).run(years);

        let balance = schedule.ending_balance;
        let after_tax_balance = match input.account {
            IraAccount::Traditional => balance * (1.0 - input.retirement_tax_rate_percent / 100.0),
            IraAccount::Roth => balance,
        };

        Ok(IraOutput {
            years,
            balance_at_retirement: balance,
            total_contributions: input.current_balance + schedule.total_flow,
            total_growth: schedule.total_interest,
            after_tax_balance,
            account: input.account,
            start_age: input.current_age,
            yearly: schedule.rows,
        })
    }
}

impl Report for IraOutput {
    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Balance at retirement".to_string(), money(self.balance_at_retirement)),
            ("After-tax balance".to_string(), money(self.after_tax_balance)),
            ("Total contributions".to_string(), money(self.total_contributions)),
            ("Total growth".to_string(), money(self.total_growth)),
            ("Years of saving".to_string(), self.years.to_string()),
        ]
    }

    fn headers(&self) -> Vec<String> {
        ["Age", "Opening", "Contribution", "Growth", "Closing"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.yearly
            .iter()
            .map(|r| {
                vec![
                    (self.start_age + r.period).to_string(),
                    fmt2(r.opening_balance),
                    fmt2(r.flow),
                    fmt2(r.interest),
                    fmt2(r.closing_balance),
                ]
            })
            .collect()
    }
}

// ============================================================================
// ANNUITY (ACCUMULATION)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnuityInput {
    #[serde(default)]
    pub principal: f64,
    #[serde(default)]
    pub annual_addition: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
    /// Additions at the start of each year (annuity due)
    #[serde(default)]
    pub additions_at_start: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnuityOutput {
    pub ending_balance: f64,
    pub total_additions: f64,
    pub total_growth: f64,
    pub yearly: Vec<PeriodRow>,
}

pub struct AnnuityCalculator;

impl Calculator for AnnuityCalculator {
    const KEY: &'static str = "annuity";
    const TITLE: &'static str = "Annuity Calculator";

    type Input = AnnuityInput;
    type Output = AnnuityOutput;

    fn validate(input: &AnnuityInput) -> CalcResult<()> {
        require_non_negative("principal", input.principal)?;
        require_non_negative("annual_addition", input.annual_addition)?;
        require_percent("annual_rate_percent", input.annual_rate_percent)?;
        require_term("years", input.years, MAX_TERM_YEARS)?;
        if input.principal == 0.0 && input.annual_addition == 0.0 {
            return Err(CalcError::invalid(
                "principal",
                "enter a starting principal or an annual addition",
            ));
        }
        Ok(())
    }

    fn compute(input: &AnnuityInput) -> CalcResult<AnnuityOutput> {
        let rate = input.annual_rate_percent / 100.0;
        let accrual = if input.additions_at_start {
            Accrual::deposits_due(input.principal, rate, input.annual_addition)
        } else {
            Accrual::deposits(input.principal, rate, input.annual_addition)
        };
        let schedule = accrual.run(input.years);

        Ok(AnnuityOutput {
            ending_balance: schedule.ending_balance,
            total_additions: schedule.total_flow,
            total_growth: schedule.total_interest,
            yearly: schedule.rows,
        })
    }
}

impl Report for AnnuityOutput {
    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Ending balance".to_string(), money(self.ending_balance)),
            ("Total additions".to_string(), money(self.total_additions)),
            ("Total growth".to_string(), money(self.total_growth)),
        ]
    }

    fn headers(&self) -> Vec<String> {
        ["Year", "Opening", "Addition", "Growth", "Closing"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.yearly
            .iter()
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
}

// ============================================================================
// ANNUITY PAYOUT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnuityPayoutInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
    #[serde(default = "default_payments_per_year")]
    pub payments_per_year: u32,
}

fn default_payments_per_year() -> u32 {
    12
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnuityPayoutOutput {
    pub payout_per_period: f64,
    pub payments: u32,
    pub total_payout: f64,
    pub total_growth: f64,
    pub schedule: Vec<PeriodRow>,
}

pub struct AnnuityPayoutCalculator;

impl Calculator for AnnuityPayoutCalculator {
    const KEY: &'static str = "annuity-payout";
    const TITLE: &'static str = "Annuity Payout Calculator";

    type Input = AnnuityPayoutInput;
    type Output = AnnuityPayoutOutput;

    fn validate(input: &AnnuityPayoutInput) -> CalcResult<()> {
        require_positive("principal", input.principal)?;
        require_percent("annual_rate_percent", input.annual_rate_percent)?;
        require_term("years", input.years, MAX_TERM_YEARS)?;
        if ![1, 2, 4, 12].contains(&input.payments_per_year) {
            return Err(CalcError::invalid(
                "payments_per_year",
                "must be 1, 2, 4 or 12",
            ));
        }
        Ok(())
    }

    fn compute(input: &AnnuityPayoutInput) -> CalcResult<AnnuityPayoutOutput> {
        let rate = input.annual_rate_percent / 100.0 / input.payments_per_year as f64;
        let periods = input.years * input.payments_per_year;
        let payout = annuity_payment(input.principal, rate, periods);
        let schedule = Accrual::payments(input.principal, rate, payout).run(periods);

        Ok(AnnuityPayoutOutput {
            payout_per_period: payout,
            payments: schedule.periods(),
            total_payout: schedule.total_flow,
            total_growth: schedule.total_interest,
            schedule: schedule.rows,
        })
    }
}

impl Report for AnnuityPayoutOutput {
    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Payout per period".to_string(), money(self.payout_per_period)),
            ("Number of payouts".to_string(), self.payments.to_string()),
            ("Total payout".to_string(), money(self.total_payout)),
            ("Total growth".to_string(), money(self.total_growth)),
        ]
    }

    fn headers(&self) -> Vec<String> {
        ["Period", "Opening", "Growth", "Payout", "Closing"]
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
                    fmt2(r.opening_balance),
                    fmt2(r.interest),
                    fmt2(r.flow),
                    fmt2(r.closing_balance),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::future_value;

    fn ira(account: IraAccount) -> IraInput {
        IraInput {
            current_age: 30,
            retirement_age: 65,
            current_balance: 10_000.0,
            annual_contribution: 6_000.0,
            annual_return_percent: 7.0,
            account,
            retirement_tax_rate_percent: 20.0,
        }
    }

    #[test]
    fn test_ira_growth_matches_future_value() {
        let out = IraCalculator::calculate(&ira(IraAccount::Traditional)).unwrap();
        let expected = future_value(10_000.0, 0.07, 35, 6_000.0);

        assert_eq!(out.years, 35);
        assert!((out.balance_at_retirement - expected).abs() < 1e-6);
        assert_eq!(out.total_contributions, 10_000.0 + 35.0 * 6_000.0);
        assert!((out.after_tax_balance - expected * 0.8).abs() < 1e-6);
        assert_eq!(out.rows()[0][0], "31");
        assert_eq!(out.rows().last().unwrap()[0], "65");
    }

    #[test]
    fn test_roth_is_untaxed() {
        let out = IraCalculator::calculate(&ira(IraAccount::Roth)).unwrap();
        assert_eq!(out.after_tax_balance, out.balance_at_retirement);
    }

    #[test]
    fn test_ira_age_order() {
        let mut bad = ira(IraAccount::Roth);
        bad.retirement_age = 30;
        assert_eq!(IraCalculator::calculate(&bad).unwrap_err().field(), Some("retirement_age"));
    }

    #[test]
    fn test_annuity_due_beats_ordinary() {
        let mut input = AnnuityInput {
            principal: 20_000.0,
            annual_addition: 5_000.0,
            annual_rate_percent: 6.0,
            years: 10,
            additions_at_start: false,
        };
        let ordinary = AnnuityCalculator::calculate(&input).unwrap();
        input.additions_at_start = true;
        let due = AnnuityCalculator::calculate(&input).unwrap();

        assert!(due.ending_balance > ordinary.ending_balance);
        assert_eq!(due.total_additions, 50_000.0);
        assert!((ordinary.ending_balance - future_value(20_000.0, 0.06, 10, 5_000.0)).abs() < 1e-6);
    }

    #[test]
    fn test_payout_exhausts_principal() {
        let out = AnnuityPayoutCalculator::calculate(&AnnuityPayoutInput {
            principal: 250_000.0,
            annual_rate_percent: 5.0,
            years: 20,
            payments_per_year: 12,
        })
        .unwrap();

        assert!((out.payout_per_period - 1649.89).abs() < 0.01);
        assert_eq!(out.payments, 240);
        assert_eq!(out.schedule.last().unwrap().closing_balance, 0.0);
        assert!((out.total_payout - (250_000.0 + out.total_growth)).abs() < 1e-6);
    }

    #[test]
    fn test_payout_frequency_validation() {
        let err = AnnuityPayoutCalculator::calculate(&AnnuityPayoutInput {
            principal: 1_000.0,
            annual_rate_percent: 5.0,
            years: 5,
            payments_per_year: 3,
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("payments_per_year"));
    }
}
