// 💳 Credit Card & Debt Payoff Calculators

use super::{Calculator, MAX_TERM_MONTHS};
use crate::error::{CalcError, CalcResult};
use crate::export::{fmt2, money, percent, Report};
use crate::finance::{annuity_payment, payoff, plan_payoff, Accrual, Debt, PayoffPlan, PayoffStrategy, PeriodRow};
use crate::validate::{require_non_negative, require_percent, require_positive, require_term};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// CREDIT CARD
// ============================================================================

/// Supply either a fixed payment or a target number of months, not both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardInput {
    pub balance: f64,
    pub apr_percent: f64,
    #[serde(default)]
    pub monthly_payment: Option<f64>,
    #[serde(default)]
    pub payoff_months: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardOutput {
    pub months: u32,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_paid: f64,
    pub apr_percent: f64,
    pub schedule: Vec<PeriodRow>,
}

pub struct CreditCardCalculator;

impl Calculator for CreditCardCalculator {
    const KEY: &'static str = "credit-card";
    const TITLE: &'static str = "Credit Card Payoff Calculator";

    type Input = CreditCardInput;
    type Output = CreditCardOutput;

    fn validate(input: &CreditCardInput) -> CalcResult<()> {
        require_positive("balance", input.balance)?;
        require_percent("apr_percent", input.apr_percent)?;
        match (input.monthly_payment, input.payoff_months) {
            (Some(_), Some(_)) => Err(CalcError::invalid(
                "monthly_payment",
                "enter either a monthly payment or a payoff time, not both",
            )),
            (None, None) => Err(CalcError::MissingField(
                "monthly_payment or payoff_months".to_string(),
            )),
            (Some(payment), None) => require_positive("monthly_payment", payment).map(|_| ()),
            (None, Some(months)) => require_term("payoff_months", months, MAX_TERM_MONTHS).map(|_| ()),
        }
    }

    fn compute(input: &CreditCardInput) -> CalcResult<CreditCardOutput> {
        let rate = input.apr_percent / 100.0 / 12.0;

        let (payment, schedule) = match (input.monthly_payment, input.payoff_months) {
            (Some(payment), _) => (payment, payoff(input.balance, rate, payment)?),
            (None, Some(months)) => {
                let payment = annuity_payment(input.balance, rate, months);
                (payment, Accrual::payments(input.balance, rate, payment).run(months))
            }
            (None, None) => {
                return Err(CalcError::MissingField(
                    "monthly_payment or payoff_months".to_string(),
                ))
            }
        };

        Ok(CreditCardOutput {
            months: schedule.periods(),
            monthly_payment: payment,
            total_interest: schedule.total_interest,
            total_paid: schedule.total_flow,
            apr_percent: input.apr_percent,
            schedule: schedule.rows,
        })
    }
}

impl Report for CreditCardOutput {
    fn summary(&self) -> Vec<(String, String)> {
        let years = self.months / 12;
        let months = self.months % 12;
        vec![
            ("Monthly payment".to_string(), money(self.monthly_payment)),
            ("Months to pay off".to_string(), self.months.to_string()),
            ("Time to pay off".to_string(), format!("{} years {} months", years, months)),
            ("Total interest".to_string(), money(self.total_interest)),
            ("Total paid".to_string(), money(self.total_paid)),
            ("APR".to_string(), percent(self.apr_percent)),
        ]
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

// ============================================================================
// DEBT PAYOFF (MULTIPLE DEBTS)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoffInput {
    pub debts: Vec<Debt>,
    pub monthly_budget: f64,
    #[serde(default)]
    pub strategy: PayoffStrategy,
}

/// Debts from a CSV with a `name,balance,apr_percent,minimum_payment` header
pub fn load_debts(path: &Path) -> anyhow::Result<Vec<Debt>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open debts CSV {}", path.display()))?;

    let mut debts = Vec::new();
    for result in rdr.deserialize() {
        let debt: Debt = result.context("Failed to deserialize debt")?;
        debts.push(debt);
    }
    Ok(debts)
}

pub struct DebtPayoffCalculator;

impl Calculator for DebtPayoffCalculator {
    const KEY: &'static str = "debt-payoff";
    const TITLE: &'static str = "Debt Payoff Calculator";

    type Input = DebtPayoffInput;
    type Output = PayoffPlan;

    fn validate(input: &DebtPayoffInput) -> CalcResult<()> {
        if input.debts.is_empty() {
            return Err(CalcError::MissingField("debts".to_string()));
        }
        for debt in &input.debts {
            if debt.name.trim().is_empty() {
                return Err(CalcError::invalid("name", "every debt needs a name"));
            }
            require_non_negative("balance", debt.balance)?;
            require_percent("apr_percent", debt.apr_percent)?;
            require_non_negative("minimum_payment", debt.minimum_payment)?;
        }
        require_positive("monthly_budget", input.monthly_budget)?;
        Ok(())
    }

    fn compute(input: &DebtPayoffInput) -> CalcResult<PayoffPlan> {
        plan_payoff(&input.debts, input.monthly_budget, input.strategy)
    }
}

impl Report for PayoffPlan {
    fn summary(&self) -> Vec<(String, String)> {
        let mut lines = vec![
            ("Strategy".to_string(), self.strategy.as_str().to_string()),
            ("Months to debt free".to_string(), self.months.to_string()),
            ("Total interest".to_string(), money(self.total_interest)),
            ("Total paid".to_string(), money(self.total_paid)),
        ];
        for (i, outcome) in self.payoff_order.iter().enumerate() {
            lines.push((
                format!("{}. {}", i + 1, outcome.name),
                format!("month {} ({} interest)", outcome.payoff_month, money(outcome.interest_paid)),
            ));
        }
        lines
    }

    fn headers(&self) -> Vec<String> {
        ["Month", "Paid", "Interest", "Remaining"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.monthly
            .iter()
            .map(|m| {
                vec![
                    m.month.to_string(),
                    fmt2(m.paid),
                    fmt2(m.interest),
                    fmt2(m.remaining_balance),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(payment: Option<f64>, months: Option<u32>) -> CreditCardInput {
        CreditCardInput {
            balance: 5_000.0,
            apr_percent: 18.0,
            monthly_payment: payment,
            payoff_months: months,
        }
    }

    #[test]
    fn test_fixed_payment_payoff() {
        let out = CreditCardCalculator::calculate(&card(Some(200.0), None)).unwrap();
        assert_eq!(out.months, 32);
        assert_eq!(out.schedule.last().unwrap().closing_balance, 0.0);
        assert!((out.total_paid - (5_000.0 + out.total_interest)).abs() < 1e-6);
    }

    #[test]
    fn test_target_months_gives_required_payment() {
        let out = CreditCardCalculator::calculate(&card(None, Some(24))).unwrap();
        assert_eq!(out.months, 24);
        assert!((out.monthly_payment - 249.62).abs() < 0.01);
    }

    #[test]
    fn test_both_or_neither_rejected() {
        let both = CreditCardCalculator::calculate(&card(Some(200.0), Some(24))).unwrap_err();
        assert_eq!(both.field(), Some("monthly_payment"));

        let neither = CreditCardCalculator::calculate(&card(None, None)).unwrap_err();
        assert!(matches!(neither, CalcError::MissingField(_)));
    }

    #[test]
    fn test_payment_under_interest() {
        // 75/month of interest on 5000 at 18%
        let err = CreditCardCalculator::calculate(&card(Some(70.0), None)).unwrap_err();
        assert!(matches!(err, CalcError::PaymentTooLow { .. }));
    }

    #[test]
    fn test_debt_payoff_report() {
        let input = DebtPayoffInput {
            debts: vec![
                Debt {
                    name: "Visa".to_string(),
                    balance: 2_000.0,
                    apr_percent: 20.0,
                    minimum_payment: 50.0,
                },
                Debt {
                    name: "Loan".to_string(),
                    balance: 1_000.0,
                    apr_percent: 6.0,
                    minimum_payment: 40.0,
                },
            ],
            monthly_budget: 400.0,
            strategy: PayoffStrategy::Avalanche,
        };
        let plan = DebtPayoffCalculator::calculate(&input).unwrap();

        assert_eq!(plan.payoff_order[0].name, "Visa");
        assert_eq!(plan.rows().len() as u32, plan.months);
        assert!(plan.summary().iter().any(|(k, _)| k == "1. Visa"));
    }

    #[test]
    fn test_load_debts_csv() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,balance,apr_percent,minimum_payment").unwrap();
        writeln!(file, "Visa, 2000 ,20,50").unwrap();
        writeln!(file, "Loan,1000,6,40").unwrap();
        file.flush().unwrap();

        let debts = load_debts(file.path()).unwrap();
        assert_eq!(debts.len(), 2);
        assert_eq!(debts[0].balance, 2_000.0);
        assert_eq!(debts[1].name, "Loan");
    }

    #[test]
    fn test_debt_validation() {
        let input = DebtPayoffInput {
            debts: vec![Debt {
                name: " ".to_string(),
                balance: 100.0,
                apr_percent: 5.0,
                minimum_payment: 10.0,
            }],
            monthly_budget: 50.0,
            strategy: PayoffStrategy::Snowball,
        };
        assert_eq!(DebtPayoffCalculator::calculate(&input).unwrap_err().field(), Some("name"));
    }
}
