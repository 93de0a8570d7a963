// 💳 Debt Payoff Strategies - avalanche / snowball
//
// One monthly budget spread across several debts. Every open debt accrues a
// month of interest and receives its minimum; whatever is left of the budget
// goes to open debts in strategy order. When a debt closes its minimum stays
// in the budget and rolls to the next target.

use crate::error::{CalcError, CalcResult};
use crate::finance::accrual::MAX_PAYOFF_PERIODS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub name: String,
    pub balance: f64,
    pub apr_percent: f64,
    pub minimum_payment: f64,
}

impl Debt {
    pub fn monthly_rate(&self) -> f64 {
        self.apr_percent / 100.0 / 12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffStrategy {
    /// Highest APR first (least interest)
    Avalanche,
    /// Smallest balance first (fastest first win)
    Snowball,
}

impl PayoffStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoffStrategy::Avalanche => "avalanche",
            PayoffStrategy::Snowball => "snowball",
        }
    }
}

impl Default for PayoffStrategy {
    fn default() -> Self {
        PayoffStrategy::Avalanche
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffMonth {
    pub month: u32,
    pub interest: f64,
    pub paid: f64,
    pub remaining_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtOutcome {
    pub name: String,
    pub payoff_month: u32,
    pub interest_paid: f64,
    pub total_paid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffPlan {
    pub strategy: PayoffStrategy,
    pub months: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    /// Debts in the order they were retired
    pub payoff_order: Vec<DebtOutcome>,
    pub monthly: Vec<PayoffMonth>,
}

struct OpenDebt {
    debt: Debt,
    balance: f64,
    interest_paid: f64,
    total_paid: f64,
    payoff_month: Option<u32>,
}

impl OpenDebt {
    fn is_open(&self) -> bool {
        self.balance > 0.0
    }

    fn pay(&mut self, amount: f64) -> f64 {
        let paid = amount.min(self.balance).max(0.0);
        self.balance -= paid;
        self.total_paid += paid;
        paid
    }
}

/// Order open debt indices by strategy priority
fn target_order(debts: &[OpenDebt], strategy: PayoffStrategy) -> Vec<usize> {
    let mut order: Vec<usize> = (0..debts.len()).filter(|&i| debts[i].is_open()).collect();
    order.sort_by(|&a, &b| {
        let (da, db) = (&debts[a], &debts[b]);
        match strategy {
            PayoffStrategy::Avalanche => db
                .debt
                .apr_percent
                .total_cmp(&da.debt.apr_percent)
                .then(da.balance.total_cmp(&db.balance)),
            PayoffStrategy::Snowball => da
                .balance
                .total_cmp(&db.balance)
                .then(db.debt.apr_percent.total_cmp(&da.debt.apr_percent)),
        }
    });
    order
}

/// Simulate the payoff of `debts` under `monthly_budget`
pub fn plan_payoff(
    debts: &[Debt],
    monthly_budget: f64,
    strategy: PayoffStrategy,
) -> CalcResult<PayoffPlan> {
    if debts.is_empty() {
        return Err(CalcError::MissingField("debts".to_string()));
    }

    let minimums: f64 = debts.iter().map(|d| d.minimum_payment).sum();
    if monthly_budget < minimums {
        return Err(CalcError::invalid(
            "monthly_budget",
            format!("must cover the minimum payments of {:.2}", minimums),
        ));
    }

    let first_interest: f64 = debts.iter().map(|d| d.balance * d.monthly_rate()).sum();
    if monthly_budget <= first_interest {
        return Err(CalcError::PaymentTooLow {
            payment: monthly_budget,
            interest: first_interest,
        });
    }

    let mut open: Vec<OpenDebt> = debts
        .iter()
        .map(|d| OpenDebt {
            debt: d.clone(),
            balance: d.balance.max(0.0),
            interest_paid: 0.0,
            total_paid: 0.0,
            payoff_month: if d.balance > 0.0 { None } else { Some(0) },
        })
        .collect();

    let mut monthly = Vec::new();
    let mut month = 0;

    while open.iter().any(|d| d.is_open()) {
        if month == MAX_PAYOFF_PERIODS {
            return Err(CalcError::PayoffTooLong {
                max_periods: MAX_PAYOFF_PERIODS,
            });
        }
        month += 1;

        let mut interest = 0.0;
        for d in open.iter_mut().filter(|d| d.is_open()) {
            let accrued = d.balance * d.debt.monthly_rate();
            d.balance += accrued;
            d.interest_paid += accrued;
            interest += accrued;
        }

        let mut remaining = monthly_budget;
        for d in open.iter_mut().filter(|d| d.is_open()) {
            remaining -= d.pay(d.debt.minimum_payment.min(remaining));
        }

        for i in target_order(&open, strategy) {
            if remaining <= 0.0 {
                break;
            }
            remaining -= open[i].pay(remaining);
        }

        for d in open.iter_mut() {
            if d.payoff_month.is_none() && !d.is_open() {
                d.payoff_month = Some(month);
            }
        }

        monthly.push(PayoffMonth {
            month,
            interest,
            paid: monthly_budget - remaining,
            remaining_balance: open.iter().map(|d| d.balance).sum(),
        });
    }

    let mut payoff_order: Vec<(usize, DebtOutcome)> = open
        .into_iter()
        .enumerate()
        .map(|(i, d)| {
            (
                i,
                DebtOutcome {
                    name: d.debt.name,
                    payoff_month: d.payoff_month.unwrap_or(month),
                    interest_paid: d.interest_paid,
                    total_paid: d.total_paid,
                },
            )
        })
        .collect();
    payoff_order.sort_by_key(|(i, outcome)| (outcome.payoff_month, *i));

    let total_interest = monthly.iter().map(|m| m.interest).sum();
    let total_paid = monthly.iter().map(|m| m.paid).sum();

    Ok(PayoffPlan {
        strategy,
        months: month,
        total_interest,
        total_paid,
        payoff_order: payoff_order.into_iter().map(|(_, o)| o).collect(),
        monthly,
    })
}
