// Financial math shared by every loan/savings calculator

pub mod accrual;
pub mod formulas;
pub mod payoff;

pub use accrual::{payoff, yearly_rows, Accrual, AccrualSchedule, Flow, PeriodRow, MAX_PAYOFF_PERIODS};
pub use formulas::{
    annuity_payment, apr_to_money_factor, compound_amount, effective_annual_rate, future_value,
    money_factor_to_apr, present_value_of_annuity, Compounding,
};
pub use payoff::{plan_payoff, Debt, DebtOutcome, PayoffMonth, PayoffPlan, PayoffStrategy};
