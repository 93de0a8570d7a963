// 🚗 Lease Calculator - depreciation + finance fee, money factor ↔ APR

use super::Calculator;
use crate::error::{CalcError, CalcResult};
use crate::export::{money, percent, Report};
use crate::finance::{apr_to_money_factor, money_factor_to_apr};
use crate::validate::{require_non_negative, require_percent, require_positive, require_range, require_term};
use serde::{Deserialize, Serialize};

const MAX_LEASE_MONTHS: u32 = 120;

/// Financing charge, entered either way
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LeaseRate {
    MoneyFactor(f64),
    /// Percent
    Apr(f64),
}

impl LeaseRate {
    pub fn money_factor(&self) -> f64 {
        match *self {
            LeaseRate::MoneyFactor(mf) => mf,
            LeaseRate::Apr(apr) => apr_to_money_factor(apr),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseInput {
    pub vehicle_price: f64,
    #[serde(default)]
    pub down_payment: f64,
    #[serde(default)]
    pub trade_in: f64,
    pub residual_value: f64,
    pub rate: LeaseRate,
    pub term_months: u32,
    #[serde(default)]
    pub sales_tax_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseOutput {
    pub adjusted_cap_cost: f64,
    pub depreciation_fee: f64,
    pub finance_fee: f64,
    pub base_payment: f64,
    pub monthly_tax: f64,
    pub monthly_payment: f64,
    pub total_of_payments: f64,
    /// Payments plus everything paid up front
    pub total_cost: f64,
    pub money_factor: f64,
    pub apr_percent: f64,
    pub term_months: u32,
}

pub struct LeaseCalculator;

impl Calculator for LeaseCalculator {
    const KEY: &'static str = "lease";
    const TITLE: &'static str = "Lease Calculator";

    type Input = LeaseInput;
    type Output = LeaseOutput;

    fn validate(input: &LeaseInput) -> CalcResult<()> {
        require_positive("vehicle_price", input.vehicle_price)?;
        require_non_negative("down_payment", input.down_payment)?;
        require_non_negative("trade_in", input.trade_in)?;
        require_positive("residual_value", input.residual_value)?;
        if input.residual_value >= input.vehicle_price {
            return Err(CalcError::invalid(
                "residual_value",
                "must be less than the vehicle price",
            ));
        }
        match input.rate {
            LeaseRate::MoneyFactor(mf) => {
                require_range("money_factor", mf, 0.0, apr_to_money_factor(100.0))?;
            }
            LeaseRate::Apr(apr) => {
                require_percent("apr", apr)?;
            }
        }
        require_term("term_months", input.term_months, MAX_LEASE_MONTHS)?;
        require_percent("sales_tax_percent", input.sales_tax_percent)?;

        let adjusted = input.vehicle_price - input.down_payment - input.trade_in;
        if adjusted <= input.residual_value {
            return Err(CalcError::invalid(
                "down_payment",
                "down payment and trade-in leave less than the residual value to finance",
            ));
        }
        Ok(())
    }

    fn compute(input: &LeaseInput) -> CalcResult<LeaseOutput> {
        let months = input.term_months as f64;
        let mf = input.rate.money_factor();

        let adjusted_cap_cost = input.vehicle_price - input.down_payment - input.trade_in;
        let depreciation_fee = (adjusted_cap_cost - input.residual_value) / months;
        let finance_fee = (adjusted_cap_cost + input.residual_value) * mf;
        let base_payment = depreciation_fee + finance_fee;
        let monthly_tax = base_payment * input.sales_tax_percent / 100.0;
        let monthly_payment = base_payment + monthly_tax;
        let total_of_payments = monthly_payment * months;

        Ok(LeaseOutput {
            adjusted_cap_cost,
            depreciation_fee,
            finance_fee,
            base_payment,
            monthly_tax,
            monthly_payment,
            total_of_payments,
            total_cost: total_of_payments + input.down_payment + input.trade_in,
            money_factor: mf,
            apr_percent: money_factor_to_apr(mf),
            term_months: input.term_months,
        })
    }
}

impl Report for LeaseOutput {
    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Monthly payment".to_string(), money(self.monthly_payment)),
            ("Depreciation fee".to_string(), money(self.depreciation_fee)),
            ("Finance fee".to_string(), money(self.finance_fee)),
            ("Monthly tax".to_string(), money(self.monthly_tax)),
            ("Adjusted cap cost".to_string(), money(self.adjusted_cap_cost)),
            ("Total of payments".to_string(), money(self.total_of_payments)),
            ("Total lease cost".to_string(), money(self.total_cost)),
            ("Money factor".to_string(), format!("{:.5}", self.money_factor)),
            ("Equivalent APR".to_string(), percent(self.apr_percent)),
            ("Term".to_string(), format!("{} months", self.term_months)),
        ]
    }
}
