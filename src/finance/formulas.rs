// Closed-form time-value-of-money helpers.
// Rates here are per period and fractional (0.005 = 0.5%), never percent.

use serde::{Deserialize, Serialize};

/// Money factor ↔ APR conversion constant
pub const MONEY_FACTOR_TO_APR: f64 = 2400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compounding {
    Annually,
    SemiAnnually,
    Quarterly,
    Monthly,
    Daily,
}

impl Compounding {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Compounding::Annually => 1,
            Compounding::SemiAnnually => 2,
            Compounding::Quarterly => 4,
            Compounding::Monthly => 12,
            Compounding::Daily => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Compounding::Annually => "annually",
            Compounding::SemiAnnually => "semi-annually",
            Compounding::Quarterly => "quarterly",
            Compounding::Monthly => "monthly",
            Compounding::Daily => "daily",
        }
    }
}

impl Default for Compounding {
    fn default() -> Self {
        Compounding::Monthly
    }
}

/// Level payment that retires `principal` in `periods` payments
pub fn annuity_payment(principal: f64, rate: f64, periods: u32) -> f64 {
    if periods == 0 {
        return principal;
    }
    let n = periods as f64;
    if rate == 0.0 {
        return principal / n;
    }
    let growth = (1.0 + rate).powf(n);
    principal * rate * growth / (growth - 1.0)
}

/// Future value of a present amount plus end-of-period deposits
pub fn future_value(present: f64, rate: f64, periods: u32, deposit: f64) -> f64 {
    let n = periods as f64;
    if rate == 0.0 {
        return present + deposit * n;
    }
    let growth = (1.0 + rate).powf(n);
    present * growth + deposit * (growth - 1.0) / rate
}

/// Present value of `periods` level payments
pub fn present_value_of_annuity(payment: f64, rate: f64, periods: u32) -> f64 {
    let n = periods as f64;
    if rate == 0.0 {
        return payment * n;
    }
    payment * (1.0 - (1.0 + rate).powf(-n)) / rate
}

/// Principal compounded `periods_per_year` times a year for a (possibly
/// fractional) number of years
pub fn compound_amount(principal: f64, annual_rate: f64, periods_per_year: u32, years: f64) -> f64 {
    let n = periods_per_year as f64;
    principal * (1.0 + annual_rate / n).powf(n * years)
}

/// APY for a nominal annual rate
pub fn effective_annual_rate(annual_rate: f64, periods_per_year: u32) -> f64 {
    let n = periods_per_year as f64;
    (1.0 + annual_rate / n).powf(n) - 1.0
}

/// Lease money factor → APR in percent
pub fn money_factor_to_apr(money_factor: f64) -> f64 {
    money_factor * MONEY_FACTOR_TO_APR
}

/// APR in percent → lease money factor
pub fn apr_to_money_factor(apr_percent: f64) -> f64 {
    apr_percent / MONEY_FACTOR_TO_APR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_annuity_payment_standard_mortgage() {
        // 200k, 6% APR, 30 years
        let pmt = annuity_payment(200_000.0, 0.06 / 12.0, 360);
        assert!(close(pmt, 1199.10, 0.01), "got {}", pmt);
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        assert_eq!(annuity_payment(1200.0, 0.0, 12), 100.0);
    }

    #[test]
    fn test_future_value_matches_compound_amount_without_deposits() {
        let fv = future_value(10_000.0, 0.005, 12, 0.0);
        let ca = compound_amount(10_000.0, 0.06, 12, 1.0);
        assert!(close(fv, ca, 1e-9));
        assert!(close(fv, 10_616.78, 0.01));
    }

    #[test]
    fn test_present_value_inverts_payment() {
        let pmt = annuity_payment(25_000.0, 0.004, 60);
        let pv = present_value_of_annuity(pmt, 0.004, 60);
        assert!(close(pv, 25_000.0, 1e-6));
    }

    #[test]
    fn test_effective_annual_rate() {
        let apy = effective_annual_rate(0.05, 12);
        assert!(close(apy, 0.051162, 1e-6));
        assert!(close(effective_annual_rate(0.05, 1), 0.05, 1e-12));
    }

    #[test]
    fn test_money_factor_conversion() {
        assert!(close(money_factor_to_apr(0.00125), 3.0, 1e-12));
        assert!(close(apr_to_money_factor(3.0), 0.00125, 1e-12));
    }
}
