// 🧮 Calculator Widgets
//
// One unit struct per widget. Each owns its input record, validates it,
// computes an output record and projects that output through `Report`.
// `CalculatorKind` is the registry used by the server and the history store
// to dispatch on the widget key.

pub mod credit;
pub mod geometry;
pub mod lease;
pub mod loan;
pub mod number;
pub mod retirement;
pub mod savings;
pub mod science;

use crate::error::{CalcError, CalcResult};
use crate::export::Report;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use credit::{
    load_debts, CreditCardCalculator, CreditCardInput, CreditCardOutput, DebtPayoffCalculator, DebtPayoffInput,
};
pub use geometry::{TriangleCalculator, TriangleOutput};
pub use lease::{LeaseCalculator, LeaseInput, LeaseOutput, LeaseRate};
pub use loan::{LoanCalculator, LoanInput, LoanOutput};
pub use number::{GcfLcmCalculator, GcfLcmInput, GcfLcmOutput};
pub use retirement::{
    AnnuityCalculator, AnnuityInput, AnnuityOutput, AnnuityPayoutCalculator, AnnuityPayoutInput,
    AnnuityPayoutOutput, IraAccount, IraCalculator, IraInput, IraOutput,
};
pub use savings::{CdCalculator, CdInput, CdOutput, CompoundCalculator, CompoundInput, CompoundOutput};
pub use science::{GoldmanCalculator, GoldmanInput, GoldmanOutput, ThermoCalculator, ThermoInput, ThermoOutput};

/// Longest term any loan-style widget accepts, in months
pub const MAX_TERM_MONTHS: u32 = 600;
/// Longest horizon any savings widget accepts, in years
pub const MAX_TERM_YEARS: u32 = 100;

pub trait Calculator {
    /// Stable widget key (storage key, API path segment)
    const KEY: &'static str;
    const TITLE: &'static str;

    type Input: Serialize + DeserializeOwned;
    type Output: Serialize + Report + 'static;

    fn validate(input: &Self::Input) -> CalcResult<()>;

    fn compute(input: &Self::Input) -> CalcResult<Self::Output>;

    fn calculate(input: &Self::Input) -> CalcResult<Self::Output> {
        Self::validate(input)?;
        let output = Self::compute(input)?;
        tracing::debug!(calculator = Self::KEY, "calculation complete");
        Ok(output)
    }
}

/// Result of a dispatch by key
pub struct Evaluation {
    pub key: &'static str,
    pub title: &'static str,
    /// Typed input re-serialized, defaults filled in
    pub input: Value,
    pub output: Value,
    pub report: Box<dyn Report>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalculatorKind {
    Loan,
    Lease,
    Cd,
    Compound,
    Ira,
    Annuity,
    AnnuityPayout,
    CreditCard,
    DebtPayoff,
    GcfLcm,
    Triangle,
    Goldman,
    Thermo,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 13] = [
        CalculatorKind::Loan,
        CalculatorKind::Lease,
        CalculatorKind::Cd,
        CalculatorKind::Compound,
        CalculatorKind::Ira,
        CalculatorKind::Annuity,
        CalculatorKind::AnnuityPayout,
        CalculatorKind::CreditCard,
        CalculatorKind::DebtPayoff,
        CalculatorKind::GcfLcm,
        CalculatorKind::Triangle,
        CalculatorKind::Goldman,
        CalculatorKind::Thermo,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CalculatorKind::Loan => LoanCalculator::KEY,
            CalculatorKind::Lease => LeaseCalculator::KEY,
            CalculatorKind::Cd => CdCalculator::KEY,
            CalculatorKind::Compound => CompoundCalculator::KEY,
            CalculatorKind::Ira => IraCalculator::KEY,
            CalculatorKind::Annuity => AnnuityCalculator::KEY,
            CalculatorKind::AnnuityPayout => AnnuityPayoutCalculator::KEY,
            CalculatorKind::CreditCard => CreditCardCalculator::KEY,
            CalculatorKind::DebtPayoff => DebtPayoffCalculator::KEY,
            CalculatorKind::GcfLcm => GcfLcmCalculator::KEY,
            CalculatorKind::Triangle => TriangleCalculator::KEY,
            CalculatorKind::Goldman => GoldmanCalculator::KEY,
            CalculatorKind::Thermo => ThermoCalculator::KEY,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CalculatorKind::Loan => LoanCalculator::TITLE,
            CalculatorKind::Lease => LeaseCalculator::TITLE,
            CalculatorKind::Cd => CdCalculator::TITLE,
            CalculatorKind::Compound => CompoundCalculator::TITLE,
            CalculatorKind::Ira => IraCalculator::TITLE,
            CalculatorKind::Annuity => AnnuityCalculator::TITLE,
            CalculatorKind::AnnuityPayout => AnnuityPayoutCalculator::TITLE,
            CalculatorKind::CreditCard => CreditCardCalculator::TITLE,
            CalculatorKind::DebtPayoff => DebtPayoffCalculator::TITLE,
            CalculatorKind::GcfLcm => GcfLcmCalculator::TITLE,
            CalculatorKind::Triangle => TriangleCalculator::TITLE,
            CalculatorKind::Goldman => GoldmanCalculator::TITLE,
            CalculatorKind::Thermo => ThermoCalculator::TITLE,
        }
    }

    pub fn from_key(key: &str) -> CalcResult<Self> {
        CalculatorKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.key().eq_ignore_ascii_case(key.trim()))
            .ok_or_else(|| CalcError::UnknownCalculator(key.to_string()))
    }

    /// Deserialize `input`, run the widget, serialize its output
    pub fn evaluate(&self, input: Value) -> CalcResult<Evaluation> {
        match self {
            CalculatorKind::Loan => evaluate::<LoanCalculator>(input),
            CalculatorKind::Lease => evaluate::<LeaseCalculator>(input),
            CalculatorKind::Cd => evaluate::<CdCalculator>(input),
            CalculatorKind::Compound => evaluate::<CompoundCalculator>(input),
            CalculatorKind::Ira => evaluate::<IraCalculator>(input),
            CalculatorKind::Annuity => evaluate::<AnnuityCalculator>(input),
            CalculatorKind::AnnuityPayout => evaluate::<AnnuityPayoutCalculator>(input),
            CalculatorKind::CreditCard => evaluate::<CreditCardCalculator>(input),
            CalculatorKind::DebtPayoff => evaluate::<DebtPayoffCalculator>(input),
            CalculatorKind::GcfLcm => evaluate::<GcfLcmCalculator>(input),
            CalculatorKind::Triangle => evaluate::<TriangleCalculator>(input),
            CalculatorKind::Goldman => evaluate::<GoldmanCalculator>(input),
            CalculatorKind::Thermo => evaluate::<ThermoCalculator>(input),
        }
    }
}

fn evaluate<C: Calculator>(input: Value) -> CalcResult<Evaluation> {
    let input: C::Input =
        serde_json::from_value(input).map_err(|e| CalcError::MalformedInput(e.to_string()))?;
    let output = C::calculate(&input)?;
    let input = serde_json::to_value(&input).map_err(|e| CalcError::MalformedInput(e.to_string()))?;
    let json = serde_json::to_value(&output).map_err(|e| CalcError::MalformedInput(e.to_string()))?;

    Ok(Evaluation {
        key: C::KEY,
        title: C::TITLE,
        input,
        output: json,
        report: Box::new(output),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_are_unique_and_resolvable() {
        for kind in CalculatorKind::ALL {
            assert_eq!(CalculatorKind::from_key(kind.key()).unwrap(), kind);
        }
        let mut keys: Vec<&str> = CalculatorKind::ALL.iter().map(|k| k.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), CalculatorKind::ALL.len());
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            CalculatorKind::from_key("mortgage-insurance"),
            Err(CalcError::UnknownCalculator("mortgage-insurance".to_string()))
        );
    }

    #[test]
    fn test_evaluate_loan_by_key() {
        let eval = CalculatorKind::from_key("loan")
            .unwrap()
            .evaluate(json!({
                "amount": 12000.0,
                "annual_rate_percent": 0.0,
                "term_months": 12
            }))
            .unwrap();

        assert_eq!(eval.key, "loan");
        assert_eq!(eval.output["monthly_payment"], json!(1000.0));
        assert_eq!(eval.report.rows().len(), 12);
    }

    #[test]
    fn test_evaluate_fills_input_defaults() {
        let eval = CalculatorKind::Loan
            .evaluate(json!({
                "amount": 12000.0,
                "annual_rate_percent": 0.0,
                "term_months": 12
            }))
            .unwrap();
        assert_eq!(eval.input["extra_payment"], json!(0.0));
    }

    #[test]
    fn test_triangle_angles_only_is_not_malformed() {
        let err = CalculatorKind::Triangle
            .evaluate(json!({ "A": 60.0, "B": 60.0, "C": 60.0 }))
            .err()
            .unwrap();
        assert!(matches!(err, CalcError::NoSolution(_)));
    }

    #[test]
    fn test_evaluate_rejects_malformed_json() {
        let err = CalculatorKind::Loan
            .evaluate(json!({ "amount": "lots" }))
            .err()
            .unwrap();
        assert!(matches!(err, CalcError::MalformedInput(_)));
    }

    #[test]
    fn test_evaluate_surfaces_validation_errors() {
        let err = CalculatorKind::Cd
            .evaluate(json!({
                "deposit": -5.0,
                "annual_rate_percent": 4.0,
                "compounding": "monthly",
                "term_months": 12
            }))
            .err()
            .unwrap();
        assert_eq!(err.field(), Some("deposit"));
    }
}
