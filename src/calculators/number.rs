// 🔢 GCF / LCM Calculator

use super::Calculator;
use crate::error::{CalcError, CalcResult};
use crate::export::Report;
use crate::math::{format_factorization, gcd_all, gcd_by_factorization, lcm_all, lcm_by_factorization};
use serde::{Deserialize, Serialize};

/// Largest accepted input; keeps trial division fast
pub const MAX_NUMBER: u64 = 1_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcfLcmInput {
    pub numbers: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factorization {
    pub number: u64,
    pub factors: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcfLcmOutput {
    pub numbers: Vec<u64>,
    pub gcf: u64,
    pub lcm: u64,
    pub factorizations: Vec<Factorization>,
    /// Euclid and prime factorization gave the same answers
    pub methods_agree: bool,
}

pub struct GcfLcmCalculator;

impl Calculator for GcfLcmCalculator {
    const KEY: &'static str = "gcf-lcm";
    const TITLE: &'static str = "GCF & LCM Calculator";

    type Input = GcfLcmInput;
    type Output = GcfLcmOutput;

    fn validate(input: &GcfLcmInput) -> CalcResult<()> {
        if input.numbers.len() < 2 {
            return Err(CalcError::invalid("numbers", "enter at least two numbers"));
        }
        if let Some(bad) = input.numbers.iter().find(|&&n| n == 0 || n > MAX_NUMBER) {
            return Err(CalcError::invalid(
                "numbers",
                format!("{} is out of range (1 to {})", bad, MAX_NUMBER),
            ));
        }
        Ok(())
    }

    fn compute(input: &GcfLcmInput) -> CalcResult<GcfLcmOutput> {
        let numbers = &input.numbers;
        let gcf = gcd_all(numbers);
        let lcm = lcm_all(numbers)?;

        let methods_agree = gcd_by_factorization(numbers) == gcf
            && lcm_by_factorization(numbers).map(|l| l == lcm).unwrap_or(false);
        if !methods_agree {
            tracing::warn!(?numbers, "euclid and factorization disagree");
        }

        Ok(GcfLcmOutput {
            numbers: numbers.clone(),
            gcf,
            lcm,
            factorizations: numbers
                .iter()
                .map(|&n| Factorization {
                    number: n,
                    factors: format_factorization(n),
                })
                .collect(),
            methods_agree,
        })
    }
}

impl Report for GcfLcmOutput {
    fn summary(&self) -> Vec<(String, String)> {
        let list = self
            .numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        vec![
            ("Numbers".to_string(), list),
            ("GCF".to_string(), self.gcf.to_string()),
            ("LCM".to_string(), self.lcm.to_string()),
        ]
    }

    fn headers(&self) -> Vec<String> {
        vec!["Number".to_string(), "Prime factorization".to_string()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.factorizations
            .iter()
            .map(|f| vec![f.number.to_string(), f.factors.clone()])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcf_lcm() {
        let out = GcfLcmCalculator::calculate(&GcfLcmInput {
            numbers: vec![12, 18, 30],
        })
        .unwrap();

        assert_eq!(out.gcf, 6);
        assert_eq!(out.lcm, 180);
        assert!(out.methods_agree);
        assert_eq!(out.factorizations[0].factors, "2^2 × 3");
        assert_eq!(out.rows()[2], vec!["30", "2 × 3 × 5"]);
    }

    #[test]
    fn test_coprime() {
        let out = GcfLcmCalculator::calculate(&GcfLcmInput { numbers: vec![7, 13] }).unwrap();
        assert_eq!(out.gcf, 1);
        assert_eq!(out.lcm, 91);
    }

    #[test]
    fn test_needs_two_numbers() {
        let err = GcfLcmCalculator::calculate(&GcfLcmInput { numbers: vec![5] }).unwrap_err();
        assert_eq!(err.field(), Some("numbers"));
    }

    #[test]
    fn test_zero_rejected() {
        let err = GcfLcmCalculator::calculate(&GcfLcmInput { numbers: vec![0, 4] }).unwrap_err();
        assert_eq!(err.field(), Some("numbers"));
    }

    #[test]
    fn test_lcm_overflow_surfaces() {
        // Two values near 1e12 with a tiny GCF already overflow u64
        let err = GcfLcmCalculator::calculate(&GcfLcmInput {
            numbers: vec![999_999_999_989, 999_999_999_961, 999_999_999_959],
        })
        .unwrap_err();
        assert!(matches!(err, CalcError::Overflow(_)));
    }
}
