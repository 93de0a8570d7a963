// ⚠️ Calculator Errors - user-facing validation and convergence failures
//
// Every calculator short-circuits with one of these. The message is what the
// user sees, so keep it plain.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Value present but out of range or malformed
    #[error("{field}: {message}")]
    InvalidInput { field: String, message: String },

    /// Required value not supplied
    #[error("{0} is required")]
    MissingField(String),

    /// Payment never gets ahead of the interest
    #[error("Payment of {payment:.2} does not cover the first period's interest of {interest:.2}. Increase the payment.")]
    PaymentTooLow { payment: f64, interest: f64 },

    /// Iteration cap hit (the "payoff takes too long" signal)
    #[error("Payoff takes longer than {max_periods} months. Increase the payment.")]
    PayoffTooLong { max_periods: u32 },

    #[error("No solution: {0}")]
    NoSolution(String),

    #[error("Result overflows: {0}")]
    Overflow(String),

    #[error("Unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

impl CalcError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Field the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. } => Some(field),
            CalcError::MissingField(field) => Some(field),
            _ => None,
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = CalcError::invalid("amount", "must be greater than 0");
        assert_eq!(err.to_string(), "amount: must be greater than 0");
        assert_eq!(err.field(), Some("amount"));
    }

    #[test]
    fn test_payoff_too_long_message() {
        let err = CalcError::PayoffTooLong { max_periods: 1200 };
        assert!(err.to_string().contains("1200 months"));
        assert!(err.to_string().contains("Increase the payment"));
        assert_eq!(err.field(), None);
    }
}
