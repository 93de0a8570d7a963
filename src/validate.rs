// ✔️ Input Validation - inline field checks
// Each check short-circuits with a message naming the offending field.

use crate::error::{CalcError, CalcResult};

/// Parse a form-style amount: "$10,000.50", " 6.5% ", "1200"
pub fn parse_amount(field: &str, raw: &str) -> CalcResult<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%' | ' '))
        .collect();

    if cleaned.is_empty() {
        return Err(CalcError::MissingField(field.to_string()));
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| CalcError::invalid(field, format!("'{}' is not a number", raw.trim())))?;

    if !value.is_finite() {
        return Err(CalcError::invalid(field, "must be a finite number"));
    }

    Ok(value)
}

/// clap value parser wrapper around `parse_amount`
pub fn parse_cli_amount(raw: &str) -> Result<f64, String> {
    parse_amount("value", raw).map_err(|e| e.to_string())
}

pub fn require_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid(field, "must be a finite number"))
    }
}

pub fn require_positive(field: &str, value: f64) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid(field, "must be greater than 0"));
    }
    Ok(value)
}

pub fn require_non_negative(field: &str, value: f64) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid(field, "cannot be negative"));
    }
    Ok(value)
}

pub fn require_range(field: &str, value: f64, min: f64, max: f64) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value < min || value > max {
        return Err(CalcError::invalid(
            field,
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(value)
}

/// Percent rates: 0..=100
pub fn require_percent(field: &str, value: f64) -> CalcResult<f64> {
    require_range(field, value, 0.0, 100.0)
}

/// Terms and counts: 1..=max
pub fn require_term(field: &str, value: u32, max: u32) -> CalcResult<u32> {
    if value == 0 {
        return Err(CalcError::invalid(field, "must be at least 1"));
    }
    if value > max {
        return Err(CalcError::invalid(field, format!("cannot exceed {}", max)));
    }
    Ok(value)
}

pub fn require_present<T: Copy>(field: &str, value: Option<T>) -> CalcResult<T> {
    value.ok_or_else(|| CalcError::MissingField(field.to_string()))
}

/// Round to cents
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_strips_formatting() {
        assert_eq!(parse_amount("amount", "$10,000.50").unwrap(), 10000.5);
        assert_eq!(parse_amount("rate", " 6.5% ").unwrap(), 6.5);
        assert_eq!(parse_amount("term", "360").unwrap(), 360.0);
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(
            parse_amount("amount", "   "),
            Err(CalcError::MissingField("amount".to_string()))
        );
        assert!(parse_amount("amount", "12abc").is_err());
        assert!(parse_amount("amount", "inf").is_err());
    }

    #[test]
    fn test_range_checks() {
        assert!(require_positive("amount", 0.0).is_err());
        assert!(require_positive("amount", 1.0).is_ok());
        assert!(require_non_negative("extra", 0.0).is_ok());
        assert!(require_non_negative("extra", -0.01).is_err());
        assert!(require_percent("rate", 100.0).is_ok());
        assert!(require_percent("rate", 100.5).is_err());
        assert!(require_term("term", 0, 480).is_err());
        assert!(require_term("term", 481, 480).is_err());
        assert_eq!(require_term("term", 360, 480).unwrap(), 360);
    }

    #[test]
    fn test_require_present() {
        assert_eq!(require_present("payment", Some(5.0)).unwrap(), 5.0);
        let err = require_present::<f64>("payment", None).unwrap_err();
        assert_eq!(err.to_string(), "payment is required");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(616.7781), 616.78);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(-2.344), -2.34);
    }
}
