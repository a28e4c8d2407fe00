use thiserror::Error;

pub type FinanceResult<T> = Result<T, FinanceError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinanceError {
    /// Input outside the domain the engine is defined on.
    #[error("invalid {field}: {value} ({reason})")]
    Domain {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("unsupported tenure of {years} years; supported tenures are {supported:?}")]
    UnsupportedTenure { years: u32, supported: Vec<u32> },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read config {path}: {reason}")]
    ConfigRead { path: String, reason: String },

    #[error("failed to parse config {path}: {reason}")]
    ConfigParse { path: String, reason: String },
}

impl FinanceError {
    pub(crate) fn domain(field: &'static str, value: f64, reason: &'static str) -> Self {
        FinanceError::Domain {
            field,
            value,
            reason,
        }
    }
}

/// Rejects NaN, infinities and values `<= 0`.
pub(crate) fn require_positive(field: &'static str, value: f64) -> FinanceResult<f64> {
    if !value.is_finite() {
        return Err(FinanceError::domain(field, value, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(FinanceError::domain(field, value, "must be > 0"));
    }
    Ok(value)
}

/// Rejects NaN, infinities and negative values.
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> FinanceResult<f64> {
    if !value.is_finite() {
        return Err(FinanceError::domain(field, value, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(FinanceError::domain(field, value, "must be >= 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_positive_rejects_zero_and_nan() {
        assert!(require_positive("price", 0.0).is_err());
        assert!(require_positive("price", -1.0).is_err());
        assert!(require_positive("price", f64::NAN).is_err());
        assert_eq!(require_positive("price", 1.5), Ok(1.5));
    }

    #[test]
    fn require_non_negative_accepts_zero() {
        assert_eq!(require_non_negative("income", 0.0), Ok(0.0));
        assert!(require_non_negative("income", f64::INFINITY).is_err());
    }

    #[test]
    fn domain_error_message_names_field() {
        let err = require_positive("principal", -5.0).expect_err("negative principal");
        assert_eq!(err.to_string(), "invalid principal: -5 (must be > 0)");
    }

    #[test]
    fn unsupported_tenure_lists_supported_values() {
        let err = FinanceError::UnsupportedTenure {
            years: 2,
            supported: vec![1, 3, 5],
        };
        assert_eq!(
            err.to_string(),
            "unsupported tenure of 2 years; supported tenures are [1, 3, 5]"
        );
    }
}
