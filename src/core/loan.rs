use serde::{Deserialize, Serialize};

use super::error::{FinanceError, FinanceResult, require_positive};
use super::money::round_currency;
use super::types::LoanQuote;

/// Fixed terms a car loan is quoted under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarLoanPolicy {
    #[serde(alias = "annual_rate_percent")]
    pub annual_rate_percent: f64,
    #[serde(alias = "term_years")]
    pub term_years: u32,
    #[serde(alias = "down_payment_ratio")]
    pub down_payment_ratio: f64,
    /// Largest share of monthly income the installment may take.
    #[serde(alias = "income_coverage_ratio")]
    pub income_coverage_ratio: f64,
}

impl Default for CarLoanPolicy {
    fn default() -> Self {
        Self {
            annual_rate_percent: 9.0,
            term_years: 4,
            down_payment_ratio: 0.20,
            income_coverage_ratio: 0.10,
        }
    }
}

/// Longest car loan term accepted from configuration.
pub const MAX_TERM_YEARS: u32 = 30;

impl CarLoanPolicy {
    pub fn periods(&self) -> FinanceResult<u32> {
        self.term_years.checked_mul(12).ok_or_else(|| {
            FinanceError::InvalidConfig(format!(
                "car loan term of {} years is too long",
                self.term_years
            ))
        })
    }

    pub fn monthly_rate(&self) -> f64 {
        (self.annual_rate_percent / 100.0) / 12.0
    }

    pub fn validate(&self) -> FinanceResult<()> {
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(FinanceError::InvalidConfig(
                "car loan annual rate must be >= 0".to_string(),
            ));
        }
        if self.term_years == 0 || self.term_years > MAX_TERM_YEARS {
            return Err(FinanceError::InvalidConfig(format!(
                "car loan term must be between 1 and {MAX_TERM_YEARS} years"
            )));
        }
        if !(self.down_payment_ratio > 0.0 && self.down_payment_ratio < 1.0) {
            return Err(FinanceError::InvalidConfig(
                "car loan down payment ratio must be between 0 and 1".to_string(),
            ));
        }
        if !(self.income_coverage_ratio > 0.0 && self.income_coverage_ratio <= 1.0) {
            return Err(FinanceError::InvalidConfig(
                "car loan income coverage ratio must be in (0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

/// Level payment that amortizes `principal` over `periods` at `periodic_rate`.
pub(crate) fn amortized_installment(principal: f64, periodic_rate: f64, periods: u32) -> f64 {
    let n = f64::from(periods);
    if periodic_rate == 0.0 {
        return principal / n;
    }
    let growth = (1.0 + periodic_rate).powf(n);
    principal * periodic_rate * growth / (growth - 1.0)
}

pub fn evaluate_car_loan(price: f64) -> FinanceResult<LoanQuote> {
    evaluate_car_loan_with(price, &CarLoanPolicy::default())
}

pub fn evaluate_car_loan_with(price: f64, policy: &CarLoanPolicy) -> FinanceResult<LoanQuote> {
    let price = require_positive("price", price)?;
    policy.validate()?;

    let down_payment = policy.down_payment_ratio * price;
    let loan_amount = price - down_payment;
    let emi = amortized_installment(loan_amount, policy.monthly_rate(), policy.periods()?);
    let minimum_monthly_income = emi / policy.income_coverage_ratio;

    Ok(LoanQuote {
        down_payment: round_currency("down payment", down_payment)?,
        monthly_installment: round_currency("monthly installment", emi)?,
        minimum_monthly_income: round_currency("minimum monthly income", minimum_monthly_income)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn ten_lakh_car_matches_hand_calculation() {
        let quote = evaluate_car_loan(1_000_000.0).expect("valid price");
        assert_eq!(
            quote,
            LoanQuote {
                down_payment: 200_000,
                monthly_installment: 19_908,
                minimum_monthly_income: 199_080,
            }
        );
    }

    #[test]
    fn outputs_are_rounded_independently() {
        // emi = 1990.803..., income = 19908.03...: rounding the installment
        // first would give 19910.
        let quote = evaluate_car_loan(100_000.0).expect("valid price");
        assert_eq!(quote.down_payment, 20_000);
        assert_eq!(quote.monthly_installment, 1_991);
        assert_eq!(quote.minimum_monthly_income, 19_908);
    }

    #[test]
    fn installment_formula_matches_reference_value() {
        let policy = CarLoanPolicy::default();
        assert_eq!(policy.periods(), Ok(48));
        assert_approx(policy.monthly_rate(), 0.0075);
        let periods = policy.periods().expect("default term fits");
        let emi = amortized_installment(800_000.0, policy.monthly_rate(), periods);
        assert!((emi - 19_908.033_899).abs() < 1e-3, "emi {emi}");
    }

    #[test]
    fn zero_rate_degenerates_to_straight_line() {
        let policy = CarLoanPolicy {
            annual_rate_percent: 0.0,
            ..CarLoanPolicy::default()
        };
        assert!(policy.validate().is_ok());
        let quote = evaluate_car_loan_with(480_000.0, &policy).expect("valid price");
        assert_eq!(quote.down_payment, 96_000);
        assert_eq!(quote.monthly_installment, 8_000);
        assert_eq!(quote.minimum_monthly_income, 80_000);
    }

    #[test]
    fn non_positive_price_is_rejected() {
        assert!(matches!(
            evaluate_car_loan(0.0),
            Err(FinanceError::Domain { field: "price", .. })
        ));
        assert!(evaluate_car_loan(-1.0).is_err());
        assert!(evaluate_car_loan(f64::INFINITY).is_err());
    }

    #[test]
    fn validate_rejects_bad_policies() {
        let base = CarLoanPolicy::default();
        assert!(base.validate().is_ok());
        assert!(CarLoanPolicy { term_years: 0, ..base }.validate().is_err());
        assert!(CarLoanPolicy { term_years: 31, ..base }.validate().is_err());
        assert!(CarLoanPolicy { annual_rate_percent: -1.0, ..base }.validate().is_err());
        assert!(CarLoanPolicy { down_payment_ratio: 1.0, ..base }.validate().is_err());
        assert!(CarLoanPolicy { income_coverage_ratio: 0.0, ..base }.validate().is_err());
    }

    #[test]
    fn oversized_term_errors_instead_of_overflowing() {
        let policy = CarLoanPolicy {
            term_years: u32::MAX,
            ..CarLoanPolicy::default()
        };
        assert!(matches!(policy.periods(), Err(FinanceError::InvalidConfig(_))));
        assert!(matches!(
            evaluate_car_loan_with(1_000_000.0, &policy),
            Err(FinanceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn quote_too_large_for_whole_units_is_an_error() {
        let err = evaluate_car_loan(1e300).expect_err("quote overflows i64");
        assert!(matches!(
            err,
            FinanceError::Domain { field: "down payment", .. }
        ));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_quote_grows_with_price(
            price in 100_000u32..50_000_000,
            step in 1_000u32..1_000_000
        ) {
            let low = evaluate_car_loan(price as f64).expect("valid price");
            let high = evaluate_car_loan((price + step) as f64).expect("valid price");
            prop_assert!(high.down_payment > low.down_payment);
            prop_assert!(high.monthly_installment > low.monthly_installment);
            prop_assert!(high.minimum_monthly_income > low.minimum_monthly_income);
        }

        #[test]
        fn prop_installment_times_periods_covers_loan(price in 100_000u32..50_000_000) {
            let policy = CarLoanPolicy::default();
            let price = price as f64;
            let loan = price * (1.0 - policy.down_payment_ratio);
            let periods = policy.periods().expect("default term fits");
            let emi = amortized_installment(loan, policy.monthly_rate(), periods);
            prop_assert!(emi * f64::from(periods) > loan);
        }
    }
}
