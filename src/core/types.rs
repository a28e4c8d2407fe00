use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateOffer {
    pub institution: String,
    #[serde(alias = "annual_rate_percent")]
    pub annual_rate_percent: f64,
}

impl RateOffer {
    pub fn new(institution: impl Into<String>, annual_rate_percent: f64) -> Self {
        Self {
            institution: institution.into(),
            annual_rate_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositResult {
    pub institution: String,
    pub maturity_amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanQuote {
    pub down_payment: i64,
    pub monthly_installment: i64,
    pub minimum_monthly_income: i64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AffordabilityVerdict {
    Affordable,
    NotAffordable,
}

impl AffordabilityVerdict {
    pub fn label(self) -> &'static str {
        match self {
            AffordabilityVerdict::Affordable => "Affordable",
            AffordabilityVerdict::NotAffordable => "Not Affordable",
        }
    }
}

impl fmt::Display for AffordabilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    pub gross_income: f64,
    pub tax_payable: f64,
}

impl TaxResult {
    /// Income left after tax.
    pub fn retained_income(&self) -> f64 {
        self.gross_income - self.tax_payable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBracket {
    #[serde(alias = "threshold_above_deduction")]
    pub threshold_above_deduction: i64,
    #[serde(alias = "marginal_rate")]
    pub marginal_rate: f64,
}

impl TaxBracket {
    pub const fn new(threshold_above_deduction: i64, marginal_rate: f64) -> Self {
        Self {
            threshold_above_deduction,
            marginal_rate,
        }
    }
}

/// Tax contributed by one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabTax {
    pub threshold_above_deduction: i64,
    pub marginal_rate: f64,
    pub taxed_amount: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub gross_income: f64,
    pub taxable_income: f64,
    pub slabs: Vec<SlabTax>,
    pub raw_tax: f64,
    pub rebate_applied: bool,
    pub tax_payable: f64,
}

impl TaxBreakdown {
    pub fn result(&self) -> TaxResult {
        TaxResult {
            gross_income: self.gross_income,
            tax_payable: self.tax_payable,
        }
    }
}
