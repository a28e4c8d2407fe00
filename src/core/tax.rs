use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{FinanceError, FinanceResult, require_non_negative};
use super::types::{SlabTax, TaxBracket, TaxBreakdown, TaxResult};

/// Slab-based income-tax regime.
///
/// Each bracket taxes at most `slab_width` of income above its threshold, so
/// taxable income past the last threshold plus `slab_width` is not taxed at
/// all. See [`TaxRegime::covered_ceiling`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaxRegime {
    #[serde(alias = "standard_deduction")]
    pub standard_deduction: f64,
    #[serde(alias = "slab_width")]
    pub slab_width: f64,
    pub brackets: Vec<TaxBracket>,
    /// Raw liabilities below this are forgiven entirely.
    #[serde(alias = "rebate_threshold")]
    pub rebate_threshold: f64,
    /// Levy applied to the whole liability once no rebate is due.
    #[serde(alias = "cess_rate")]
    pub cess_rate: f64,
}

impl Default for TaxRegime {
    fn default() -> Self {
        Self {
            standard_deduction: 75_000.0,
            slab_width: 400_000.0,
            brackets: vec![
                TaxBracket::new(400_000, 0.05),
                TaxBracket::new(800_000, 0.10),
                TaxBracket::new(1_200_000, 0.15),
                TaxBracket::new(1_600_000, 0.20),
                TaxBracket::new(2_000_000, 0.25),
                TaxBracket::new(2_400_000, 0.30),
            ],
            rebate_threshold: 60_000.0,
            cess_rate: 0.04,
        }
    }
}

impl TaxRegime {
    /// Taxable income above which no further tax accrues.
    pub fn covered_ceiling(&self) -> f64 {
        self.brackets
            .last()
            .map(|b| b.threshold_above_deduction as f64 + self.slab_width)
            .unwrap_or(0.0)
    }

    pub fn validate(&self) -> FinanceResult<()> {
        if !self.standard_deduction.is_finite() || self.standard_deduction < 0.0 {
            return Err(FinanceError::InvalidConfig(
                "standard deduction must be >= 0".to_string(),
            ));
        }
        if !self.slab_width.is_finite() || self.slab_width <= 0.0 {
            return Err(FinanceError::InvalidConfig(
                "slab width must be > 0".to_string(),
            ));
        }
        if !self.rebate_threshold.is_finite() || self.rebate_threshold < 0.0 {
            return Err(FinanceError::InvalidConfig(
                "rebate threshold must be >= 0".to_string(),
            ));
        }
        if !self.cess_rate.is_finite() || self.cess_rate < 0.0 {
            return Err(FinanceError::InvalidConfig(
                "cess rate must be >= 0".to_string(),
            ));
        }
        for pair in self.brackets.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if upper.threshold_above_deduction <= lower.threshold_above_deduction {
                return Err(FinanceError::InvalidConfig(format!(
                    "tax brackets must ascend: {} follows {}",
                    upper.threshold_above_deduction, lower.threshold_above_deduction
                )));
            }
            let gap = upper
                .threshold_above_deduction
                .checked_sub(lower.threshold_above_deduction)
                .ok_or_else(|| {
                    FinanceError::InvalidConfig(format!(
                        "tax brackets at {} and {} are too far apart",
                        lower.threshold_above_deduction, upper.threshold_above_deduction
                    ))
                })?;
            if (gap as f64) < self.slab_width {
                return Err(FinanceError::InvalidConfig(format!(
                    "tax brackets at {} and {} overlap",
                    lower.threshold_above_deduction, upper.threshold_above_deduction
                )));
            }
        }
        for bracket in &self.brackets {
            if bracket.threshold_above_deduction < 0 {
                return Err(FinanceError::InvalidConfig(format!(
                    "tax bracket threshold {} must be >= 0",
                    bracket.threshold_above_deduction
                )));
            }
            if !(0.0..=1.0).contains(&bracket.marginal_rate) {
                return Err(FinanceError::InvalidConfig(format!(
                    "marginal rate for bracket {} must be between 0 and 1",
                    bracket.threshold_above_deduction
                )));
            }
        }
        Ok(())
    }

    pub fn breakdown(&self, gross_income: f64) -> FinanceResult<TaxBreakdown> {
        let gross_income = require_non_negative("gross income", gross_income)?;
        let taxable_income = gross_income - self.standard_deduction;

        let slabs: Vec<SlabTax> = self
            .brackets
            .iter()
            .filter(|b| taxable_income > b.threshold_above_deduction as f64)
            .map(|b| {
                let taxed_amount =
                    (taxable_income - b.threshold_above_deduction as f64).min(self.slab_width);
                SlabTax {
                    threshold_above_deduction: b.threshold_above_deduction,
                    marginal_rate: b.marginal_rate,
                    taxed_amount,
                    tax: taxed_amount * b.marginal_rate,
                }
            })
            .collect();
        let raw_tax: f64 = slabs.iter().map(|s| s.tax).sum();

        let rebate_applied = raw_tax < self.rebate_threshold;
        let tax_payable = if rebate_applied {
            0.0
        } else {
            raw_tax * (1.0 + self.cess_rate)
        };

        let ceiling = self.covered_ceiling();
        if taxable_income > ceiling {
            debug!(
                taxable_income,
                ceiling,
                untaxed = taxable_income - ceiling,
                "taxable income exceeds the last slab"
            );
        }
        debug!(gross_income, raw_tax, rebate_applied, tax_payable, "computed income tax");

        Ok(TaxBreakdown {
            gross_income,
            taxable_income,
            slabs,
            raw_tax,
            rebate_applied,
            tax_payable,
        })
    }

    pub fn compute(&self, gross_income: f64) -> FinanceResult<TaxResult> {
        self.breakdown(gross_income).map(|b| b.result())
    }
}

pub fn compute_tax(gross_income: f64) -> FinanceResult<TaxResult> {
    TaxRegime::default().compute(gross_income)
}
