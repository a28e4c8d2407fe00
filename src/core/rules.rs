use serde::{Deserialize, Serialize};

use super::error::{FinanceError, FinanceResult, require_positive};
use super::money::round_currency;
use super::types::AffordabilityVerdict;

/// Ratios behind the rule-of-thumb checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BudgetRules {
    #[serde(alias = "investment_ratio")]
    pub investment_ratio: f64,
    /// Highest property price as a multiple of annual income.
    #[serde(alias = "price_to_income_multiple")]
    pub price_to_income_multiple: f64,
    #[serde(alias = "debt_to_income_ratio")]
    pub debt_to_income_ratio: f64,
}

impl Default for BudgetRules {
    fn default() -> Self {
        Self {
            investment_ratio: 0.01,
            price_to_income_multiple: 5.0,
            debt_to_income_ratio: 0.36,
        }
    }
}

impl BudgetRules {
    pub fn suggested_monthly_investment(&self, income: f64) -> FinanceResult<i64> {
        let income = require_positive("income", income)?;
        round_currency("suggested investment", self.investment_ratio * income)
    }

    pub fn home_affordability(
        &self,
        property_price: f64,
        annual_income: f64,
    ) -> FinanceResult<AffordabilityVerdict> {
        let property_price = require_positive("property price", property_price)?;
        let annual_income = require_positive("annual income", annual_income)?;
        if property_price <= annual_income * self.price_to_income_multiple {
            Ok(AffordabilityVerdict::Affordable)
        } else {
            Ok(AffordabilityVerdict::NotAffordable)
        }
    }

    pub fn maximum_recommended_debt(&self, monthly_income: f64) -> FinanceResult<i64> {
        let monthly_income = require_positive("monthly income", monthly_income)?;
        round_currency("maximum debt", monthly_income * self.debt_to_income_ratio)
    }

    pub fn validate(&self) -> FinanceResult<()> {
        let ratios = [
            ("investment ratio", self.investment_ratio),
            ("price to income multiple", self.price_to_income_multiple),
            ("debt to income ratio", self.debt_to_income_ratio),
        ];
        for (name, value) in ratios {
            if !value.is_finite() || value <= 0.0 {
                return Err(FinanceError::InvalidConfig(format!("{name} must be > 0")));
            }
        }
        Ok(())
    }
}

pub fn suggested_monthly_investment(income: f64) -> FinanceResult<i64> {
    BudgetRules::default().suggested_monthly_investment(income)
}

pub fn home_affordability(
    property_price: f64,
    annual_income: f64,
) -> FinanceResult<AffordabilityVerdict> {
    BudgetRules::default().home_affordability(property_price, annual_income)
}

pub fn maximum_recommended_debt(monthly_income: f64) -> FinanceResult<i64> {
    BudgetRules::default().maximum_recommended_debt(monthly_income)
}
