//! Reference data and policy constants for every calculator.
//!
//! Built once at startup, validated, then shared read-only. Compiled-in
//! defaults reproduce the published rate table and tax slabs; a TOML file may
//! override any section.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{BudgetRules, CarLoanPolicy, FinanceError, FinanceResult, RateTable, TaxRegime};

/// Default location of the optional config file.
pub const DEFAULT_CONFIG_PATH: &str = "config/finrules.toml";

/// Smallest inputs a caller may submit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputLimits {
    #[serde(alias = "deposit_amount")]
    pub deposit_amount: f64,
    #[serde(alias = "car_price")]
    pub car_price: f64,
    #[serde(alias = "investment_income")]
    pub investment_income: f64,
    #[serde(alias = "property_price")]
    pub property_price: f64,
    #[serde(alias = "annual_income")]
    pub annual_income: f64,
    #[serde(alias = "monthly_income")]
    pub monthly_income: f64,
    #[serde(alias = "gross_income")]
    pub gross_income: f64,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            deposit_amount: 1_000.0,
            car_price: 100_000.0,
            investment_income: 1_000.0,
            property_price: 500_000.0,
            annual_income: 100_000.0,
            monthly_income: 10_000.0,
            gross_income: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub deposits: RateTable,
    #[serde(alias = "car_loan")]
    pub car_loan: CarLoanPolicy,
    pub rules: BudgetRules,
    pub tax: TaxRegime,
    pub limits: InputLimits,
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> FinanceResult<Self> {
        Self::parse(content, "<inline>")
    }

    pub fn from_file(path: &Path) -> FinanceResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FinanceError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Loads `path` when given, otherwise the default file if it exists,
    /// otherwise the compiled-in defaults.
    pub fn load(path: Option<&Path>) -> FinanceResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> FinanceResult<()> {
        self.deposits.validate()?;
        self.car_loan.validate()?;
        self.rules.validate()?;
        self.tax.validate()?;
        let limits = [
            self.limits.deposit_amount,
            self.limits.car_price,
            self.limits.investment_income,
            self.limits.property_price,
            self.limits.annual_income,
            self.limits.monthly_income,
            self.limits.gross_income,
        ];
        if limits.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(FinanceError::InvalidConfig(
                "input limits must be finite and >= 0".to_string(),
            ));
        }
        Ok(())
    }

    fn parse(content: &str, origin: &str) -> FinanceResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| FinanceError::ConfigParse {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}
