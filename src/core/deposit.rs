use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{FinanceError, FinanceResult, require_positive};
use super::money::round_currency;
use super::types::{DepositResult, RateOffer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenureOffers {
    pub years: u32,
    pub offers: Vec<RateOffer>,
}

/// Competing deposit offers keyed by tenure, in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    pub tenures: Vec<TenureOffers>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            tenures: vec![
                TenureOffers {
                    years: 1,
                    offers: vec![
                        RateOffer::new("Jana Small Finance Bank", 8.25),
                        RateOffer::new("Suryoday Small Finance Bank", 8.25),
                        RateOffer::new("Ujjivan Small Finance Bank", 8.25),
                    ],
                },
                TenureOffers {
                    years: 3,
                    offers: vec![
                        RateOffer::new("North East Small Finance Bank", 9.0),
                        RateOffer::new("Utkarsh Small Finance Bank", 8.5),
                        RateOffer::new("Suryoday Small Finance Bank", 8.25),
                        RateOffer::new("Jana Small Finance Bank", 8.25),
                    ],
                },
                TenureOffers {
                    years: 5,
                    offers: vec![
                        RateOffer::new("Suryoday Small Finance Bank", 8.60),
                        RateOffer::new("Jana Small Finance Bank", 8.2),
                        RateOffer::new("Unity Small Finance Bank", 8.15),
                    ],
                },
            ],
        }
    }
}

impl RateTable {
    pub fn tenures(&self) -> Vec<u32> {
        self.tenures.iter().map(|t| t.years).collect()
    }

    pub fn offers_for(&self, years: u32) -> FinanceResult<&[RateOffer]> {
        self.tenures
            .iter()
            .find(|t| t.years == years)
            .map(|t| t.offers.as_slice())
            .ok_or_else(|| FinanceError::UnsupportedTenure {
                years,
                supported: self.tenures(),
            })
    }

    pub fn validate(&self) -> FinanceResult<()> {
        if self.tenures.is_empty() {
            return Err(FinanceError::InvalidConfig(
                "deposit rate table has no tenures".to_string(),
            ));
        }
        for (idx, tenure) in self.tenures.iter().enumerate() {
            if tenure.years == 0 {
                return Err(FinanceError::InvalidConfig(
                    "deposit tenure must be >= 1 year".to_string(),
                ));
            }
            if self.tenures[..idx].iter().any(|t| t.years == tenure.years) {
                return Err(FinanceError::InvalidConfig(format!(
                    "deposit tenure {} is listed twice",
                    tenure.years
                )));
            }
            if tenure.offers.is_empty() {
                return Err(FinanceError::InvalidConfig(format!(
                    "deposit tenure {} has no offers",
                    tenure.years
                )));
            }
            for offer in &tenure.offers {
                if !offer.annual_rate_percent.is_finite() || offer.annual_rate_percent < 0.0 {
                    return Err(FinanceError::InvalidConfig(format!(
                        "{} rate for {} years must be >= 0",
                        offer.institution, tenure.years
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Maturity value of `principal` under annual compounding.
fn maturity_value(principal: f64, annual_rate_percent: f64, tenure_years: u32) -> f64 {
    principal * (1.0 + annual_rate_percent / 100.0).powf(f64::from(tenure_years))
}

pub fn project(
    principal: f64,
    tenure_years: u32,
    offers: &[RateOffer],
) -> FinanceResult<Vec<DepositResult>> {
    let principal = require_positive("principal", principal)?;
    if tenure_years == 0 {
        return Err(FinanceError::domain(
            "tenure",
            f64::from(tenure_years),
            "must be >= 1 year",
        ));
    }

    let results = offers
        .iter()
        .map(|offer| {
            Ok(DepositResult {
                institution: offer.institution.clone(),
                maturity_amount: round_currency(
                    "maturity amount",
                    maturity_value(principal, offer.annual_rate_percent, tenure_years),
                )?,
            })
        })
        .collect::<FinanceResult<Vec<DepositResult>>>()?;
    debug!(principal, tenure_years, offers = results.len(), "projected deposit offers");
    Ok(results)
}

/// Looks up the offers for `tenure_years` and projects each of them.
pub fn project_for_tenure(
    principal: f64,
    tenure_years: u32,
    table: &RateTable,
) -> FinanceResult<Vec<DepositResult>> {
    let offers = table.offers_for(tenure_years)?;
    project(principal, tenure_years, offers)
}
