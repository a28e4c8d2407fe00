use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::api::{
    self, CarLoanPayload, DebtToIncomePayload, DepositPayload, HomeAffordabilityPayload,
    InvestmentPayload, RatesPayload, TaxPayload,
};
use crate::config::EngineConfig;
use crate::core::money::{format_decimal, format_whole};

#[derive(Debug, Parser)]
#[command(
    name = "finrules",
    version,
    about = "Personal finance calculators: fixed deposits, car loans, budgeting rules and income tax"
)]
pub struct Cli {
    #[arg(long, global = true, help = "TOML file overriding rate tables and policy constants")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Print the result as JSON")]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the deposit offers for a tenure
    Rates {
        #[arg(long, default_value_t = 1)]
        tenure: u32,
    },
    /// Maturity value of a fixed deposit with every offer for the tenure
    Deposit {
        #[arg(long, default_value_t = 1, help = "Tenure in years")]
        tenure: u32,
        #[arg(long, default_value_t = 1_000.0, help = "Amount to invest")]
        amount: f64,
    },
    /// Down payment, EMI and income needed for a car
    CarLoan {
        #[arg(long, default_value_t = 1_000_000.0)]
        price: f64,
    },
    /// Suggested monthly investment for an income
    Investment {
        #[arg(long, default_value_t = 100_000.0)]
        income: f64,
    },
    /// Whether a property is within the price-to-income multiple
    Home {
        #[arg(long, default_value_t = 5_000_000.0)]
        property_price: f64,
        #[arg(long, default_value_t = 1_000_000.0)]
        annual_income: f64,
    },
    /// Largest recommended total debt for a monthly income
    Debt {
        #[arg(long, default_value_t = 50_000.0)]
        monthly_income: f64,
    },
    /// Income tax payable on a gross income
    Tax {
        #[arg(long, default_value_t = 1_000_000.0)]
        gross_income: f64,
    },
    /// Serve the calculators over HTTP
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

/// Runs a calculation subcommand and renders its output. `Serve` is handled
/// by the binary.
pub fn render(config: &EngineConfig, command: &Command, json: bool) -> Result<String, String> {
    match *command {
        Command::Rates { tenure } => {
            let response = api::deposit_rates(
                config,
                RatesPayload {
                    tenure: Some(tenure),
                },
            )?;
            if json {
                return to_json(&response);
            }
            let mut out = format!("Best FD interest rates for {} years:\n", response.tenure);
            for offer in &response.offers {
                out.push_str(&format!(
                    "  {}: {}% p.a\n",
                    offer.institution, offer.annual_rate_percent
                ));
            }
            Ok(out)
        }
        Command::Deposit { tenure, amount } => {
            let response = api::deposit_returns(
                config,
                DepositPayload {
                    tenure: Some(tenure),
                    amount: Some(amount),
                },
            )?;
            if json {
                return to_json(&response);
            }
            let mut out = format!(
                "FD returns after {} years on {}:\n",
                response.tenure,
                format_decimal(response.amount)
            );
            for result in &response.results {
                out.push_str(&format!(
                    "  {}: {}\n",
                    result.institution,
                    format_whole(result.maturity_amount)
                ));
            }
            Ok(out)
        }
        Command::CarLoan { price } => {
            let response = api::car_loan(config, CarLoanPayload { price: Some(price) })?;
            if json {
                return to_json(&response);
            }
            Ok(format!(
                "Down Payment: {}, EMI: {}/month, Required Monthly Income: {}\n",
                format_whole(response.quote.down_payment),
                format_whole(response.quote.monthly_installment),
                format_whole(response.quote.minimum_monthly_income)
            ))
        }
        Command::Investment { income } => {
            let response = api::investment(
                config,
                InvestmentPayload {
                    income: Some(income),
                },
            )?;
            if json {
                return to_json(&response);
            }
            Ok(format!(
                "Suggested Monthly Investment: {}\n",
                format_whole(response.suggested_monthly_investment)
            ))
        }
        Command::Home {
            property_price,
            annual_income,
        } => {
            let response = api::home_affordability(
                config,
                HomeAffordabilityPayload {
                    property_price: Some(property_price),
                    annual_income: Some(annual_income),
                },
            )?;
            if json {
                return to_json(&response);
            }
            Ok(format!("Home Affordability Status: {}\n", response.verdict))
        }
        Command::Debt { monthly_income } => {
            let response = api::debt_to_income(
                config,
                DebtToIncomePayload {
                    monthly_income: Some(monthly_income),
                },
            )?;
            if json {
                return to_json(&response);
            }
            Ok(format!(
                "Maximum Recommended Debt: {}\n",
                format_whole(response.maximum_recommended_debt)
            ))
        }
        Command::Tax { gross_income } => {
            let response = api::income_tax(
                config,
                TaxPayload {
                    gross_income: Some(gross_income),
                },
            )?;
            if json {
                return to_json(&response);
            }
            Ok(format!(
                "Gross Income: {}\nTotal Tax Payable: {}\nIncome After Tax: {}\n",
                format_decimal(response.gross_income),
                format_decimal(response.tax_payable),
                format_decimal(response.retained_income)
            ))
        }
        Command::Serve { .. } => Err("serve is not a calculation".to_string()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value)
        .map(|mut s| {
            s.push('\n');
            s
        })
        .map_err(|e| format!("failed to encode result: {e}"))
}
