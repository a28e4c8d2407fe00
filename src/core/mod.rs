mod deposit;
mod error;
mod loan;
pub mod money;
mod rules;
mod tax;
mod types;

pub use deposit::{RateTable, TenureOffers, project, project_for_tenure};
pub use error::{FinanceError, FinanceResult};
pub use loan::{CarLoanPolicy, evaluate_car_loan, evaluate_car_loan_with};
pub use rules::{
    BudgetRules, home_affordability, maximum_recommended_debt, suggested_monthly_investment,
};
pub use tax::{TaxRegime, compute_tax};
pub use types::{
    AffordabilityVerdict, DepositResult, LoanQuote, RateOffer, SlabTax, TaxBracket, TaxBreakdown,
    TaxResult,
};
