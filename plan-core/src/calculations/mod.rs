//! Calculation modules for each business-plan calculator.
//!
//! Every calculator pairs a user-editable input with a pure `calculate`
//! function and a [`crate::session::Calculator`] implementation that
//! publishes its aggregate to the shared store. The summary statement and
//! dashboard only read from the store.

pub mod common;
pub mod cost_of_sales;
pub mod dashboard;
pub mod opex;
pub mod sales_forecast;
pub mod source_of_funds;
pub mod startup_costs;
pub mod summary;
pub mod workforce;

pub use cost_of_sales::{CostOfSalesCalculator, CostOfSalesInput, CostOfSalesResult, CostOfSalesSnapshot};
pub use dashboard::Dashboard;
pub use opex::{ChartSlice, OpexCalculator, OpexInput, OpexResult, SALARIES_AND_WAGES};
pub use sales_forecast::{
    PercentIncrease, ProductLine, SalesForecastCalculator, SalesForecastInput, SalesForecastResult,
    ThreeYearSummary, YearForecast,
};
pub use source_of_funds::{
    FundingGap, FundingRow, SourceOfFundsCalculator, SourceOfFundsInput, SourceOfFundsResult,
    SourceOfFundsWorksheet,
};
pub use startup_costs::{StartupCostsCalculator, StartupCostsInput, StartupCostsResult};
pub use summary::{StatementYear, SummaryStatement};
pub use workforce::{WorkforceCalculator, WorkforceInput, WorkforceResult};
