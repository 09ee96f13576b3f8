//! Figures each calculator publishes for the others to read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Expense, YearMap};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupCostsAggregate {
    pub total_funds_needed: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingAggregate {
    pub total_funding: Decimal,
    pub total_monthly_payments: Decimal,
    pub total_annual_payments: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfSalesAggregate {
    pub is_product: bool,
    pub cost_per_unit: Decimal,
    pub selling_price: Decimal,
    pub profit: Decimal,
    pub margin: Decimal,
}

/// One forecast year's totals, after any growth increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearTotals {
    pub total_sales: Decimal,
    pub total_cogs: Decimal,
    pub total_gross_profit: Decimal,
    pub total_quantity: Decimal,
    /// Percentage points.
    pub gross_profit_margin: Decimal,
}

pub type SalesForecastAggregate = YearMap<YearTotals>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkforceAggregate {
    pub annual_salaries_and_wages: Decimal,
    pub monthly_payroll_taxes: Decimal,
    pub monthly_health_insurance: Decimal,
    pub total_monthly_expenses: Decimal,
    pub total_annual_expenses: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpexAggregate {
    pub total_monthly_expenses: Decimal,
    pub total_annual_expenses: Decimal,
    pub expenses: Vec<Expense>,
}
