mod aggregates;
mod employee;
mod expense;
mod fixed_asset;
mod funding_source;
mod material;
mod owner;
mod product;
mod saved_calculation;

pub use aggregates::{
    CostOfSalesAggregate, FundingAggregate, OpexAggregate, SalesForecastAggregate,
    StartupCostsAggregate, WorkforceAggregate, YearTotals,
};
pub use employee::{
    Employee, EmployeeField, EmploymentType, HealthInsurance, HealthInsuranceField,
    PayrollTaxField, PayrollTaxRates,
};
pub use expense::{Expense, ExpenseField, Frequency};
pub use fixed_asset::{FixedAsset, FixedAssetField, StartupExpense, StartupExpenseField};
pub use funding_source::{DebtTerms, FundingKind, FundingSource, FundingSourceField, FundingTerms};
pub use material::{Material, MaterialField};
pub use owner::{Owner, OwnerField};
pub use product::{ForecastYear, Product, ProductField, Timeframe, YearMap};
pub use saved_calculation::SavedCalculation;
