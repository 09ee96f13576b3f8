//! Startup costs: what it takes to open the doors.
//!
//! `total funds needed = fixed assets + startup expenses + working capital`
//!
//! The total is published to the store, where sources of funds reads it to
//! work out the funding gap.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::saturating_sum;
use crate::format::parse_amount;
use crate::ledger::Ledger;
use crate::models::{FixedAsset, StartupCostsAggregate, StartupExpense};
use crate::session::Calculator;
use crate::store::BusinessPlanStore;

/// Totals above this are flagged for a second look.
pub const LARGE_TOTAL_WARNING_THRESHOLD: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupCostsInput {
    pub fixed_assets: Ledger<FixedAsset>,
    pub startup_expenses: Ledger<StartupExpense>,
    /// Operating money held back to cover the first months.
    pub working_capital: Decimal,
}

impl Default for StartupCostsInput {
    fn default() -> Self {
        Self {
            fixed_assets: Ledger::new(vec![
                FixedAsset::new("Commercial Real Estate", 39),
                FixedAsset::new("Leasehold Improvements", 15),
                FixedAsset::new("Furniture / Fixtures", 7),
                FixedAsset::new("Equipment", 5),
                FixedAsset::new("Vehicles", 5),
            ]),
            startup_expenses: Ledger::new(vec![
                StartupExpense::new("Rent / Utility Deposits"),
                StartupExpense::new("Prepaid Expenses (Insurance, etc.)"),
                StartupExpense::new("Starting Inventory"),
                StartupExpense::new("Pre-Launch Salaries & Wages"),
            ]),
            working_capital: Decimal::ZERO,
        }
    }
}

impl StartupCostsInput {
    pub fn set_working_capital(
        &mut self,
        value: &str,
    ) {
        self.working_capital = parse_amount(value);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupCostsResult {
    pub total_fixed_assets: Decimal,
    pub total_startup_expenses: Decimal,
    pub working_capital: Decimal,
    pub total_funds_needed: Decimal,
}

impl StartupCostsResult {
    pub fn exceeds_warning_threshold(&self) -> bool {
        self.total_funds_needed > LARGE_TOTAL_WARNING_THRESHOLD
    }
}

pub struct StartupCostsCalculator;

impl StartupCostsCalculator {
    pub fn calculate(input: &StartupCostsInput) -> StartupCostsResult {
        let total_fixed_assets = input.fixed_assets.total();
        let total_startup_expenses = input.startup_expenses.total();
        StartupCostsResult {
            total_fixed_assets,
            total_startup_expenses,
            working_capital: input.working_capital,
            total_funds_needed: saturating_sum([total_fixed_assets, total_startup_expenses, input.working_capital]),
        }
    }
}

impl Calculator for StartupCostsCalculator {
    const SCOPE: &'static str = "startupCosts";
    type Input = StartupCostsInput;
    type Snapshot = StartupCostsInput;
    type Output = StartupCostsResult;

    fn compute(
        input: &StartupCostsInput,
        _store: &BusinessPlanStore,
    ) -> StartupCostsResult {
        Self::calculate(input)
    }

    fn publish(
        output: &StartupCostsResult,
        store: &BusinessPlanStore,
    ) -> bool {
        store.startup_costs.publish(StartupCostsAggregate {
            total_funds_needed: output.total_funds_needed,
        })
    }

    fn snapshot(input: &StartupCostsInput) -> StartupCostsInput {
        input.clone()
    }

    fn restore(snapshot: &StartupCostsInput) -> StartupCostsInput {
        snapshot.clone()
    }
}
