//! Operating expenses normalised to a monthly figure.
//!
//! With "use workforce data" enabled, the Salaries and Wages row mirrors the
//! Workforce calculator's total monthly cost. The row is then read-only: its
//! amount is overwritten on every sync and field edits are rejected.
//! Disabling the coupling leaves the last synced amount in place, editable
//! again.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{round_half_up, saturating_sum};
use crate::confirm::{self, Confirmation, Outcome};
use crate::ledger::Ledger;
use crate::models::{Expense, ExpenseField, Frequency, OpexAggregate};
use crate::session::{Calculator, CalculatorSession};
use crate::store::BusinessPlanStore;

pub const SALARIES_AND_WAGES: &str = "Salaries and Wages";

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpexInput {
    pub expenses: Ledger<Expense>,
    #[serde(default)]
    pub use_workforce_data: bool,
}

impl Default for OpexInput {
    fn default() -> Self {
        let seeds = [
            ("Rent", 2000),
            ("Utilities", 500),
            (SALARIES_AND_WAGES, 10000),
            ("Insurance", 300),
            ("Marketing and Advertising", 1000),
            ("Office Supplies", 200),
            ("Maintenance and Repairs", 300),
            ("Professional Services", 500),
            ("Technology and Software", 400),
            ("Travel and Transportation", 600),
        ];
        Self {
            expenses: Ledger::new(
                seeds
                    .into_iter()
                    .map(|(name, amount)| Expense::monthly(name, Decimal::from(amount)))
                    .collect(),
            ),
            use_workforce_data: false,
        }
    }
}

impl OpexInput {
    fn salaries_row(&self) -> Option<usize> {
        self.expenses.iter().position(|e| e.name == SALARIES_AND_WAGES)
    }

    /// Whether row `index` is currently driven by workforce data.
    pub fn is_locked(
        &self,
        index: usize,
    ) -> bool {
        self.use_workforce_data && self.salaries_row() == Some(index)
    }

    /// Overwrites the Salaries and Wages row with `monthly`, appending the row
    /// when it is missing. Returns whether anything changed.
    pub fn apply_workforce_salaries(
        &mut self,
        monthly: Decimal,
    ) -> bool {
        let amount = round_half_up(monthly);
        match self.salaries_row().and_then(|index| self.expenses.get_mut(index)) {
            Some(row) => {
                let changed = row.amount != amount || row.frequency != Frequency::Monthly;
                row.amount = amount;
                row.frequency = Frequency::Monthly;
                changed
            }
            None => {
                self.expenses.add(Expense::monthly(SALARIES_AND_WAGES, amount));
                true
            }
        }
    }
}

/// One pie-chart slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpexResult {
    /// Normalised monthly amount per row, parallel to the ledger.
    pub monthly_amounts: Vec<Decimal>,
    pub total_monthly_expenses: Decimal,
    pub total_annual_expenses: Decimal,
    pub chart: Vec<ChartSlice>,
    pub expenses: Vec<Expense>,
}

pub struct OpexCalculator;

impl OpexCalculator {
    pub fn calculate(input: &OpexInput) -> OpexResult {
        let monthly_amounts: Vec<Decimal> = input.expenses.iter().map(Expense::monthly_amount).collect();
        let total_monthly_expenses = saturating_sum(monthly_amounts.iter().copied());
        let chart = input
            .expenses
            .iter()
            .zip(&monthly_amounts)
            .map(|(expense, value)| ChartSlice {
                name: expense.name.clone(),
                value: *value,
            })
            .collect();

        OpexResult {
            monthly_amounts,
            total_monthly_expenses,
            total_annual_expenses: total_monthly_expenses.saturating_mul(MONTHS_PER_YEAR),
            chart,
            expenses: input.expenses.items().to_vec(),
        }
    }
}

impl Calculator for OpexCalculator {
    const SCOPE: &'static str = "opex";
    type Input = OpexInput;
    type Snapshot = OpexInput;
    type Output = OpexResult;

    fn compute(
        input: &OpexInput,
        _store: &BusinessPlanStore,
    ) -> OpexResult {
        Self::calculate(input)
    }

    fn publish(
        output: &OpexResult,
        store: &BusinessPlanStore,
    ) -> bool {
        store.opex.publish(OpexAggregate {
            total_monthly_expenses: output.total_monthly_expenses,
            total_annual_expenses: output.total_annual_expenses,
            expenses: output.expenses.clone(),
        })
    }

    fn snapshot(input: &OpexInput) -> OpexInput {
        input.clone()
    }

    fn restore(snapshot: &OpexInput) -> OpexInput {
        snapshot.clone()
    }
}

impl CalculatorSession<OpexCalculator> {
    /// Edits one field of row `index`. Rejected for a locked row.
    pub async fn update_expense(
        &mut self,
        index: usize,
        field: ExpenseField,
        value: &str,
    ) -> bool {
        if self.input().is_locked(index) {
            tracing::debug!(index, ?field, "edit rejected, row synced from workforce");
            return false;
        }
        self.edit(|input| input.expenses.update_field(index, field, value)).await
    }

    pub async fn add_expense(&mut self) -> usize {
        self.edit(|input| input.expenses.add(Expense::default())).await
    }

    /// Removes row `index`. Removing the synced row needs confirmation.
    pub async fn remove_expense(
        &mut self,
        index: usize,
        confirmation: Confirmation,
    ) -> Outcome {
        if index >= self.input().expenses.len() {
            return Outcome::NotFound;
        }
        if self.input().is_locked(index) && !confirmation.is_granted() {
            return Outcome::NeedsConfirmation(confirm::remove_synced_row_prompt(SALARIES_AND_WAGES));
        }
        self.edit(|input| input.expenses.remove_at(index)).await;
        Outcome::Applied
    }

    /// Turns the workforce coupling on or off. Turning it on syncs at once.
    pub async fn set_use_workforce_data(
        &mut self,
        enabled: bool,
    ) {
        let monthly = self.store.workforce.value_or_default().total_monthly_expenses;
        self.edit(|input| {
            input.use_workforce_data = enabled;
            if enabled {
                input.apply_workforce_salaries(monthly);
            }
        })
        .await;
        tracing::info!(enabled, "workforce coupling toggled");
    }

    /// Pulls the latest workforce monthly total into the Salaries and Wages
    /// row. Returns the previous and new amounts when the row changed.
    pub async fn sync_workforce(&mut self) -> Option<(Decimal, Decimal)> {
        if !self.input().use_workforce_data {
            return None;
        }
        let current = round_half_up(self.store.workforce.value_or_default().total_monthly_expenses);
        let row = self.input().salaries_row().and_then(|index| self.input().expenses.get(index));
        if row.is_some_and(|row| row.amount == current && row.frequency == Frequency::Monthly) {
            return None;
        }
        let previous = row.map_or(Decimal::ZERO, |row| row.amount);
        self.edit(|input| input.apply_workforce_salaries(current)).await;
        tracing::debug!(%previous, %current, "salaries and wages synced from workforce");
        Some((previous, current))
    }
}
