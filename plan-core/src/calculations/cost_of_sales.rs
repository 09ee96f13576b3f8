//! Unit economics for a single product or service.
//!
//! `profit = selling price - unit cost` and
//! `margin = profit / selling price * 100` (zero for a zero price). A service
//! has no material cost whatever the materials list holds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::percent_of;
use crate::format::parse_amount;
use crate::ledger::Ledger;
use crate::models::{CostOfSalesAggregate, Material};
use crate::session::Calculator;
use crate::store::BusinessPlanStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfSalesInput {
    pub is_product: bool,
    pub materials: Ledger<Material>,
    pub selling_price: Decimal,
}

impl Default for CostOfSalesInput {
    fn default() -> Self {
        Self {
            is_product: true,
            materials: Ledger::new(vec![Material::numbered(1)]),
            selling_price: Decimal::ZERO,
        }
    }
}

impl CostOfSalesInput {
    pub fn set_selling_price(
        &mut self,
        value: &str,
    ) {
        self.selling_price = parse_amount(value);
    }

    /// Appends a zero-cost material named after its position.
    pub fn add_material(&mut self) -> usize {
        let position = self.materials.len() + 1;
        self.materials.add(Material::numbered(position))
    }

    /// Unit cost counted against the price.
    pub fn cost_per_unit(&self) -> Decimal {
        if self.is_product {
            self.materials.total()
        } else {
            Decimal::ZERO
        }
    }
}

/// What a saved cost-of-sales calculation records.
///
/// Records exported from the sales forecast carry no materials; restoring
/// one turns its unit cost into a single material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfSalesSnapshot {
    pub is_product: bool,
    pub cost_per_unit: Decimal,
    pub selling_price: Decimal,
    #[serde(default, skip_serializing_if = "Ledger::is_empty")]
    pub materials: Ledger<Material>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostOfSalesResult {
    pub is_product: bool,
    pub total_cost: Decimal,
    pub selling_price: Decimal,
    pub profit: Decimal,
    /// Percentage points.
    pub margin: Decimal,
}

pub struct CostOfSalesCalculator;

impl CostOfSalesCalculator {
    pub fn calculate(input: &CostOfSalesInput) -> CostOfSalesResult {
        let total_cost = input.cost_per_unit();
        let profit = input.selling_price.saturating_sub(total_cost);
        let margin = if input.selling_price > Decimal::ZERO {
            percent_of(profit, input.selling_price)
        } else {
            Decimal::ZERO
        };
        CostOfSalesResult {
            is_product: input.is_product,
            total_cost,
            selling_price: input.selling_price,
            profit,
            margin,
        }
    }
}

impl Calculator for CostOfSalesCalculator {
    const SCOPE: &'static str = "costOfSales";
    type Input = CostOfSalesInput;
    type Snapshot = CostOfSalesSnapshot;
    type Output = CostOfSalesResult;

    fn compute(
        input: &CostOfSalesInput,
        _store: &BusinessPlanStore,
    ) -> CostOfSalesResult {
        Self::calculate(input)
    }

    fn publish(
        output: &CostOfSalesResult,
        store: &BusinessPlanStore,
    ) -> bool {
        store.cost_of_sales.publish(CostOfSalesAggregate {
            is_product: output.is_product,
            cost_per_unit: output.total_cost,
            selling_price: output.selling_price,
            profit: output.profit,
            margin: output.margin,
        })
    }

    fn snapshot(input: &CostOfSalesInput) -> CostOfSalesSnapshot {
        CostOfSalesSnapshot {
            is_product: input.is_product,
            cost_per_unit: input.cost_per_unit(),
            selling_price: input.selling_price,
            materials: input.materials.clone(),
        }
    }

    fn restore(snapshot: &CostOfSalesSnapshot) -> CostOfSalesInput {
        let materials = if snapshot.materials.is_empty() {
            Ledger::new(vec![Material {
                cost: snapshot.cost_per_unit,
                ..Material::numbered(1)
            }])
        } else {
            snapshot.materials.clone()
        };
        CostOfSalesInput {
            is_product: snapshot.is_product,
            materials,
            selling_price: snapshot.selling_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::MaterialField;

    fn priced(
        costs: &[&str],
        price: &str,
    ) -> CostOfSalesInput {
        let mut input = CostOfSalesInput::default();
        input.materials.replace_all(Vec::new());
        for cost in costs {
            let index = input.add_material();
            input.materials.update_field(index, MaterialField::Cost, cost);
        }
        input.set_selling_price(price);
        input
    }

    #[test]
    fn profit_and_margin_from_materials() {
        let result = CostOfSalesCalculator::calculate(&priced(&["3.50", "1.50"], "20"));

        assert_eq!(result.total_cost, dec!(5));
        assert_eq!(result.profit, dec!(15));
        assert_eq!(result.margin, dec!(75));
    }

    #[test]
    fn zero_price_has_zero_margin() {
        let result = CostOfSalesCalculator::calculate(&priced(&["4"], "0"));

        assert_eq!(result.profit, dec!(-4));
        assert_eq!(result.margin, Decimal::ZERO);
    }

    #[test]
    fn service_ignores_material_costs() {
        let mut input = priced(&["40"], "100");
        input.is_product = false;

        let result = CostOfSalesCalculator::calculate(&input);

        assert_eq!(result.total_cost, Decimal::ZERO);
        assert_eq!(result.profit, dec!(100));
        assert_eq!(result.margin, dec!(100));
    }

    #[test]
    fn added_materials_are_numbered_by_position() {
        let mut input = CostOfSalesInput::default();

        input.add_material();
        input.add_material();

        let names: Vec<_> = input.materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Material 1", "Material 2", "Material 3"]);
    }

    #[test]
    fn snapshot_records_unit_cost() {
        let snapshot = CostOfSalesCalculator::snapshot(&priced(&["2", "3"], "9"));

        assert_eq!(snapshot.cost_per_unit, dec!(5));
        assert_eq!(snapshot.selling_price, dec!(9));
        assert!(snapshot.is_product);
    }

    #[test]
    fn restoring_record_without_materials_keeps_unit_cost() {
        let snapshot = CostOfSalesSnapshot {
            is_product: true,
            cost_per_unit: dec!(6),
            selling_price: dec!(10),
            materials: Ledger::default(),
        };

        let input = CostOfSalesCalculator::restore(&snapshot);

        assert_eq!(input.materials.len(), 1);
        assert_eq!(CostOfSalesCalculator::calculate(&input).total_cost, dec!(6));
    }
}
