use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::{parse_amount, parse_count};
use crate::ledger::LineItem;

/// A long-lived purchase listed under startup costs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedAsset {
    pub name: String,
    pub amount: Decimal,
    /// Informational only; no depreciation schedule is derived from it.
    pub depreciation_years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedAssetField {
    Name,
    Amount,
    DepreciationYears,
}

impl FixedAsset {
    pub fn new(
        name: impl Into<String>,
        depreciation_years: u32,
    ) -> Self {
        Self {
            name: name.into(),
            amount: Decimal::ZERO,
            depreciation_years,
        }
    }
}

impl LineItem for FixedAsset {
    type Field = FixedAssetField;

    fn update_field(
        &mut self,
        field: FixedAssetField,
        value: &str,
    ) {
        match field {
            FixedAssetField::Name => self.name = value.to_string(),
            FixedAssetField::Amount => self.amount = parse_amount(value),
            FixedAssetField::DepreciationYears => self.depreciation_years = parse_count(value),
        }
    }

    fn total_value(&self) -> Decimal {
        self.amount
    }
}

/// A one-off expense incurred before opening.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StartupExpense {
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupExpenseField {
    Name,
    Amount,
}

impl StartupExpense {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: Decimal::ZERO,
        }
    }
}

impl LineItem for StartupExpense {
    type Field = StartupExpenseField;

    fn update_field(
        &mut self,
        field: StartupExpenseField,
        value: &str,
    ) {
        match field {
            StartupExpenseField::Name => self.name = value.to_string(),
            StartupExpenseField::Amount => self.amount = parse_amount(value),
        }
    }

    fn total_value(&self) -> Decimal {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn depreciation_years_are_whole_numbers() {
        let mut asset = FixedAsset::new("Equipment", 5);

        asset.update_field(FixedAssetField::DepreciationYears, "7.5");

        assert_eq!(asset.depreciation_years, 7);
    }

    #[test]
    fn depreciation_years_do_not_count_toward_total() {
        let mut asset = FixedAsset::new("Vehicles", 5);
        asset.update_field(FixedAssetField::Amount, "12,000");

        assert_eq!(asset.total_value(), dec!(12000));
    }
}
