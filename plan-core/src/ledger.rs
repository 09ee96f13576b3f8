//! Ordered, editable lists of line items.
//!
//! Every calculator keeps one or more [`Ledger`]s (fixed assets, funding
//! sources, materials, products, owners, employees, expenses). A ledger
//! preserves insertion order, never deduplicates names, and tolerates
//! out-of-range indices by doing nothing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::saturating_sum;

/// A row that can live in a [`Ledger`].
pub trait LineItem: Clone {
    /// Identifies one editable column of the row.
    type Field: Copy + std::fmt::Debug;

    /// Applies raw form input to one field.
    ///
    /// Currency fields go through [`crate::format::parse_amount`], plain
    /// numeric fields through [`crate::format::parse_number`], and text is
    /// stored verbatim.
    fn update_field(
        &mut self,
        field: Self::Field,
        value: &str,
    );

    /// The figure this row contributes to [`Ledger::total`].
    fn total_value(&self) -> Decimal;
}

/// An ordered sequence of line items with a running total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger<T> {
    items: Vec<T>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Ledger<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: LineItem> Ledger<T> {
    /// Creates a ledger holding `items` in the given order.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Appends `item` and returns its index.
    pub fn add(
        &mut self,
        item: T,
    ) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    /// Removes the item at `index`. Out-of-range indices are a no-op.
    pub fn remove_at(
        &mut self,
        index: usize,
    ) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            tracing::debug!(index, len = self.items.len(), "remove ignored, index out of range");
            None
        }
    }

    /// Applies raw input to one field of the item at `index`.
    ///
    /// Returns `false` when the index is out of range.
    pub fn update_field(
        &mut self,
        index: usize,
        field: T::Field,
        value: &str,
    ) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.update_field(field, value);
                true
            }
            None => {
                tracing::debug!(index, ?field, "update ignored, index out of range");
                false
            }
        }
    }

    /// Sum of [`LineItem::total_value`] over all items; zero when empty.
    pub fn total(&self) -> Decimal {
        saturating_sum(self.items.iter().map(LineItem::total_value))
    }

    /// Replaces every item at once.
    pub fn replace_all(
        &mut self,
        items: Vec<T>,
    ) {
        self.items = items;
    }
}

impl<T> Ledger<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(
        &self,
        index: usize,
    ) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(
        &mut self,
        index: usize,
    ) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Ledger<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{StartupExpense, StartupExpenseField};

    fn expense(
        name: &str,
        amount: Decimal,
    ) -> StartupExpense {
        StartupExpense {
            name: name.to_string(),
            amount,
        }
    }

    fn sample() -> Ledger<StartupExpense> {
        Ledger::new(vec![
            expense("Deposits", dec!(1500)),
            expense("Inventory", dec!(4000)),
            expense("Insurance", dec!(650.50)),
        ])
    }

    #[test]
    fn empty_ledger_totals_zero() {
        let ledger: Ledger<StartupExpense> = Ledger::default();

        assert_eq!(ledger.total(), Decimal::ZERO);
        assert!(ledger.is_empty());
    }

    #[test]
    fn total_sums_every_item() {
        assert_eq!(sample().total(), dec!(6150.50));
    }

    #[test]
    fn total_ignores_insertion_order() {
        let mut reversed = sample().items().to_vec();
        reversed.reverse();

        assert_eq!(Ledger::new(reversed).total(), sample().total());
    }

    #[test]
    fn remove_then_readd_restores_total() {
        let mut ledger = sample();
        let before = ledger.total();

        let removed = ledger.remove_at(1).unwrap();
        assert_eq!(ledger.total(), dec!(2150.50));

        ledger.add(removed);
        assert_eq!(ledger.total(), before);
    }

    #[test]
    fn add_appends_without_name_checks() {
        let mut ledger = sample();

        let index = ledger.add(expense("Deposits", dec!(10)));

        assert_eq!(index, 3);
        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.get(3).unwrap().name, "Deposits");
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut ledger = sample();

        assert!(ledger.remove_at(10).is_none());
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn remove_preserves_order_of_remaining_items() {
        let mut ledger = sample();

        ledger.remove_at(0);

        let names: Vec<_> = ledger.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Inventory", "Insurance"]);
    }

    #[test]
    fn update_field_parses_currency_input() {
        let mut ledger = sample();

        assert!(ledger.update_field(0, StartupExpenseField::Amount, "2,750.25"));

        assert_eq!(ledger.get(0).unwrap().amount, dec!(2750.25));
    }

    #[test]
    fn update_field_out_of_range_returns_false() {
        let mut ledger = sample();

        assert!(!ledger.update_field(9, StartupExpenseField::Name, "x"));
    }

    #[test]
    fn serializes_as_plain_array() {
        let ledger = Ledger::new(vec![expense("Deposits", dec!(1500))]);

        let json = serde_json::to_value(&ledger).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["name"], "Deposits");
    }
}
