use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::parse_amount;
use crate::ledger::LineItem;

/// One component of a product's unit cost.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub cost: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialField {
    Name,
    Cost,
}

impl Material {
    /// A zero-cost material labelled by its position, e.g. `Material 3`.
    pub fn numbered(position: usize) -> Self {
        Self {
            name: format!("Material {position}"),
            cost: Decimal::ZERO,
        }
    }
}

impl LineItem for Material {
    type Field = MaterialField;

    fn update_field(
        &mut self,
        field: MaterialField,
        value: &str,
    ) {
        match field {
            MaterialField::Name => self.name = value.to_string(),
            MaterialField::Cost => self.cost = parse_amount(value),
        }
    }

    fn total_value(&self) -> Decimal {
        self.cost
    }
}
