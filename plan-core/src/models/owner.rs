use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::format::parse_amount;
use crate::ledger::LineItem;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// An owner drawing a salary. Monthly and annual figures are kept in step:
/// editing either one recomputes the other.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub name: String,
    pub monthly_salary: Decimal,
    pub annual_salary: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerField {
    Name,
    MonthlySalary,
    AnnualSalary,
}

impl LineItem for Owner {
    type Field = OwnerField;

    fn update_field(
        &mut self,
        field: OwnerField,
        value: &str,
    ) {
        match field {
            OwnerField::Name => self.name = value.to_string(),
            OwnerField::MonthlySalary => {
                self.monthly_salary = parse_amount(value);
                self.annual_salary = round_half_up(self.monthly_salary.saturating_mul(MONTHS_PER_YEAR));
            }
            OwnerField::AnnualSalary => {
                self.annual_salary = parse_amount(value);
                self.monthly_salary = round_half_up(self.annual_salary / MONTHS_PER_YEAR);
            }
        }
    }

    fn total_value(&self) -> Decimal {
        self.annual_salary
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn monthly_salary_drives_annual() {
        let mut owner = Owner::default();

        owner.update_field(OwnerField::MonthlySalary, "4,500");

        assert_eq!(owner.annual_salary, dec!(54000));
    }

    #[test]
    fn annual_salary_drives_monthly_to_cents() {
        let mut owner = Owner::default();

        owner.update_field(OwnerField::AnnualSalary, "50000");

        assert_eq!(owner.monthly_salary, dec!(4166.67));
        assert_eq!(owner.total_value(), dec!(50000));
    }
}
