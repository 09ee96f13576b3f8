use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::parse_amount;
use crate::ledger::LineItem;

/// How often an operating expense is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Frequency {
    Weekly,
    #[serde(rename = "Bi-weekly")]
    BiWeekly,
    #[default]
    Monthly,
    Quarterly,
    Annually,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Self::Weekly,
        Self::BiWeekly,
        Self::Monthly,
        Self::Quarterly,
        Self::Annually,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Bi-weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Annually => "Annually",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Weekly" => Some(Self::Weekly),
            "Bi-weekly" => Some(Self::BiWeekly),
            "Monthly" => Some(Self::Monthly),
            "Quarterly" => Some(Self::Quarterly),
            "Annually" => Some(Self::Annually),
            _ => None,
        }
    }

    /// Converts an amount paid at this frequency to its monthly equivalent.
    pub fn to_monthly(
        &self,
        amount: Decimal,
    ) -> Decimal {
        match self {
            Self::Weekly => amount.saturating_mul(Decimal::from(52)) / Decimal::from(12),
            Self::BiWeekly => amount.saturating_mul(Decimal::from(26)) / Decimal::from(12),
            Self::Monthly => amount,
            Self::Quarterly => amount / Decimal::from(3),
            Self::Annually => amount / Decimal::from(12),
        }
    }
}

/// A recurring operating expense.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Expense {
    pub name: String,
    pub amount: Decimal,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseField {
    Name,
    Amount,
    Frequency,
}

impl Expense {
    pub fn monthly(
        name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            frequency: Frequency::Monthly,
        }
    }

    pub fn monthly_amount(&self) -> Decimal {
        self.frequency.to_monthly(self.amount)
    }
}

impl LineItem for Expense {
    type Field = ExpenseField;

    fn update_field(
        &mut self,
        field: ExpenseField,
        value: &str,
    ) {
        match field {
            ExpenseField::Name => self.name = value.to_string(),
            ExpenseField::Amount => self.amount = parse_amount(value),
            ExpenseField::Frequency => match Frequency::parse(value) {
                Some(frequency) => self.frequency = frequency,
                None => tracing::debug!(value, "unknown frequency ignored"),
            },
        }
    }

    fn total_value(&self) -> Decimal {
        self.monthly_amount()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_half_up;

    #[test]
    fn annual_amount_divides_by_twelve() {
        assert_eq!(Frequency::Annually.to_monthly(dec!(1200)), dec!(100));
    }

    #[test]
    fn weekly_amount_scales_by_52_over_12() {
        assert_eq!(round_half_up(Frequency::Weekly.to_monthly(dec!(100))), dec!(433.33));
    }

    #[test]
    fn bi_weekly_and_quarterly_amounts() {
        assert_eq!(Frequency::BiWeekly.to_monthly(dec!(120)), dec!(260));
        assert_eq!(Frequency::Quarterly.to_monthly(dec!(900)), dec!(300));
    }

    #[test]
    fn bi_weekly_keeps_hyphenated_name() {
        let json = serde_json::to_value(Frequency::BiWeekly).unwrap();

        assert_eq!(json, "Bi-weekly");
        assert_eq!(Frequency::parse("Bi-weekly"), Some(Frequency::BiWeekly));
    }
}
