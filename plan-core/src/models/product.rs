use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::parse_amount;
use crate::ledger::LineItem;

const DAYS_PER_YEAR: Decimal = Decimal::from_parts(365, 0, 0, false, 0);
const DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The period a product's quantity is entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Timeframe {
    Day,
    #[default]
    Month,
    Year,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "day" => Some(Self::Day),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }
}

/// One of the three forecast years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForecastYear {
    Year1,
    Year2,
    Year3,
}

impl ForecastYear {
    pub const ALL: [ForecastYear; 3] = [Self::Year1, Self::Year2, Self::Year3];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year1 => "year1",
            Self::Year2 => "year2",
            Self::Year3 => "year3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Year1 => "Year 1",
            Self::Year2 => "Year 2",
            Self::Year3 => "Year 3",
        }
    }
}

/// One value per forecast year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearMap<T> {
    pub year1: T,
    pub year2: T,
    pub year3: T,
}

impl<T> YearMap<T> {
    pub fn from_fn(mut f: impl FnMut(ForecastYear) -> T) -> Self {
        Self {
            year1: f(ForecastYear::Year1),
            year2: f(ForecastYear::Year2),
            year3: f(ForecastYear::Year3),
        }
    }

    pub fn get(
        &self,
        year: ForecastYear,
    ) -> &T {
        match year {
            ForecastYear::Year1 => &self.year1,
            ForecastYear::Year2 => &self.year2,
            ForecastYear::Year3 => &self.year3,
        }
    }

    pub fn get_mut(
        &mut self,
        year: ForecastYear,
    ) -> &mut T {
        match year {
            ForecastYear::Year1 => &mut self.year1,
            ForecastYear::Year2 => &mut self.year2,
            ForecastYear::Year3 => &mut self.year3,
        }
    }

    pub fn map<U>(
        &self,
        mut f: impl FnMut(ForecastYear, &T) -> U,
    ) -> YearMap<U> {
        YearMap::from_fn(|year| f(year, self.get(year)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ForecastYear, &T)> {
        ForecastYear::ALL.into_iter().map(move |year| (year, self.get(year)))
    }
}

/// A product or service line in the sales forecast.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub cost_per_item: Decimal,
    pub selling_price: Decimal,
    /// Units sold per `timeframe`; `None` is a blank entry and counts as zero.
    pub quantity: Option<Decimal>,
    pub timeframe: Timeframe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    CostPerItem,
    SellingPrice,
    Quantity,
    Timeframe,
}

impl Product {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn quantity_or_zero(&self) -> Decimal {
        self.quantity.unwrap_or(Decimal::ZERO)
    }

    /// Quantity normalised to units per year.
    pub fn per_year_quantity(&self) -> Decimal {
        let quantity = self.quantity_or_zero();
        match self.timeframe {
            Timeframe::Day => quantity.saturating_mul(DAYS_PER_YEAR),
            Timeframe::Month => quantity.saturating_mul(MONTHS_PER_YEAR),
            Timeframe::Year => quantity,
        }
    }

    /// Quantity normalised to units per 30-day month.
    pub fn per_month_quantity(&self) -> Decimal {
        let quantity = self.quantity_or_zero();
        match self.timeframe {
            Timeframe::Day => quantity.saturating_mul(DAYS_PER_MONTH),
            Timeframe::Month => quantity,
            Timeframe::Year => quantity / MONTHS_PER_YEAR,
        }
    }

    /// Quantity normalised to units per day.
    pub fn per_day_quantity(&self) -> Decimal {
        let quantity = self.quantity_or_zero();
        match self.timeframe {
            Timeframe::Day => quantity,
            Timeframe::Month => quantity / DAYS_PER_MONTH,
            Timeframe::Year => quantity / DAYS_PER_YEAR,
        }
    }

    pub fn sales(&self) -> Decimal {
        self.selling_price.saturating_mul(self.per_year_quantity())
    }

    pub fn cost_of_goods_sold(&self) -> Decimal {
        self.cost_per_item.saturating_mul(self.per_year_quantity())
    }

    pub fn gross_profit(&self) -> Decimal {
        self.sales().saturating_sub(self.cost_of_goods_sold())
    }
}

impl LineItem for Product {
    type Field = ProductField;

    fn update_field(
        &mut self,
        field: ProductField,
        value: &str,
    ) {
        match field {
            ProductField::Name => self.name = value.to_string(),
            ProductField::CostPerItem => self.cost_per_item = parse_amount(value),
            ProductField::SellingPrice => self.selling_price = parse_amount(value),
            ProductField::Quantity => {
                self.quantity = if value.trim().is_empty() {
                    None
                } else {
                    Some(parse_amount(value))
                };
            }
            ProductField::Timeframe => match Timeframe::parse(value) {
                Some(timeframe) => self.timeframe = timeframe,
                None => tracing::debug!(value, "unknown timeframe ignored"),
            },
        }
    }

    fn total_value(&self) -> Decimal {
        self.sales()
    }
}
