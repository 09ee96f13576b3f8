//! Three-year sales forecast.
//!
//! Each year keeps its own product ledger, so editing a product in year 1
//! leaves years 2 and 3 alone. Quantities are annualised from their entry
//! period (365-day years, 30-day months) before pricing:
//!
//! ```text
//! sales        = selling price * annual quantity
//! cogs         = cost per item * annual quantity
//! gross profit = sales - cogs
//! ```
//!
//! Years 2 and 3 then scale their totals by `1 + increase / 100`, where the
//! increase is a user-set percentage for that year. Year 1 never grows.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use plan_core::calculations::sales_forecast::{SalesForecastCalculator, SalesForecastInput};
//! use plan_core::models::{ForecastYear, ProductField};
//!
//! let mut input = SalesForecastInput::default();
//! for year in ForecastYear::ALL {
//!     let products = input.products.get_mut(year);
//!     products.update_field(0, ProductField::SellingPrice, "100");
//!     products.update_field(0, ProductField::Quantity, "1000");
//!     products.update_field(0, ProductField::Timeframe, "year");
//! }
//! input.set_percent_increase(ForecastYear::Year2, "10");
//!
//! let result = SalesForecastCalculator::calculate(&input);
//! assert_eq!(result.years.year1.totals.total_sales, dec!(100000));
//! assert_eq!(result.years.year2.totals.total_sales, dec!(110000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{growth_factor, percent_of, saturating_sum};
use crate::format::parse_number;
use crate::ledger::Ledger;
use crate::models::{ForecastYear, Product, SalesForecastAggregate, YearMap, YearTotals};
use crate::session::Calculator;
use crate::store::BusinessPlanStore;

/// Year-over-year increases in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PercentIncrease {
    pub year2: Decimal,
    pub year3: Decimal,
}

impl PercentIncrease {
    pub fn for_year(
        &self,
        year: ForecastYear,
    ) -> Decimal {
        match year {
            ForecastYear::Year1 => Decimal::ZERO,
            ForecastYear::Year2 => self.year2,
            ForecastYear::Year3 => self.year3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesForecastInput {
    pub products: YearMap<Ledger<Product>>,
    pub percent_increase: PercentIncrease,
}

impl Default for SalesForecastInput {
    fn default() -> Self {
        Self {
            products: YearMap::from_fn(|_| Ledger::new(vec![Product::named("Product 1"), Product::named("Service 1")])),
            percent_increase: PercentIncrease::default(),
        }
    }
}

impl SalesForecastInput {
    /// Sets a year's growth percentage. Year 1 has none and is ignored.
    pub fn set_percent_increase(
        &mut self,
        year: ForecastYear,
        value: &str,
    ) {
        let percent = parse_number(value);
        match year {
            ForecastYear::Year1 => tracing::debug!("year 1 has no growth rate"),
            ForecastYear::Year2 => self.percent_increase.year2 = percent,
            ForecastYear::Year3 => self.percent_increase.year3 = percent,
        }
    }

    /// Appends a blank product to `year`, named after its position.
    pub fn add_product(
        &mut self,
        year: ForecastYear,
    ) -> usize {
        let products = self.products.get_mut(year);
        let position = products.len() + 1;
        products.add(Product::named(format!("Product/Service {position}")))
    }
}

/// Display figures for one product in one year. Growth is not applied here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLine {
    pub per_day: Decimal,
    pub per_month: Decimal,
    pub per_year: Decimal,
    pub sales: Decimal,
    pub cost_of_goods_sold: Decimal,
    pub gross_profit: Decimal,
}

impl From<&Product> for ProductLine {
    fn from(product: &Product) -> Self {
        Self {
            per_day: product.per_day_quantity(),
            per_month: product.per_month_quantity(),
            per_year: product.per_year_quantity(),
            sales: product.sales(),
            cost_of_goods_sold: product.cost_of_goods_sold(),
            gross_profit: product.gross_profit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearForecast {
    pub products: Vec<ProductLine>,
    pub totals: YearTotals,
}

/// Totals over all three years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreeYearSummary {
    pub total_sales: Decimal,
    pub total_gross_profit: Decimal,
    /// Total gross profit over total sales, in percentage points.
    pub average_gross_profit_margin: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesForecastResult {
    pub years: YearMap<YearForecast>,
    pub summary: ThreeYearSummary,
}

impl SalesForecastResult {
    pub fn aggregate(&self) -> SalesForecastAggregate {
        self.years.map(|_, year| year.totals)
    }
}

pub struct SalesForecastCalculator;

impl SalesForecastCalculator {
    pub fn calculate(input: &SalesForecastInput) -> SalesForecastResult {
        let years = input.products.map(|year, ledger| {
            Self::calculate_year(ledger, input.percent_increase.for_year(year))
        });

        let total_sales = saturating_sum(years.iter().map(|(_, y)| y.totals.total_sales));
        let total_gross_profit = saturating_sum(years.iter().map(|(_, y)| y.totals.total_gross_profit));

        SalesForecastResult {
            summary: ThreeYearSummary {
                total_sales,
                total_gross_profit,
                average_gross_profit_margin: percent_of(total_gross_profit, total_sales),
            },
            years,
        }
    }

    fn calculate_year(
        ledger: &Ledger<Product>,
        percent_increase: Decimal,
    ) -> YearForecast {
        let products: Vec<ProductLine> = ledger.iter().map(ProductLine::from).collect();
        let factor = growth_factor(percent_increase);

        let total_sales = saturating_sum(products.iter().map(|p| p.sales)).saturating_mul(factor);
        let total_cogs = saturating_sum(products.iter().map(|p| p.cost_of_goods_sold)).saturating_mul(factor);
        let total_quantity = saturating_sum(products.iter().map(|p| p.per_year)).saturating_mul(factor);
        let total_gross_profit = total_sales.saturating_sub(total_cogs);

        YearForecast {
            products,
            totals: YearTotals {
                total_sales,
                total_cogs,
                total_gross_profit,
                total_quantity,
                gross_profit_margin: percent_of(total_gross_profit, total_sales),
            },
        }
    }
}

impl Calculator for SalesForecastCalculator {
    const SCOPE: &'static str = "salesForecast";
    type Input = SalesForecastInput;
    type Snapshot = SalesForecastInput;
    type Output = SalesForecastResult;

    fn compute(
        input: &SalesForecastInput,
        _store: &BusinessPlanStore,
    ) -> SalesForecastResult {
        Self::calculate(input)
    }

    fn publish(
        output: &SalesForecastResult,
        store: &BusinessPlanStore,
    ) -> bool {
        store.sales_forecast.publish(output.aggregate())
    }

    fn snapshot(input: &SalesForecastInput) -> SalesForecastInput {
        input.clone()
    }

    fn restore(snapshot: &SalesForecastInput) -> SalesForecastInput {
        snapshot.clone()
    }
}
