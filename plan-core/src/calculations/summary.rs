//! Three-year profit and loss statement.
//!
//! Reads the sales forecast and operating expense aggregates and never
//! publishes anything itself. Operating expenses are not forecast per year,
//! so the same annual figure is charged against every year. Margins are
//! plain ratios (`0.4` for 40%) and fall back to zero when a year has no
//! sales. Anything not yet published reads as zero.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::common::ratio;
use crate::models::{OpexAggregate, SalesForecastAggregate, YearMap};
use crate::store::BusinessPlanStore;

/// One year's column in the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementYear {
    pub sales: Decimal,
    pub cost_of_goods_sold: Decimal,
    pub gross_profit: Decimal,
    pub gross_margin: Decimal,
    pub operating_expenses: Decimal,
    pub net_profit: Decimal,
    pub net_profit_margin: Decimal,
}

impl StatementYear {
    fn derive(
        sales: Decimal,
        gross_profit: Decimal,
        operating_expenses: Decimal,
    ) -> Self {
        let net_profit = gross_profit.saturating_sub(operating_expenses);
        Self {
            sales,
            cost_of_goods_sold: sales.saturating_sub(gross_profit),
            gross_profit,
            gross_margin: ratio(gross_profit, sales),
            operating_expenses,
            net_profit,
            net_profit_margin: ratio(net_profit, sales),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SummaryStatement {
    pub years: YearMap<StatementYear>,
}

impl SummaryStatement {
    pub fn from_aggregates(
        sales_forecast: &SalesForecastAggregate,
        opex: &OpexAggregate,
    ) -> Self {
        let years = sales_forecast.map(|_, totals| {
            StatementYear::derive(totals.total_sales, totals.total_gross_profit, opex.total_annual_expenses)
        });
        Self { years }
    }

    pub fn from_store(store: &BusinessPlanStore) -> Self {
        Self::from_aggregates(&store.sales_forecast.value_or_default(), &store.opex.value_or_default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{ForecastYear, YearTotals};

    fn forecast(
        sales: Decimal,
        gross_profit: Decimal,
    ) -> SalesForecastAggregate {
        YearMap::from_fn(|_| YearTotals {
            total_sales: sales,
            total_gross_profit: gross_profit,
            total_cogs: sales - gross_profit,
            ..YearTotals::default()
        })
    }

    fn opex(annual: Decimal) -> OpexAggregate {
        OpexAggregate {
            total_annual_expenses: annual,
            ..OpexAggregate::default()
        }
    }

    #[test]
    fn derives_cogs_and_net_profit() {
        let statement = SummaryStatement::from_aggregates(&forecast(dec!(1000), dec!(400)), &opex(dec!(200)));
        let year1 = statement.years.year1;

        assert_eq!(year1.cost_of_goods_sold, dec!(600));
        assert_eq!(year1.net_profit, dec!(200));
        assert_eq!(year1.gross_margin, dec!(0.4));
        assert_eq!(year1.net_profit_margin, dec!(0.2));
    }

    #[test]
    fn operating_expenses_repeat_every_year() {
        let statement = SummaryStatement::from_aggregates(&forecast(dec!(1000), dec!(400)), &opex(dec!(200)));

        for year in ForecastYear::ALL {
            assert_eq!(statement.years.get(year).operating_expenses, dec!(200));
        }
    }

    #[test]
    fn zero_sales_has_zero_margins() {
        let statement = SummaryStatement::from_aggregates(&forecast(Decimal::ZERO, Decimal::ZERO), &opex(dec!(500)));
        let year2 = statement.years.year2;

        assert_eq!(year2.net_profit, dec!(-500));
        assert_eq!(year2.gross_margin, Decimal::ZERO);
        assert_eq!(year2.net_profit_margin, Decimal::ZERO);
    }

    #[test]
    fn empty_store_reads_as_zero() {
        let statement = SummaryStatement::from_store(&BusinessPlanStore::new());

        assert_eq!(statement, SummaryStatement::default());
    }
}
