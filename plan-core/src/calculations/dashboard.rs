//! Headline figures across every calculator.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::store::BusinessPlanStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_startup_costs: Decimal,
    pub total_funding: Decimal,
    /// Positive when underfunded.
    pub funding_gap: Decimal,
    /// Year-1 sales.
    pub projected_annual_revenue: Decimal,
    /// Year-1 cost of goods sold plus annual operating expenses.
    pub projected_annual_expenses: Decimal,
    pub projected_annual_profit: Decimal,
    pub monthly_debt_service: Decimal,
}

impl Dashboard {
    pub fn from_store(store: &BusinessPlanStore) -> Self {
        let startup = store.startup_costs.value_or_default();
        let funding = store.funding_sources.value_or_default();
        let year1 = store.sales_forecast.value_or_default().year1;
        let opex = store.opex.value_or_default();

        let projected_annual_expenses = year1.total_cogs.saturating_add(opex.total_annual_expenses);
        Self {
            total_startup_costs: startup.total_funds_needed,
            total_funding: funding.total_funding,
            funding_gap: startup.total_funds_needed.saturating_sub(funding.total_funding),
            projected_annual_revenue: year1.total_sales,
            projected_annual_expenses,
            projected_annual_profit: year1.total_sales.saturating_sub(projected_annual_expenses),
            monthly_debt_service: funding.total_monthly_payments,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{FundingAggregate, OpexAggregate, StartupCostsAggregate, YearMap, YearTotals};

    #[test]
    fn empty_store_is_all_zero() {
        assert_eq!(Dashboard::from_store(&BusinessPlanStore::new()), Dashboard::default());
    }

    #[test]
    fn combines_published_aggregates() {
        let store = BusinessPlanStore::new();
        store.startup_costs.publish(StartupCostsAggregate {
            total_funds_needed: dec!(80000),
        });
        store.funding_sources.publish(FundingAggregate {
            total_funding: dec!(70000),
            total_monthly_payments: dec!(950),
            total_annual_payments: dec!(11400),
        });
        store.sales_forecast.publish(YearMap::from_fn(|_| YearTotals {
            total_sales: dec!(300000),
            total_cogs: dec!(120000),
            ..YearTotals::default()
        }));
        store.opex.publish(OpexAggregate {
            total_annual_expenses: dec!(150000),
            ..OpexAggregate::default()
        });

        let dashboard = Dashboard::from_store(&store);

        assert_eq!(dashboard.funding_gap, dec!(10000));
        assert_eq!(dashboard.projected_annual_revenue, dec!(300000));
        assert_eq!(dashboard.projected_annual_expenses, dec!(270000));
        assert_eq!(dashboard.projected_annual_profit, dec!(30000));
        assert_eq!(dashboard.monthly_debt_service, dec!(950));
    }
}
