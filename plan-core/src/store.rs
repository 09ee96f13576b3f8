//! The shared business-plan store.
//!
//! One observable slot per calculator. A slot starts empty and is overwritten
//! wholesale each time its owning calculator publishes. Readers either take
//! the current value with [`Slot::get`] / [`Slot::value_or_default`] or
//! subscribe for change notifications.
//!
//! The store is passed explicitly to every calculator session; there is no
//! global instance.

use tokio::sync::watch;

use crate::models::{
    CostOfSalesAggregate, FundingAggregate, OpexAggregate, SalesForecastAggregate,
    StartupCostsAggregate, WorkforceAggregate,
};

/// A single observable aggregate.
#[derive(Debug)]
pub struct Slot<T> {
    name: &'static str,
    sender: watch::Sender<Option<T>>,
}

impl<T> Slot<T>
where
    T: Clone + PartialEq + Default,
{
    fn new(name: &'static str) -> Self {
        let (sender, _) = watch::channel(None);
        Self { name, sender }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Publishes `value`. Subscribers are only woken when it differs from
    /// what the slot already holds; returns whether it did.
    pub fn publish(
        &self,
        value: T,
    ) -> bool {
        let changed = self.sender.send_if_modified(|current| {
            if current.as_ref() == Some(&value) {
                false
            } else {
                *current = Some(value);
                true
            }
        });
        if changed {
            tracing::debug!(slot = self.name, "aggregate published");
        }
        changed
    }

    /// The last published value, or `None` before the first publish.
    pub fn get(&self) -> Option<T> {
        self.sender.borrow().clone()
    }

    /// The last published value with every absent field read as zero.
    pub fn value_or_default(&self) -> T {
        self.get().unwrap_or_default()
    }

    pub fn is_published(&self) -> bool {
        self.sender.borrow().is_some()
    }

    /// Receives a notification on every effective publish.
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.sender.subscribe()
    }
}

/// Typed aggregate slots for every calculator.
#[derive(Debug)]
pub struct BusinessPlanStore {
    pub startup_costs: Slot<StartupCostsAggregate>,
    pub funding_sources: Slot<FundingAggregate>,
    pub cost_of_sales: Slot<CostOfSalesAggregate>,
    pub sales_forecast: Slot<SalesForecastAggregate>,
    pub workforce: Slot<WorkforceAggregate>,
    pub opex: Slot<OpexAggregate>,
}

impl BusinessPlanStore {
    pub fn new() -> Self {
        Self {
            startup_costs: Slot::new("startupCosts"),
            funding_sources: Slot::new("fundingSources"),
            cost_of_sales: Slot::new("costOfSales"),
            sales_forecast: Slot::new("salesForecast"),
            workforce: Slot::new("workforce"),
            opex: Slot::new("opex"),
        }
    }
}

impl Default for BusinessPlanStore {
    fn default() -> Self {
        Self::new()
    }
}
