//! The business plan: every calculator session over one store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::calculations::{
    CostOfSalesCalculator, CostOfSalesSnapshot, Dashboard, OpexCalculator, SalesForecastCalculator,
    SourceOfFundsCalculator, StartupCostsCalculator, SummaryStatement, WorkforceCalculator, WorkforceInput,
};
use crate::confirm::{self, Confirmation, Outcome};
use crate::db::PlanRepository;
use crate::ledger::Ledger;
use crate::models::{ForecastYear, Product, SavedCalculation, Timeframe, WorkforceAggregate};
use crate::notify::{Notice, SyncNotifier};
use crate::session::CalculatorSession;
use crate::store::BusinessPlanStore;

pub const DEFAULT_WORKFORCE_SYNC_INTERVAL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSettings {
    /// Minimum gap between two "salaries updated" notices. Zero disables
    /// the limit.
    pub workforce_sync_interval: Duration,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            workforce_sync_interval: DEFAULT_WORKFORCE_SYNC_INTERVAL,
        }
    }
}

pub struct BusinessPlan {
    store: Arc<BusinessPlanStore>,
    pub startup_costs: CalculatorSession<StartupCostsCalculator>,
    pub funding_sources: CalculatorSession<SourceOfFundsCalculator>,
    pub cost_of_sales: CalculatorSession<CostOfSalesCalculator>,
    pub sales_forecast: CalculatorSession<SalesForecastCalculator>,
    workforce: CalculatorSession<WorkforceCalculator>,
    pub opex: CalculatorSession<OpexCalculator>,
    workforce_updates: watch::Receiver<Option<WorkforceAggregate>>,
    notifier: SyncNotifier,
    notices: Vec<Notice>,
}

impl BusinessPlan {
    /// Opens every calculator against `repo`, upstream calculators first so
    /// that dependants see their aggregates.
    pub async fn open(
        repo: Arc<dyn PlanRepository>,
        settings: PlanSettings,
    ) -> Self {
        let store = Arc::new(BusinessPlanStore::new());
        let startup_costs = CalculatorSession::open(repo.clone(), store.clone()).await;
        let funding_sources = CalculatorSession::open(repo.clone(), store.clone()).await;
        let cost_of_sales = CalculatorSession::open(repo.clone(), store.clone()).await;
        let sales_forecast = CalculatorSession::open(repo.clone(), store.clone()).await;
        let workforce = CalculatorSession::open(repo.clone(), store.clone()).await;
        let mut opex: CalculatorSession<OpexCalculator> = CalculatorSession::open(repo, store.clone()).await;

        // A coupling saved as enabled picks up the current workforce total
        // without telling the user about it.
        opex.sync_workforce().await;

        tracing::info!(
            sync_interval_ms = settings.workforce_sync_interval.as_millis() as u64,
            "business plan opened"
        );
        Self {
            workforce_updates: store.workforce.subscribe(),
            store,
            startup_costs,
            funding_sources,
            cost_of_sales,
            sales_forecast,
            workforce,
            opex,
            notifier: SyncNotifier::new(settings.workforce_sync_interval),
            notices: Vec::new(),
        }
    }

    pub fn store(&self) -> &BusinessPlanStore {
        &self.store
    }

    /// Propagates aggregate changes that other calculators act on. Today
    /// that is the workforce total feeding the opex salaries row.
    pub async fn refresh(&mut self) {
        if !self.workforce_updates.has_changed().unwrap_or(false) {
            return;
        }
        self.workforce_updates.mark_unchanged();
        if let Some((previous, current)) = self.opex.sync_workforce().await {
            if let Some(notice) = self.notifier.on_sync(previous, current) {
                self.notices.push(notice);
            }
        }
    }

    /// Read access to the workforce calculator. Changes go through the
    /// `*_workforce` methods so the opex coupling never goes stale.
    pub fn workforce(&self) -> &CalculatorSession<WorkforceCalculator> {
        &self.workforce
    }

    /// Edits the workforce calculator and refreshes its dependants.
    pub async fn edit_workforce<R>(
        &mut self,
        f: impl FnOnce(&mut WorkforceInput) -> R,
    ) -> R {
        let result = self.workforce.edit(f).await;
        self.refresh().await;
        result
    }

    pub async fn clear_workforce(
        &mut self,
        confirmation: Confirmation,
    ) -> Outcome {
        let outcome = self.workforce.clear_all(confirmation).await;
        self.refresh().await;
        outcome
    }

    pub async fn load_workforce(
        &mut self,
        index: usize,
        confirmation: Confirmation,
    ) -> Outcome {
        let outcome = self.workforce.load_saved(index, confirmation).await;
        self.refresh().await;
        outcome
    }

    pub async fn save_workforce_as(
        &mut self,
        name: &str,
    ) -> Option<usize> {
        self.workforce.save_as(name).await
    }

    pub async fn delete_saved_workforce(
        &mut self,
        index: usize,
        confirmation: Confirmation,
    ) -> Outcome {
        self.workforce.delete_saved(index, confirmation).await
    }

    pub fn summary(&self) -> SummaryStatement {
        SummaryStatement::from_store(&self.store)
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::from_store(&self.store)
    }

    /// Replaces the `year` product ledger with one product built from saved
    /// cost-of-sales calculation `saved_index`.
    pub async fn import_from_cost_of_sales(
        &mut self,
        saved_index: usize,
        year: ForecastYear,
        confirmation: Confirmation,
    ) -> Outcome {
        let Some(record) = self.cost_of_sales.saved().get(saved_index) else {
            return Outcome::NotFound;
        };
        if !confirmation.is_granted() {
            return Outcome::NeedsConfirmation(confirm::import_prompt(&record.name));
        }
        let product = Product {
            name: record.name.clone(),
            cost_per_item: record.state.cost_per_unit,
            selling_price: record.state.selling_price,
            quantity: None,
            timeframe: Timeframe::Month,
        };
        tracing::info!(name = %product.name, year = year.as_str(), "cost of sales imported into forecast");
        self.sales_forecast
            .edit(|input| input.products.get_mut(year).replace_all(vec![product]))
            .await;
        Outcome::Applied
    }

    /// Saves forecast product `index` of `year` as a cost-of-sales
    /// calculation and returns the new record's index.
    pub async fn export_product_to_cost_of_sales(
        &mut self,
        year: ForecastYear,
        index: usize,
    ) -> Option<usize> {
        let product = self.sales_forecast.input().products.get(year).get(index)?.clone();
        let record = SavedCalculation::new(
            product.name,
            CostOfSalesSnapshot {
                is_product: true,
                cost_per_unit: product.cost_per_item,
                selling_price: product.selling_price,
                materials: Ledger::default(),
            },
        );
        Some(self.cost_of_sales.push_saved(record).await)
    }

    /// Drains notices from the plan and every calculator.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        let mut notices = std::mem::take(&mut self.notices);
        notices.extend(self.startup_costs.take_notices());
        notices.extend(self.funding_sources.take_notices());
        notices.extend(self.cost_of_sales.take_notices());
        notices.extend(self.sales_forecast.take_notices());
        notices.extend(self.workforce.take_notices());
        notices.extend(self.opex.take_notices());
        notices
    }
}
