use std::path::PathBuf;
use std::sync::Arc;

use plan_core::db::{DbConfig, PlanRepository, RepositoryRegistry};
use plan_core::models::{ForecastYear, ProductField};
use plan_core::{BusinessPlan, Confirmation, PlanSettings};
use plan_db_sqlite::{SqliteRepository, SqliteRepositoryFactory};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

/// A database file unique to one test, removed on drop.
struct TempDatabase(PathBuf);

impl TempDatabase {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("plan-db-sqlite-{}-{}.db", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        Self(path)
    }

    fn config(&self) -> DbConfig {
        DbConfig {
            backend: "sqlite".to_string(),
            connection_string: self.0.display().to_string(),
        }
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

async fn open_repo(db: &TempDatabase) -> Arc<dyn PlanRepository> {
    let mut registry = RepositoryRegistry::with_memory();
    registry.register(Box::new(SqliteRepositoryFactory));
    let repo = registry
        .create(&db.config())
        .await
        .expect("sqlite repository should open");
    Arc::from(repo)
}

#[tokio::test]
async fn plan_survives_reopening_the_database() {
    let db = TempDatabase::new("reopen");

    {
        let mut plan = BusinessPlan::open(open_repo(&db).await, PlanSettings::default()).await;
        plan.sales_forecast
            .edit(|input| {
                let products = input.products.get_mut(ForecastYear::Year1);
                products.update_field(0, ProductField::SellingPrice, "25");
                products.update_field(0, ProductField::Quantity, "100");
            })
            .await;
        plan.sales_forecast.save_as("Opening month").await;
        assert!(plan.take_notices().is_empty());
    }

    let plan = BusinessPlan::open(open_repo(&db).await, PlanSettings::default()).await;

    assert_eq!(plan.summary().years.year1.sales, dec!(30000));
    assert_eq!(plan.sales_forecast.saved().len(), 1);
    assert_eq!(plan.sales_forecast.saved()[0].name, "Opening month");
}

#[tokio::test]
async fn clear_all_removes_state_row_only() {
    let db = TempDatabase::new("clear");
    let mut plan = BusinessPlan::open(open_repo(&db).await, PlanSettings::default()).await;
    plan.cost_of_sales.edit(|input| input.set_selling_price("15")).await;
    plan.cost_of_sales.save_as("Mug").await;

    let outcome = plan.cost_of_sales.clear_all(Confirmation::Granted).await;
    assert!(outcome.is_applied());

    let repo = SqliteRepository::new(&db.0.display().to_string())
        .await
        .expect("database should reopen");
    let keys = repo.keys().await.unwrap();
    assert!(keys.contains(&"costOfSales.saved".to_string()));
    assert!(!keys.contains(&"costOfSales.state".to_string()));
}
