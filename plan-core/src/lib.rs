//! Financial calculators for a small-business plan.
//!
//! Six calculators (startup costs, sources of funds, cost of sales, sales
//! forecast, workforce and operating expenses) publish aggregates to a shared
//! [`store::BusinessPlanStore`]; the summary statement and dashboard read
//! them back. [`plan::BusinessPlan`] opens every calculator against one
//! storage backend.

pub mod calculations;
pub mod confirm;
pub mod db;
pub mod format;
pub mod ledger;
pub mod models;
pub mod notify;
pub mod persist;
pub mod plan;
pub mod session;
pub mod store;

pub use confirm::{Confirmation, Outcome};
pub use db::{DbConfig, PlanRepository, RepositoryError, RepositoryRegistry};
pub use ledger::{Ledger, LineItem};
pub use models::*;
pub use notify::{Notice, NoticeLevel};
pub use plan::{BusinessPlan, PlanSettings};
pub use session::{Calculator, CalculatorSession};
pub use store::BusinessPlanStore;
