//! Wiring between configuration, storage backends and the plan.

use std::sync::Arc;

use anyhow::Context;
use plan_core::{BusinessPlan, NoticeLevel, RepositoryRegistry};
use plan_db_sqlite::SqliteRepositoryFactory;
use tracing::{debug, error, info};

use crate::config::AppConfig;

/// Every backend the binary can open.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::with_memory();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

pub async fn open_plan(config: &AppConfig) -> anyhow::Result<BusinessPlan> {
    let db_config = config.db_config();
    debug!(backend = %db_config.backend, "connecting to storage");

    let repo = build_registry()
        .create(&db_config)
        .await
        .with_context(|| format!("cannot open {} storage at '{}'", db_config.backend, db_config.connection_string))?;

    Ok(BusinessPlan::open(Arc::from(repo), config.plan_settings()).await)
}

/// Logs and drops whatever the plan has queued for the user.
pub fn drain_notices(plan: &mut BusinessPlan) -> usize {
    let notices = plan.take_notices();
    for notice in &notices {
        match notice.level {
            NoticeLevel::Info => info!("{}", notice.message),
            NoticeLevel::Error => error!("{}", notice.message),
        }
    }
    notices.len()
}
