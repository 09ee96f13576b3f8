use async_trait::async_trait;
use plan_core::db::{DbConfig, PlanRepository, RepositoryError, RepositoryFactory};

use crate::repository::SqliteRepository;

/// Opens plan storage in a SQLite file.
///
/// `config.connection_string` is a file path (created when missing), a
/// `sqlite:` URL, or `:memory:`. The schema is migrated before the
/// repository is handed out.
///
/// ```rust,no_run
/// use plan_core::db::RepositoryRegistry;
/// use plan_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::with_memory();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn PlanRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&config.connection_string)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;
        if let Err(e) = repo.run_migrations().await {
            tracing::error!(path = %config.connection_string, "plan schema migration failed: {e:#}");
            return Err(RepositoryError::Database(format!("{e:#}")));
        }
        Ok(Box::new(repo))
    }
}
