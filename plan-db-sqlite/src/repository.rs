use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use plan_core::{PlanRepository, RepositoryError};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub struct SqliteRepository {
    pool: SqlitePool,
}

/// Turns a bare path or `:memory:` into a sqlx connection URL.
fn database_url(connection_string: &str) -> String {
    if connection_string == ":memory:" {
        "sqlite::memory:".to_string()
    } else if connection_string.starts_with("sqlite:") {
        connection_string.to_string()
    } else {
        format!("sqlite://{connection_string}")
    }
}

impl SqliteRepository {
    /// Opens `connection_string`, creating the database file if needed.
    pub async fn new(connection_string: &str) -> Result<Self> {
        let url = database_url(connection_string);
        let options = SqliteConnectOptions::from_str(&url)
            .with_context(|| format!("Invalid database location: {}", connection_string))?
            .create_if_missing(true);

        // An in-memory database lives and dies with its connection, so the
        // pool must hold exactly one and never recycle it.
        let pool_options = if connection_string == ":memory:" {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", connection_string))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// When `key` was last written.
    pub async fn updated_at(
        &self,
        key: &str,
    ) -> Result<DateTime<Utc>, RepositoryError> {
        let row = sqlx::query("SELECT updated_at FROM plan_state WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        row.try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get updated_at: {}", e)))
    }

    /// Every stored key, sorted.
    pub async fn keys(&self) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query("SELECT key FROM plan_state ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get("key")
                    .map_err(|e| RepositoryError::Database(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl PlanRepository for SqliteRepository {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM plan_state WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        row.map(|row| {
            row.try_get("value")
                .map_err(|e| RepositoryError::Database(e.to_string()))
        })
        .transpose()
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO plan_state (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        tracing::trace!(key, bytes = value.len(), "plan state written");
        Ok(())
    }

    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM plan_state WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn setup_test_db() -> SqliteRepository {
        let repo = SqliteRepository::new(":memory:")
            .await
            .expect("Failed to create in-memory database");
        repo.run_migrations()
            .await
            .expect("Failed to run migrations");
        repo
    }

    #[test]
    fn bare_paths_become_sqlite_urls() {
        assert_eq!(database_url("plan.db"), "sqlite://plan.db");
        assert_eq!(database_url(":memory:"), "sqlite::memory:");
        assert_eq!(database_url("sqlite://data/plan.db"), "sqlite://data/plan.db");
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let repo = setup_test_db().await;

        assert_eq!(repo.get("opex.state").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_repositories_sharing_a_pool_see_each_other() {
        let repo = setup_test_db().await;
        let other = SqliteRepository::new_with_pool(repo.pool().clone()).await;

        other.set("fundingSources.state", "{}").await.unwrap();

        assert_eq!(repo.get("fundingSources.state").await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let repo = setup_test_db().await;

        repo.set("opex.state", r#"{"expenses":[]}"#)
            .await
            .expect("Should write value");

        assert_eq!(
            repo.get("opex.state").await.unwrap().as_deref(),
            Some(r#"{"expenses":[]}"#)
        );
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_value() {
        let repo = setup_test_db().await;
        repo.set("workforce.saved", "[]").await.unwrap();
        let first_write = repo.updated_at("workforce.saved").await.unwrap();

        repo.set("workforce.saved", r#"[{"name":"a"}]"#).await.unwrap();

        assert_eq!(
            repo.get("workforce.saved").await.unwrap().as_deref(),
            Some(r#"[{"name":"a"}]"#)
        );
        assert!(repo.updated_at("workforce.saved").await.unwrap() >= first_write);
        assert_eq!(repo.keys().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = setup_test_db().await;
        repo.set("costOfSales.state", "{}").await.unwrap();
        repo.set("costOfSales.saved", "[]").await.unwrap();

        repo.remove("costOfSales.state").await.expect("Should remove key");

        assert_eq!(repo.get("costOfSales.state").await.unwrap(), None);
        assert_eq!(repo.keys().await.unwrap(), vec!["costOfSales.saved".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let repo = setup_test_db().await;

        assert!(repo.remove("nothing.here").await.is_ok());
    }

    #[tokio::test]
    async fn test_updated_at_not_found() {
        let repo = setup_test_db().await;

        let result = repo.updated_at("missing").await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let repo = setup_test_db().await;

        repo.run_migrations()
            .await
            .expect("Re-running migrations should be a no-op");
    }
}
