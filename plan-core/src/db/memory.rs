use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::factory::{DbConfig, RepositoryFactory};
use super::repository::{PlanRepository, RepositoryError};

/// Process-local storage. Everything is lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl PlanRepository for MemoryRepository {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, RepositoryError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), RepositoryError> {
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), RepositoryError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Registers [`MemoryRepository`] under the backend name `"memory"`.
/// The connection string is ignored.
pub struct MemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &DbConfig,
    ) -> Result<Box<dyn PlanRepository>, RepositoryError> {
        tracing::debug!("opening in-memory plan storage");
        Ok(Box::new(MemoryRepository::new()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let repo = MemoryRepository::new();

        assert_eq!(repo.get("opex.state").await, Ok(None));
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let repo = MemoryRepository::new();

        repo.set("opex.state", "1").await.unwrap();
        repo.set("opex.state", "2").await.unwrap();

        assert_eq!(repo.get("opex.state").await.unwrap().as_deref(), Some("2"));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn remove_missing_key_is_ok() {
        let repo = MemoryRepository::new();

        assert!(repo.remove("never.written").await.is_ok());
    }

    #[tokio::test]
    async fn remove_deletes_only_that_key() {
        let repo = MemoryRepository::new();
        repo.set("opex.state", "{}").await.unwrap();
        repo.set("opex.saved", "[]").await.unwrap();

        repo.remove("opex.state").await.unwrap();

        assert_eq!(repo.get("opex.state").await.unwrap(), None);
        assert_eq!(repo.get("opex.saved").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn factory_creates_empty_repository() {
        let repo = MemoryRepositoryFactory
            .create(&DbConfig::default())
            .await
            .unwrap();

        assert_eq!(repo.get("anything").await.unwrap(), None);
    }
}
