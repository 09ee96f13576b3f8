use std::collections::HashMap;

use async_trait::async_trait;

use super::repository::{PlanRepository, RepositoryError};

/// Backend-agnostic storage configuration.
///
/// `backend` must match the [`RepositoryFactory::backend_name`] of a
/// registered factory. `connection_string` is passed through to that
/// factory unchanged.
///
/// | backend    | connection_string examples            |
/// |------------|---------------------------------------|
/// | `memory`   | ignored                               |
/// | `sqlite`   | `business-plan.db`, `:memory:`        |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    /// File path for `sqlite`; `memory` ignores it.
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            connection_string: ":memory:".to_string(),
        }
    }
}

/// Opens plan storage for one backend.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// The `[storage] backend` value this factory answers to.
    fn backend_name(&self) -> &'static str;

    /// Opens the store named by `config.connection_string`, creating it when
    /// the backend supports that.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn PlanRepository>, RepositoryError>;
}

/// Storage backends by name. The binary registers every backend it links
/// and picks one from configuration.
pub struct RepositoryRegistry {
    factories: HashMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A registry that can already open `"memory"` storage.
    pub fn with_memory() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(super::MemoryRepositoryFactory));
        registry
    }

    /// Adds `factory`. A later factory with the same name wins.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) {
        let name = factory.backend_name();
        if self.factories.insert(name, factory).is_some() {
            tracing::debug!(backend = name, "storage backend re-registered");
        }
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Opens storage with the factory registered as `config.backend`.
    ///
    /// # Errors
    /// [`RepositoryError::Configuration`] for an unregistered backend name,
    /// otherwise whatever the factory reports.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn PlanRepository>, RepositoryError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(RepositoryError::Configuration(format!(
                "no storage backend named '{}' (registered: {})",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        tracing::info!(backend = %config.backend, "opening plan storage");
        factory.create(config).await
    }
}

impl Default for RepositoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}
