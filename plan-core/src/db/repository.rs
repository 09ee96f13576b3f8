use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// Durable string key-value storage.
///
/// Values are opaque to the backend; callers store JSON. Removing a key that
/// does not exist is not an error.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, RepositoryError>;

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), RepositoryError>;

    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), RepositoryError>;
}
