//! Form state backed by durable storage.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::db::{PlanRepository, RepositoryError};

/// A value read once from storage when opened and written back as JSON after
/// every change.
///
/// The in-memory value is authoritative: a failed write is reported to the
/// caller but never rolls the value back.
#[derive(Debug, Clone)]
pub struct PersistedField<T> {
    key: String,
    value: T,
}

impl<T> PersistedField<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Loads `key`, falling back to `default()` when the key is missing,
    /// unreadable, or holds JSON that no longer matches `T`.
    pub async fn load(
        repo: &dyn PlanRepository,
        key: impl Into<String>,
        default: impl FnOnce() -> T,
    ) -> Self {
        let key = key.into();
        let value = match repo.get(&key).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key = %key, "stored value is corrupt, using defaults: {}", e);
                    default()
                }
            },
            Ok(None) => default(),
            Err(e) => {
                tracing::warn!(key = %key, "failed to read stored value, using defaults: {}", e);
                default()
            }
        };
        Self { key, value }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Mutable access to the in-memory value. Call [`Self::flush`] afterwards.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Replaces the value and writes it through.
    pub async fn set(
        &mut self,
        repo: &dyn PlanRepository,
        value: T,
    ) -> Result<(), RepositoryError> {
        self.value = value;
        self.flush(repo).await
    }

    /// Writes the current value to storage.
    pub async fn flush(
        &self,
        repo: &dyn PlanRepository,
    ) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(&self.value)?;
        repo.set(&self.key, &json).await
    }

    /// Replaces the value and deletes the stored key, so the next load starts
    /// from defaults too.
    pub async fn reset(
        &mut self,
        repo: &dyn PlanRepository,
        value: T,
    ) -> Result<(), RepositoryError> {
        self.value = value;
        repo.remove(&self.key).await
    }
}
