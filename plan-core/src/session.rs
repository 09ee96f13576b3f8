//! Calculator sessions: working state, saved snapshots and persistence.
//!
//! A [`CalculatorSession`] owns one calculator's working input and its list
//! of saved snapshots, both backed by [`PersistedField`]s. Every mutating
//! operation follows the same sequence: change the input in memory,
//! recompute and publish the calculator's aggregate, then write the input
//! back to storage. A failed write is logged and queued as a [`Notice`];
//! the in-memory change stands.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::confirm::{self, Confirmation, Outcome};
use crate::db::{PlanRepository, RepositoryError};
use crate::models::SavedCalculation;
use crate::notify::Notice;
use crate::persist::PersistedField;
use crate::store::BusinessPlanStore;

/// The numeric engine behind one calculator screen.
pub trait Calculator: Send + Sync + 'static {
    /// Storage scope, e.g. `"startupCosts"`.
    const SCOPE: &'static str;

    /// Everything the user can edit.
    type Input: Clone + Default + Serialize + DeserializeOwned + Send + Sync;

    /// What a saved calculation records.
    type Snapshot: Clone + Serialize + DeserializeOwned + Send + Sync;

    /// Derived figures.
    type Output;

    /// Derives the output from the input and any upstream aggregates.
    fn compute(
        input: &Self::Input,
        store: &BusinessPlanStore,
    ) -> Self::Output;

    /// Writes this calculator's aggregate to its slot. Returns whether the
    /// slot changed.
    fn publish(
        output: &Self::Output,
        store: &BusinessPlanStore,
    ) -> bool;

    fn snapshot(input: &Self::Input) -> Self::Snapshot;

    fn restore(snapshot: &Self::Snapshot) -> Self::Input;
}

pub fn state_key(scope: &str) -> String {
    format!("{scope}.state")
}

pub fn saved_key(scope: &str) -> String {
    format!("{scope}.saved")
}

/// A live calculator bound to storage and the shared store.
pub struct CalculatorSession<C: Calculator> {
    pub(crate) repo: Arc<dyn PlanRepository>,
    pub(crate) store: Arc<BusinessPlanStore>,
    input: PersistedField<C::Input>,
    saved: PersistedField<Vec<SavedCalculation<C::Snapshot>>>,
    notices: Vec<Notice>,
}

impl<C: Calculator> CalculatorSession<C> {
    /// Restores working state and saved snapshots from storage, then
    /// publishes the initial aggregate.
    pub async fn open(
        repo: Arc<dyn PlanRepository>,
        store: Arc<BusinessPlanStore>,
    ) -> Self {
        let input = PersistedField::load(repo.as_ref(), state_key(C::SCOPE), C::Input::default).await;
        let saved = PersistedField::load(repo.as_ref(), saved_key(C::SCOPE), Vec::new).await;
        let session = Self {
            repo,
            store,
            input,
            saved,
            notices: Vec::new(),
        };
        tracing::debug!(scope = C::SCOPE, saved = session.saved().len(), "calculator opened");
        session.recompute();
        session
    }

    pub fn input(&self) -> &C::Input {
        self.input.get()
    }

    pub fn saved(&self) -> &[SavedCalculation<C::Snapshot>] {
        self.saved.get()
    }

    pub fn store(&self) -> &BusinessPlanStore {
        &self.store
    }

    /// Current derived figures. Upstream aggregates are read fresh.
    pub fn output(&self) -> C::Output {
        C::compute(self.input.get(), &self.store)
    }

    /// Recomputes and publishes the aggregate without touching the input.
    pub fn recompute(&self) -> C::Output {
        let output = self.output();
        if C::publish(&output, &self.store) {
            tracing::debug!(scope = C::SCOPE, "aggregate recomputed");
        }
        output
    }

    /// Applies `f` to the working input, then recomputes, publishes and
    /// persists.
    pub async fn edit<R>(
        &mut self,
        f: impl FnOnce(&mut C::Input) -> R,
    ) -> R {
        let result = f(self.input.get_mut());
        self.recompute();
        self.persist_input().await;
        result
    }

    /// Resets the working input to its defaults and forgets the stored
    /// copy. Saved calculations are kept.
    pub async fn clear_all(
        &mut self,
        confirmation: Confirmation,
    ) -> Outcome {
        if !confirmation.is_granted() {
            return Outcome::NeedsConfirmation(confirm::clear_all_prompt());
        }
        let result = self.input.reset(self.repo.as_ref(), C::Input::default()).await;
        self.report(result);
        self.recompute();
        tracing::info!(scope = C::SCOPE, "calculator cleared");
        Outcome::Applied
    }

    /// Appends a snapshot of the working input under `name` and returns its
    /// index. A blank name saves nothing.
    pub async fn save_as(
        &mut self,
        name: &str,
    ) -> Option<usize> {
        if name.trim().is_empty() {
            return None;
        }
        let record = SavedCalculation::new(name, C::snapshot(self.input.get()));
        Some(self.push_saved(record).await)
    }

    /// Appends an already-built snapshot record and returns its index.
    pub async fn push_saved(
        &mut self,
        record: SavedCalculation<C::Snapshot>,
    ) -> usize {
        tracing::info!(scope = C::SCOPE, name = %record.name, "calculation saved");
        self.saved.get_mut().push(record);
        self.persist_saved().await;
        self.saved.get().len() - 1
    }

    /// Replaces the working input with saved snapshot `index`.
    pub async fn load_saved(
        &mut self,
        index: usize,
        confirmation: Confirmation,
    ) -> Outcome {
        let Some(record) = self.saved.get().get(index) else {
            return Outcome::NotFound;
        };
        if !confirmation.is_granted() {
            return Outcome::NeedsConfirmation(confirm::load_prompt(&record.name));
        }
        let restored = C::restore(&record.state);
        tracing::info!(scope = C::SCOPE, name = %record.name, "saved calculation loaded");
        self.edit(|input| *input = restored).await;
        Outcome::Applied
    }

    /// Deletes saved snapshot `index`.
    pub async fn delete_saved(
        &mut self,
        index: usize,
        confirmation: Confirmation,
    ) -> Outcome {
        if index >= self.saved.get().len() {
            return Outcome::NotFound;
        }
        if !confirmation.is_granted() {
            return Outcome::NeedsConfirmation(confirm::delete_prompt());
        }
        let removed = self.saved.get_mut().remove(index);
        tracing::info!(scope = C::SCOPE, name = %removed.name, "saved calculation deleted");
        self.persist_saved().await;
        Outcome::Applied
    }

    /// Drains queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    async fn persist_input(&mut self) {
        let result = self.input.flush(self.repo.as_ref()).await;
        self.report(result);
    }

    async fn persist_saved(&mut self) {
        let result = self.saved.flush(self.repo.as_ref()).await;
        self.report(result);
    }

    fn report(
        &mut self,
        result: Result<(), RepositoryError>,
    ) {
        if let Err(e) = result {
            tracing::error!(scope = C::SCOPE, "failed to save calculator state: {}", e);
            self.notices.push(Notice::error("Failed to save data. Please try again."));
        }
    }
}
