//! Server-side budget drafts.
//!
//! Each draft is a [`BudgetComposer`] behind an async mutex. Edits wait for
//! each other; a second submit of the same draft is refused while the first
//! is still talking to the store.
//!
//! Drafts are closed by a successful submit and expire after a day without
//! access.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use gridbudget_core::budget::{Budget, BudgetComposer, BudgetError};
use gridbudget_core::store::BudgetStore;
use gridbudget_shared::AppError;
use moka::sync::Cache;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;
use uuid::Uuid;

/// Draft registry errors.
#[derive(Debug, Error)]
pub enum DraftError {
    /// No draft with this ID.
    #[error("Draft not found: {0}")]
    NotFound(Uuid),

    /// The draft is already being submitted.
    #[error("Draft {0} is already being submitted")]
    SubmitInProgress(Uuid),

    /// The composer rejected the operation.
    #[error(transparent)]
    Budget(#[from] BudgetError),
}

impl From<DraftError> for AppError {
    fn from(err: DraftError) -> Self {
        match err {
            DraftError::NotFound(_) => Self::NotFound(err.to_string()),
            DraftError::SubmitInProgress(_) => Self::Conflict(err.to_string()),
            DraftError::Budget(e) => e.into(),
        }
    }
}

/// One draft and its submit flag.
#[derive(Debug)]
pub struct DraftEntry {
    id: Uuid,
    composer: Mutex<BudgetComposer>,
    submitting: AtomicBool,
}

/// Clears the submit flag when the submit finishes or is dropped.
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl DraftEntry {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            composer: Mutex::new(BudgetComposer::new()),
            submitting: AtomicBool::new(false),
        }
    }

    /// Draft ID.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Waits for exclusive access to the composer.
    pub async fn lock(&self) -> MutexGuard<'_, BudgetComposer> {
        self.composer.lock().await
    }

    /// Whether a submit is outstanding.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Submits the draft.
    ///
    /// # Errors
    ///
    /// `SubmitInProgress` when another submit of this draft has not finished;
    /// otherwise whatever [`BudgetComposer::submit`] reports. The draft is
    /// kept on every failure.
    pub async fn submit(&self, store: &dyn BudgetStore) -> Result<Budget, DraftError> {
        if self.submitting.swap(true, Ordering::SeqCst) {
            return Err(DraftError::SubmitInProgress(self.id));
        }
        let _guard = SubmitGuard(&self.submitting);

        let mut composer = self.composer.lock().await;
        let budget = composer.submit(store).await?;
        info!(draft_id = %self.id, budget_id = %budget.id, "Draft submitted");
        Ok(budget)
    }
}

/// Default number of open drafts.
const DEFAULT_CAPACITY: u64 = 10_000;

/// Default idle time before a draft expires (24 hours).
const DEFAULT_IDLE_SECS: u64 = 86_400;

/// Drafts keyed by ID.
#[derive(Clone)]
pub struct DraftRegistry {
    drafts: Cache<Uuid, Arc<DraftEntry>>,
}

impl Default for DraftRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftRegistry {
    /// Creates an empty registry with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CAPACITY, Duration::from_secs(DEFAULT_IDLE_SECS))
    }

    /// Creates an empty registry.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - Maximum number of open drafts
    /// * `idle` - How long an untouched draft is kept
    #[must_use]
    pub fn with_config(max_capacity: u64, idle: Duration) -> Self {
        let drafts = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_idle(idle)
            .build();
        Self { drafts }
    }

    /// Opens a new empty draft.
    pub fn create(&self) -> Arc<DraftEntry> {
        let id = Uuid::new_v4();
        let entry = Arc::new(DraftEntry::new(id));
        self.drafts.insert(id, Arc::clone(&entry));
        info!(draft_id = %id, "Draft opened");
        entry
    }

    /// Looks a draft up.
    pub fn get(&self, id: Uuid) -> Result<Arc<DraftEntry>, DraftError> {
        self.drafts.get(&id).ok_or(DraftError::NotFound(id))
    }

    /// Discards a draft.
    pub fn remove(&self, id: Uuid) -> Result<(), DraftError> {
        self.drafts
            .remove(&id)
            .map(|_| info!(draft_id = %id, "Draft discarded"))
            .ok_or(DraftError::NotFound(id))
    }

    /// Submits a draft and closes it.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown ID, otherwise whatever
    /// [`DraftEntry::submit`] reports. A failed submit keeps the draft open.
    pub async fn submit(&self, id: Uuid, store: &dyn BudgetStore) -> Result<Budget, DraftError> {
        let entry = self.get(id)?;
        let budget = entry.submit(store).await?;
        self.drafts.invalidate(&id);
        Ok(budget)
    }

    /// Number of open drafts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drafts.run_pending_tasks();
        usize::try_from(self.drafts.entry_count()).unwrap_or(usize::MAX)
    }

    /// Whether no draft is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
