//! Explicit application state for the records view: store, form, toast,
//! loading flag and delete confirmation. Completed backend work is folded
//! in through [`AppState::apply`].

use std::time::{Duration, Instant};

use shared::domain::{PersonRecord, RecordId};
use tracing::{info, warn};

use crate::{
    error::{ClientError, RecordOpKind, ValidationError},
    form::{FormController, SaveRequest},
    notification::Notifier,
    store::RecordStore,
    RecordsApi,
};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordOp {
    Load,
    Create(PersonRecord),
    Update { id: RecordId, record: PersonRecord },
    Delete(RecordId),
}

impl From<SaveRequest> for RecordOp {
    fn from(request: SaveRequest) -> Self {
        match request {
            SaveRequest::Create(record) => RecordOp::Create(record),
            SaveRequest::Update { id, record } => RecordOp::Update { id, record },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Loaded(Vec<PersonRecord>),
    Created(PersonRecord),
    Updated(PersonRecord),
    Deleted(RecordId),
    Failed(ClientError),
}

/// Runs one operation against the adapter. Single attempt, no retry.
pub async fn perform<A: RecordsApi + ?Sized>(api: &A, op: RecordOp) -> RecordOutcome {
    let outcome = match op {
        RecordOp::Load => api.list().await.map(RecordOutcome::Loaded),
        RecordOp::Create(record) => api.create(&record).await.map(RecordOutcome::Created),
        RecordOp::Update { id, record } => {
            api.update(&id, &record).await.map(RecordOutcome::Updated)
        }
        RecordOp::Delete(id) => api.remove(&id).await.map(|()| RecordOutcome::Deleted(id)),
    };

    match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(operation = err.kind().label(), error = %err, "record operation failed");
            RecordOutcome::Failed(err)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    store: RecordStore,
    form: FormController,
    notifier: Notifier,
    loading: bool,
    pending_delete: Option<RecordId>,
}

impl AppState {
    pub fn new(toast_duration: Duration) -> Self {
        Self {
            notifier: Notifier::new(toast_duration),
            ..Self::default()
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_load(&mut self) -> RecordOp {
        self.loading = true;
        RecordOp::Load
    }

    pub fn open_create(&mut self) -> RecordId {
        self.form.open_create().clone()
    }

    /// Seeds the form from the stored record. False when the id is unknown.
    pub fn open_edit(&mut self, id: &RecordId) -> bool {
        match self.store.get(id) {
            Some(record) => {
                self.form.open_edit(record);
                true
            }
            None => false,
        }
    }

    pub fn cancel_form(&mut self) {
        self.form.cancel();
    }

    /// Validates the open form; nothing is sent when this fails.
    pub fn begin_save(&self) -> Result<SaveRequest, ValidationError> {
        self.form.submit()
    }

    pub fn request_delete(&mut self, id: RecordId) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<&RecordId> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Option<RecordOp> {
        self.pending_delete.take().map(RecordOp::Delete)
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.notifier.tick(now)
    }

    pub fn apply(&mut self, outcome: RecordOutcome, now: Instant) {
        match outcome {
            RecordOutcome::Loaded(records) => {
                info!(count = records.len(), "records loaded");
                self.store.replace_all(records);
                self.loading = false;
            }
            RecordOutcome::Created(record) => {
                info!(id = %record.id, "record created");
                self.store.append(record);
                self.notifier.success("Created", now);
                self.form.close();
            }
            RecordOutcome::Updated(record) => {
                info!(id = %record.id, "record updated");
                if !self.store.replace_by_id(record.clone()) {
                    warn!(id = %record.id, "updated record is not in the local store");
                }
                self.notifier.success("Updated", now);
                self.form.close();
            }
            RecordOutcome::Deleted(id) => {
                info!(%id, "record deleted");
                self.store.remove_by_id(&id);
                self.notifier.success("Deleted", now);
            }
            RecordOutcome::Failed(err) => {
                if err.kind() == RecordOpKind::Load {
                    self.loading = false;
                }
                self.notifier.error(err.toast_message(), now);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
