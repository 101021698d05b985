//! Async driver that pairs an adapter with [`AppState`] and awaits each
//! operation in turn.

use std::time::Instant;

use shared::domain::{PersonRecord, RecordId};
use thiserror::Error;
use tracing::info;

use crate::{
    error::{ClientError, ValidationError},
    state::{perform, AppState, RecordOp, RecordOutcome},
    RecordsApi,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Client(#[from] ClientError),
}

pub struct RecordsSession<A: RecordsApi> {
    api: A,
    state: AppState,
}

impl<A: RecordsApi> RecordsSession<A> {
    pub fn new(api: A, state: AppState) -> Self {
        Self { api, state }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub async fn load(&mut self) -> Result<&[PersonRecord], ClientError> {
        let op = self.state.begin_load();
        self.run(op).await?;
        Ok(self.state.store().records())
    }

    /// Explicit re-fetch of the whole collection.
    pub async fn refresh(&mut self) -> Result<&[PersonRecord], ClientError> {
        info!("refreshing records");
        self.load().await
    }

    pub fn open_create(&mut self) -> RecordId {
        self.state.open_create()
    }

    pub fn open_edit(&mut self, id: &RecordId) -> bool {
        self.state.open_edit(id)
    }

    pub fn draft_mut(&mut self) -> Option<&mut PersonRecord> {
        self.state.form_mut().draft_mut()
    }

    /// Validates and sends the open form; returns the id of the saved record.
    pub async fn save(&mut self) -> Result<RecordId, SessionError> {
        let request = self.state.begin_save()?;
        let id = request.id().clone();
        self.run(request.into()).await?;
        Ok(id)
    }

    /// Deletes without prompting; callers confirm first.
    pub async fn delete(&mut self, id: &RecordId) -> Result<(), ClientError> {
        self.state.request_delete(id.clone());
        if let Some(op) = self.state.confirm_delete() {
            self.run(op).await?;
        }
        Ok(())
    }

    async fn run(&mut self, op: RecordOp) -> Result<(), ClientError> {
        let outcome = perform(&self.api, op).await;
        let result = match &outcome {
            RecordOutcome::Failed(err) => Err(err.clone()),
            _ => Ok(()),
        };
        self.state.apply(outcome, Instant::now());
        result
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
