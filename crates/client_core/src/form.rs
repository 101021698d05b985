//! Create/edit dialog state.
//!
//! The draft is a detached copy: edits never reach the store until a save
//! succeeds and the resulting outcome is applied.

use shared::domain::{PersonRecord, RecordId};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    Create,
    Edit { original: RecordId },
}

/// What a valid submit asks the backend to do.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    Create(PersonRecord),
    Update { id: RecordId, record: PersonRecord },
}

impl SaveRequest {
    pub fn id(&self) -> &RecordId {
        match self {
            SaveRequest::Create(record) => &record.id,
            SaveRequest::Update { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormController {
    mode: FormMode,
    draft: PersonRecord,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Closed,
            draft: PersonRecord::default(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    pub fn title(&self) -> Option<&'static str> {
        match self.mode {
            FormMode::Closed => None,
            FormMode::Create => Some("New Record"),
            FormMode::Edit { .. } => Some("Edit Record"),
        }
    }

    /// Opens a blank template with a freshly generated id.
    pub fn open_create(&mut self) -> &RecordId {
        self.open_create_with_id(RecordId::generate())
    }

    pub fn open_create_with_id(&mut self, id: RecordId) -> &RecordId {
        self.draft = PersonRecord::blank(id);
        self.mode = FormMode::Create;
        &self.draft.id
    }

    pub fn open_edit(&mut self, record: &PersonRecord) {
        self.draft = record.clone();
        self.mode = FormMode::Edit {
            original: record.id.clone(),
        };
    }

    pub fn draft(&self) -> Option<&PersonRecord> {
        self.is_open().then_some(&self.draft)
    }

    pub fn draft_mut(&mut self) -> Option<&mut PersonRecord> {
        if self.is_open() {
            Some(&mut self.draft)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.close();
    }

    pub(crate) fn close(&mut self) {
        self.mode = FormMode::Closed;
    }

    /// Validates the draft. The form stays open until the save completes.
    pub fn submit(&self) -> Result<SaveRequest, ValidationError> {
        match &self.mode {
            FormMode::Closed => Err(ValidationError::FormClosed),
            _ if self.draft.name.is_empty() || self.draft.email.is_empty() => {
                Err(ValidationError::MissingRequired)
            }
            FormMode::Create => Ok(SaveRequest::Create(self.draft.clone())),
            FormMode::Edit { original } => Ok(SaveRequest::Update {
                id: original.clone(),
                record: self.draft.clone(),
            }),
        }
    }
}
