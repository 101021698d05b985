//! Backend commands queued from UI to backend worker.

use client_core::RecordOp;
use shared::domain::{PersonRecord, RecordId};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    LoadRecords,
    CreateRecord(PersonRecord),
    UpdateRecord { id: RecordId, record: PersonRecord },
    DeleteRecord(RecordId),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadRecords => "load_records",
            BackendCommand::CreateRecord(_) => "create_record",
            BackendCommand::UpdateRecord { .. } => "update_record",
            BackendCommand::DeleteRecord(_) => "delete_record",
        }
    }

    pub fn into_op(self) -> RecordOp {
        match self {
            BackendCommand::LoadRecords => RecordOp::Load,
            BackendCommand::CreateRecord(record) => RecordOp::Create(record),
            BackendCommand::UpdateRecord { id, record } => RecordOp::Update { id, record },
            BackendCommand::DeleteRecord(id) => RecordOp::Delete(id),
        }
    }
}

impl From<RecordOp> for BackendCommand {
    fn from(op: RecordOp) -> Self {
        match op {
            RecordOp::Load => BackendCommand::LoadRecords,
            RecordOp::Create(record) => BackendCommand::CreateRecord(record),
            RecordOp::Update { id, record } => BackendCommand::UpdateRecord { id, record },
            RecordOp::Delete(id) => BackendCommand::DeleteRecord(id),
        }
    }
}
