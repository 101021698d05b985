//! Client-side mirror of the record collection.

use shared::domain::{PersonRecord, RecordId};

/// Records in load/insertion order. Duplicates are not prevented here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<PersonRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[PersonRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&PersonRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn replace_all(&mut self, records: Vec<PersonRecord>) {
        self.records = records;
    }

    pub fn append(&mut self, record: PersonRecord) {
        self.records.push(record);
    }

    /// Replaces every entry carrying `record.id`.
    pub fn replace_by_id(&mut self, record: PersonRecord) -> bool {
        let mut matched = false;
        for slot in self.records.iter_mut().filter(|r| r.id == record.id) {
            *slot = record.clone();
            matched = true;
        }
        matched
    }

    /// Drops every entry carrying `id`.
    pub fn remove_by_id(&mut self, id: &RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| &record.id != id);
        self.records.len() != before
    }
}
