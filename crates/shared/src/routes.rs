//! Paths of the record collection resource.

use crate::domain::RecordId;

pub const COLLECTION_PATH: &str = "/formData";

pub fn record_path(id: &RecordId) -> String {
    format!("{COLLECTION_PATH}/{}", id.as_str())
}
