use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of hex digits in a client-generated record id.
pub const RECORD_ID_HEX_LEN: usize = 4;

pub const DEFAULT_RATING: f64 = 5.0;

pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Random short hex id. Uniqueness is assumed, never checked.
    pub fn generate() -> Self {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        Self(hex[..RECORD_ID_HEX_LEN].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Unspecified,
        Gender::Male,
        Gender::Female,
        Gender::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Unspecified => "None",
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Parses the wire spelling; the empty string (and "none") map to `Unspecified`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Some(Gender::Unspecified),
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// A single person entry as stored at the collection endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonRecord {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub age: f64,
    pub height: f64,
    pub birth_date: String,
    pub gender: Gender,
    pub country: String,
    pub is_student: bool,
    pub rating: f64,
    pub notes: String,
}

impl Default for PersonRecord {
    fn default() -> Self {
        Self::blank(RecordId::default())
    }
}

impl PersonRecord {
    /// Blank form template for a new record.
    pub fn blank(id: RecordId) -> Self {
        Self {
            id,
            name: String::new(),
            email: String::new(),
            age: 0.0,
            height: 0.0,
            birth_date: String::new(),
            gender: Gender::Unspecified,
            country: String::new(),
            is_student: false,
            rating: DEFAULT_RATING,
            notes: String::new(),
        }
    }

    /// `None` when the birth date is empty or not `YYYY-MM-DD`.
    pub fn parsed_birth_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.birth_date.trim(), BIRTH_DATE_FORMAT).ok()
    }

    pub fn has_malformed_birth_date(&self) -> bool {
        !self.birth_date.trim().is_empty() && self.parsed_birth_date().is_none()
    }

    pub fn student_label(&self) -> &'static str {
        if self.is_student {
            "Yes"
        } else {
            "No"
        }
    }
}
