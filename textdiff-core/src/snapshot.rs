//! Serialisable copy of the whole group store.
//!
//! The JSON form is a top-level array of groups:
//!
//! ```json
//! [{ "id": "…", "name": "Group 1",
//!    "textSets": [{ "id": "…", "name": "A", "content": "…",
//!                   "source": "manual", "timestamp": "2024-05-01T12:00:00Z" }],
//!    "selectedSets": ["…"] }]
//! ```
//!
//! The active group is not part of the array; stores that need it (the
//! database adapter) keep it alongside.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Source;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSetRecord {
    pub id: String,
    pub name: String,
    pub content: String,
    pub source: Source,
    /// ISO-8601 creation time.
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    pub id: String,
    pub name: String,
    pub text_sets: Vec<TextSetRecord>,
    pub selected_sets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub groups: Vec<GroupRecord>,
    /// Falls back to the first group on restore when absent or unknown.
    pub active_group_id: Option<String>,
}

impl Snapshot {
    /// Encodes the groups as the pretty-printed JSON export.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.groups)?)
    }

    /// Decodes a JSON export. The active group is left unset.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedSnapshot`] if the payload is not JSON, the top level
    /// is not an array, or any element lacks a required field or carries an
    /// unparsable timestamp.
    pub fn from_json(payload: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(payload).map_err(|e| Error::MalformedSnapshot(e.to_string()))?;
        if !value.is_array() {
            return Err(Error::MalformedSnapshot("top-level value must be an array".to_owned()));
        }
        let groups: Vec<GroupRecord> =
            serde_json::from_value(value).map_err(|e| Error::MalformedSnapshot(e.to_string()))?;
        Ok(Self { groups, active_group_id: None })
    }
}
