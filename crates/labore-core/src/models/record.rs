use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::exam::ExamType;

/// One generated checklist, as persisted in the history file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChecklistRecord {
    /// 1-based insertion rank within the store.
    pub id: u64,
    pub created_at: jiff::Timestamp,
    /// Local `dd/mm/YYYY HH:MM`, frozen at creation time.
    pub display_date: String,
    pub person_name: String,
    /// As entered, punctuation included.
    pub national_id: String,
    pub exam_type: ExamType,
    pub procedures: Vec<String>,
    pub document_path: String,
    /// Reserved. Nothing sets it yet.
    #[serde(default)]
    pub edited: bool,
    /// Reserved. Nothing appends to it yet.
    #[serde(default)]
    pub edit_history: Vec<serde_json::Value>,
}

/// Latest known data for one person across the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PersonSummary {
    pub person_name: String,
    pub national_id: String,
    pub last_exam_type: ExamType,
    pub last_display_date: String,
    pub last_created_at: jiff::Timestamp,
    pub total_checklists: usize,
}
