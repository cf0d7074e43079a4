//! The form state a checklist is generated from.
//!
//! Each command takes the current [`Selection`] by value and returns the
//! next one, so the presentation layer only ever renders a value.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::exam::ExamType;
use crate::models::record::ChecklistRecord;
use crate::national_id;
use crate::procedures::order_procedures;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Selection {
    pub person_name: String,
    pub national_id: String,
    pub exam_type: ExamType,
    pub procedures: Vec<String>,
}

impl Selection {
    /// A blank form pre-filled with the mandatory procedures.
    pub fn reset(mandatory: &[String]) -> Self {
        Self {
            procedures: order_procedures(mandatory.to_vec()),
            ..Self::default()
        }
    }

    /// Autofill from a previous checklist of the same person.
    pub fn from_record(record: &ChecklistRecord) -> Self {
        Self {
            person_name: record.person_name.clone(),
            national_id: record.national_id.clone(),
            exam_type: record.exam_type,
            procedures: record.procedures.clone(),
        }
    }

    pub fn with_person_name(mut self, name: &str) -> Self {
        self.person_name = name.to_string();
        self
    }

    /// Stores the ID with the progressive CPF mask applied.
    pub fn with_national_id(mut self, raw: &str) -> Self {
        self.national_id = national_id::format(raw);
        self
    }

    pub fn with_exam_type(mut self, exam_type: ExamType) -> Self {
        self.exam_type = exam_type;
        self
    }

    /// Appends `name` unless it is already selected.
    pub fn add_procedure(mut self, name: &str) -> Self {
        if !self.procedures.iter().any(|p| p == name) {
            self.procedures.push(name.to_string());
        }
        self
    }

    pub fn remove_procedure(mut self, name: &str) -> Self {
        self.procedures.retain(|p| p != name);
        self
    }

    pub fn clear_procedures(mut self) -> Self {
        self.procedures.clear();
        self
    }

    /// Adds the missing mandatory procedures and returns which ones were
    /// added, in mandatory order. The result is ordered.
    pub fn add_mandatory(mut self, mandatory: &[String]) -> (Self, Vec<String>) {
        let mut added = Vec::new();
        for name in mandatory {
            if !self.procedures.contains(name) {
                self.procedures.push(name.clone());
                added.push(name.clone());
            }
        }
        self.procedures = order_procedures(self.procedures);
        (self, added)
    }

    /// Mandatory procedures present and the triage/billing positions fixed.
    /// This is the shape handed to the renderer.
    pub fn ensure_mandatory(self, mandatory: &[String]) -> Self {
        self.add_mandatory(mandatory).0
    }
}
