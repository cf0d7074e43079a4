//! Checklist history: every generated document, in insertion order.
//!
//! The whole file is rewritten on each append. Fine for one clinic's daily
//! volume.

use std::path::{Path, PathBuf};

use labore_core::models::exam::ExamType;
use labore_core::models::record::{ChecklistRecord, PersonSummary};
use labore_core::national_id;

use crate::error::StorageError;
use crate::state;

/// `dd/mm/YYYY HH:MM`, as shown in the history list.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

pub struct RecordStore {
    path: PathBuf,
    records: Vec<ChecklistRecord>,
}

impl RecordStore {
    /// Load the history file. Missing or malformed files give an empty store;
    /// a malformed one is first moved aside to `<name>.bak`.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match state::load_state::<Vec<ChecklistRecord>>(&path) {
            Ok(records) => {
                tracing::debug!(path = %path.display(), count = records.len(), "history loaded");
                records
            }
            Err(StorageError::NotFound { .. }) => {
                tracing::debug!(path = %path.display(), "no history file, starting empty");
                Vec::new()
            }
            Err(e @ (StorageError::Serialization(_) | StorageError::Shape(_))) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt history, starting empty");
                state::set_aside(&path);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable history, starting empty");
                Vec::new()
            }
        };
        Self { path, records }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[ChecklistRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&ChecklistRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Record a generated checklist stamped with the current local time.
    /// Returns the new id.
    pub fn append(
        &mut self,
        person_name: &str,
        national_id: &str,
        exam_type: ExamType,
        procedures: &[String],
        document_path: &str,
    ) -> Result<u64, StorageError> {
        self.append_at(
            &jiff::Zoned::now(),
            person_name,
            national_id,
            exam_type,
            procedures,
            document_path,
        )
    }

    /// [`append`](Self::append) with an explicit clock reading.
    ///
    /// If the file cannot be written the record is dropped again, so the
    /// in-memory history always matches what is on disk.
    pub fn append_at(
        &mut self,
        now: &jiff::Zoned,
        person_name: &str,
        national_id: &str,
        exam_type: ExamType,
        procedures: &[String],
        document_path: &str,
    ) -> Result<u64, StorageError> {
        let id = self.records.len() as u64 + 1;
        self.records.push(ChecklistRecord {
            id,
            created_at: now.timestamp(),
            display_date: now.strftime(DISPLAY_DATE_FORMAT).to_string(),
            person_name: person_name.trim().to_string(),
            national_id: national_id.to_string(),
            exam_type,
            procedures: procedures.to_vec(),
            document_path: document_path.to_string(),
            edited: false,
            edit_history: Vec::new(),
        });

        if let Err(e) = state::save_state(&self.path, &self.records) {
            self.records.pop();
            tracing::error!(path = %self.path.display(), error = %e, "failed to save history");
            return Err(e);
        }

        tracing::info!(id, procedures = procedures.len(), "checklist added to history");
        Ok(id)
    }

    /// Case-insensitive substring match on the person's name, newest first.
    pub fn find_by_name(&self, query: &str) -> Vec<&ChecklistRecord> {
        let needle = query.trim().to_lowercase();
        let found = self
            .records
            .iter()
            .filter(|r| r.person_name.to_lowercase().contains(&needle))
            .collect();
        newest_first(found)
    }

    /// Exact match on the ID with `.` and `-` ignored on both sides, newest
    /// first.
    pub fn find_by_national_id(&self, query: &str) -> Vec<&ChecklistRecord> {
        let wanted = national_id::strip_punctuation(query);
        let found = self
            .records
            .iter()
            .filter(|r| national_id::strip_punctuation(&r.national_id) == wanted)
            .collect();
        newest_first(found)
    }

    /// The most recent checklist for this ID, if any. Drives the
    /// "person found in history" autofill.
    pub fn latest_for_national_id(&self, query: &str) -> Option<&ChecklistRecord> {
        self.find_by_national_id(query).into_iter().next()
    }

    /// One entry per distinct name, carrying that person's latest exam and
    /// total checklist count. Ordered by first appearance.
    pub fn distinct_people(&self) -> Vec<PersonSummary> {
        let mut people: Vec<PersonSummary> = Vec::new();

        for record in &self.records {
            match people
                .iter_mut()
                .find(|p| p.person_name == record.person_name)
            {
                Some(person) => {
                    person.total_checklists += 1;
                    if record.created_at > person.last_created_at {
                        person.national_id = record.national_id.clone();
                        person.last_exam_type = record.exam_type;
                        person.last_display_date = record.display_date.clone();
                        person.last_created_at = record.created_at;
                    }
                }
                None => people.push(PersonSummary {
                    person_name: record.person_name.clone(),
                    national_id: record.national_id.clone(),
                    last_exam_type: record.exam_type,
                    last_display_date: record.display_date.clone(),
                    last_created_at: record.created_at,
                    total_checklists: 1,
                }),
            }
        }

        people
    }
}

/// Ties on the timestamp fall back to the id, so later inserts still win.
fn newest_first(mut records: Vec<&ChecklistRecord>) -> Vec<&ChecklistRecord> {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    records
}
