//! Operations the front end calls. Each returns a short user-facing message
//! on failure; the detail goes to the log.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use labore_core::models::procedure::ProcedureDefinition;
use labore_core::models::record::{ChecklistRecord, PersonSummary};
use labore_core::national_id;
use labore_core::selection::Selection;
use labore_core::validation;
use labore_export::pdf::{ChecklistDocument, RenderOptions, render_checklist};

use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedChecklist {
    pub id: u64,
    pub path: PathBuf,
}

pub fn generate_checklist(
    state: &mut AppState,
    selection: &Selection,
) -> Result<GeneratedChecklist, String> {
    generate_checklist_at(state, selection, &jiff::Zoned::now())
}

/// [`generate_checklist`] with an explicit clock reading.
pub fn generate_checklist_at(
    state: &mut AppState,
    selection: &Selection,
    now: &jiff::Zoned,
) -> Result<GeneratedChecklist, String> {
    let mandatory = state.catalog.mandatory().to_vec();
    validation::validate_submission(selection, &mandatory).map_err(|e| e.to_string())?;
    let selection = selection.clone().ensure_mandatory(&mandatory);

    let document = ChecklistDocument {
        person_name: selection.person_name.trim().to_string(),
        national_id: selection.national_id.clone(),
        exam_type: selection.exam_type,
        items: state.catalog.items_for(&selection.procedures),
        generated_at: now.clone(),
    };
    let options = RenderOptions {
        output_dir: state.paths.documents(),
        logo_path: state.pdf_logo(),
    };

    let path = render_checklist(&document, &options).map_err(|e| {
        tracing::error!(
            national_id = %national_id::mask_for_log(&selection.national_id),
            error = %e,
            "checklist generation failed"
        );
        format!("Erro ao gerar PDF: {e}")
    })?;
    tracing::info!(
        national_id = %national_id::mask_for_log(&selection.national_id),
        exam_type = %selection.exam_type,
        procedures = document.items.len(),
        path = %path.display(),
        "checklist generated"
    );

    let id = state
        .store
        .append_at(
            now,
            &document.person_name,
            &selection.national_id,
            selection.exam_type,
            &selection.procedures,
            &path.to_string_lossy(),
        )
        .map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to record checklist");
            format!("PDF gerado, mas o histórico não pôde ser salvo: {e}")
        })?;

    Ok(GeneratedChecklist { id, path })
}

/// The most recent checklist for this ID, once the ID is complete and valid.
pub fn suggest_from_history(state: &AppState, raw_national_id: &str) -> Option<ChecklistRecord> {
    if !national_id::is_valid(raw_national_id) {
        return None;
    }
    let found = state.store.latest_for_national_id(raw_national_id).cloned();
    if let Some(record) = &found {
        tracing::debug!(
            national_id = %national_id::mask_for_log(raw_national_id),
            record = record.id,
            "person found in history"
        );
    }
    found
}

/// Search the history by name, or by national ID when the query is all
/// digits and punctuation. Newest first.
pub fn search_history(state: &AppState, query: &str) -> Vec<ChecklistRecord> {
    let query = query.trim();
    if query.is_empty() {
        let mut all: Vec<ChecklistRecord> = state.store.records().to_vec();
        all.reverse();
        return all;
    }
    let by_id = query
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-');
    let found = if by_id {
        state.store.find_by_national_id(query)
    } else {
        state.store.find_by_name(query)
    };
    found.into_iter().cloned().collect()
}

pub fn list_people(state: &AppState) -> Vec<PersonSummary> {
    state.store.distinct_people()
}

/// Open the stored document for `record_id`, regenerating it first if the
/// file is gone. Returns the path that was opened.
pub fn reprint(state: &mut AppState, record_id: u64) -> Result<PathBuf, String> {
    let record = state
        .store
        .get(record_id)
        .cloned()
        .ok_or_else(|| format!("Checklist {record_id} não encontrado no histórico"))?;

    let stored = PathBuf::from(&record.document_path);
    let path = if stored.is_file() {
        stored
    } else {
        tracing::info!(
            record = record_id,
            path = %stored.display(),
            "document missing, regenerating"
        );
        let document = ChecklistDocument {
            person_name: record.person_name.clone(),
            national_id: record.national_id.clone(),
            exam_type: record.exam_type,
            items: state.catalog.items_for(&record.procedures),
            generated_at: jiff::Zoned::now(),
        };
        let options = RenderOptions {
            output_dir: state.paths.documents(),
            logo_path: state.pdf_logo(),
        };
        render_checklist(&document, &options).map_err(|e| {
            tracing::error!(record = record_id, error = %e, "reprint failed");
            format!("Erro ao gerar PDF: {e}")
        })?
    };

    open_document(&path);
    Ok(path)
}

/// Hand the file to the OS viewer. Failures are logged and otherwise
/// ignored.
pub fn open_document(path: &Path) {
    let result = if cfg!(target_os = "windows") {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()
    } else if cfg!(target_os = "macos") {
        std::process::Command::new("open").arg(path).spawn()
    } else {
        std::process::Command::new("xdg-open").arg(path).spawn()
    };

    match result {
        Ok(_) => tracing::debug!(path = %path.display(), "document opened"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "could not open document"),
    }
}

pub fn list_procedures(state: &AppState, filter: &str) -> Vec<ProcedureDefinition> {
    state.catalog.search(filter).into_iter().cloned().collect()
}

pub fn add_procedure(state: &mut AppState, name: &str) -> Result<(), String> {
    state.catalog.add(name).map_err(|e| e.to_string())
}

pub fn remove_procedure(state: &mut AppState, name: &str) -> Result<(), String> {
    state.catalog.remove(name).map_err(|e| e.to_string())
}

pub fn rename_procedure(state: &mut AppState, old: &str, new: &str) -> Result<(), String> {
    state.catalog.rename(old, new).map_err(|e| e.to_string())
}

pub fn set_requires_report(state: &mut AppState, name: &str, flag: bool) -> Result<(), String> {
    state
        .catalog
        .set_requires_report(name, flag)
        .map_err(|e| e.to_string())
}

/// Returns whether `name` is mandatory afterwards.
pub fn toggle_mandatory(state: &mut AppState, name: &str) -> Result<bool, String> {
    state.catalog.toggle_mandatory(name).map_err(|e| e.to_string())
}

/// Set both logos. Empty strings clear the setting.
pub fn set_logo_paths(
    state: &mut AppState,
    logo_path: Option<&str>,
    logo_pdf_path: Option<&str>,
) -> Result<(), String> {
    let clean = |p: Option<&str>| {
        p.map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
    };
    state
        .catalog
        .set_logo_paths(clean(logo_path), clean(logo_pdf_path))
        .map_err(|e| e.to_string())
}
