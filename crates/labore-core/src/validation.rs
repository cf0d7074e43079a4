//! Checks run before a checklist is generated.
//!
//! Every check returns `Ok(())` or a [`ValidationError`] whose `Display`
//! text is shown to the user as-is.

use thiserror::Error;

use crate::models::exam::ExamType;
use crate::national_id;
use crate::selection::Selection;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Nome deve ter pelo menos 3 caracteres")]
    NameTooShort,

    #[error("Digite o nome completo (nome e sobrenome)")]
    NameIncomplete,

    #[error("Nome não pode conter números")]
    NameHasDigits,

    #[error("CPF inválido! Verifique os dados.")]
    InvalidNationalId,

    #[error("Selecione pelo menos um procedimento")]
    NoProcedures,

    #[error("Procedimentos obrigatórios faltantes: {}", .0.join(", "))]
    MissingMandatory(Vec<String>),

    #[error("Procedimentos {} {}", .forbidden.join(", "), .reason)]
    Incompatible {
        exam_type: ExamType,
        forbidden: Vec<String>,
        reason: &'static str,
    },
}

/// Procedures that make no sense for a given exam type.
struct Restriction {
    exam_type: ExamType,
    forbidden: &'static [&'static str],
    reason: &'static str,
}

const RESTRICTIONS: &[Restriction] = &[Restriction {
    exam_type: ExamType::Termination,
    forbidden: &["Raio-X Tórax", "Espirometria"],
    reason: "não são necessários para exame demissional",
}];

pub fn name_is_complete(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.chars().filter(|c| !c.is_whitespace()).count() < 3 {
        return Err(ValidationError::NameTooShort);
    }
    if trimmed.split_whitespace().count() < 2 {
        return Err(ValidationError::NameIncomplete);
    }
    if trimmed.chars().any(char::is_numeric) {
        return Err(ValidationError::NameHasDigits);
    }
    Ok(())
}

pub fn national_id_is_valid(national_id: &str) -> Result<(), ValidationError> {
    if national_id::is_valid(national_id) {
        Ok(())
    } else {
        Err(ValidationError::InvalidNationalId)
    }
}

/// Lists every mandatory name absent from `selected`, in mandatory order.
pub fn has_mandatory(selected: &[String], mandatory: &[String]) -> Result<(), ValidationError> {
    if selected.is_empty() {
        return Err(ValidationError::NoProcedures);
    }
    let missing: Vec<String> = mandatory
        .iter()
        .filter(|m| !selected.contains(m))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingMandatory(missing))
    }
}

/// Applies the per-exam-type exclusion table. Forbidden names are reported
/// in selection order.
pub fn compatible(exam_type: ExamType, selected: &[String]) -> Result<(), ValidationError> {
    let Some(rule) = RESTRICTIONS.iter().find(|r| r.exam_type == exam_type) else {
        return Ok(());
    };
    let forbidden: Vec<String> = selected
        .iter()
        .filter(|p| rule.forbidden.contains(&p.as_str()))
        .cloned()
        .collect();
    if forbidden.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Incompatible {
            exam_type,
            forbidden,
            reason: rule.reason,
        })
    }
}

/// The full pre-generation check. The first failing rule wins.
pub fn validate_submission(
    selection: &Selection,
    mandatory: &[String],
) -> Result<(), ValidationError> {
    name_is_complete(&selection.person_name)?;
    national_id_is_valid(&selection.national_id)?;
    has_mandatory(&selection.procedures, mandatory)?;
    compatible(selection.exam_type, &selection.procedures)?;
    Ok(())
}
