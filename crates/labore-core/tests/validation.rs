use labore_core::models::exam::ExamType;
use labore_core::selection::Selection;
use labore_core::validation::{
    ValidationError, compatible, has_mandatory, name_is_complete, validate_submission,
};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn full_name_passes() {
    assert_eq!(name_is_complete("Maria da Silva"), Ok(()));
    assert_eq!(name_is_complete("  Jo Li  "), Ok(()));
}

#[test]
fn short_name_fails() {
    assert_eq!(name_is_complete(""), Err(ValidationError::NameTooShort));
    assert_eq!(name_is_complete(" a b "), Err(ValidationError::NameTooShort));
}

#[test]
fn single_token_fails() {
    assert_eq!(name_is_complete("Maria"), Err(ValidationError::NameIncomplete));
}

#[test]
fn digits_fail() {
    assert_eq!(
        name_is_complete("Maria Silva 2"),
        Err(ValidationError::NameHasDigits)
    );
}

#[test]
fn non_ascii_digits_fail() {
    assert_eq!(
        name_is_complete("Ana ٣ Souza"),
        Err(ValidationError::NameHasDigits)
    );
    assert_eq!(
        name_is_complete("Maria Silva ²"),
        Err(ValidationError::NameHasDigits)
    );
}

#[test]
fn missing_mandatory_are_all_listed() {
    let err = has_mandatory(
        &names(&["Audiometria"]),
        &names(&["Exame Clínico", "Faturamento"]),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Procedimentos obrigatórios faltantes: Exame Clínico, Faturamento"
    );
}

#[test]
fn empty_selection_fails() {
    assert_eq!(
        has_mandatory(&[], &[]),
        Err(ValidationError::NoProcedures)
    );
}

#[test]
fn all_mandatory_present_passes() {
    assert_eq!(
        has_mandatory(
            &names(&["Faturamento", "Exame Clínico", "Glicemia"]),
            &names(&["Exame Clínico", "Faturamento"]),
        ),
        Ok(())
    );
}

#[test]
fn termination_exam_forbids_xray_and_spirometry() {
    let err = compatible(
        ExamType::Termination,
        &names(&["Espirometria", "Glicemia", "Raio-X Tórax"]),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Procedimentos Espirometria, Raio-X Tórax não são necessários para exame demissional"
    );
}

#[test]
fn other_exam_types_have_no_restrictions() {
    let selected = names(&["Espirometria", "Raio-X Tórax"]);
    assert_eq!(compatible(ExamType::Admission, &selected), Ok(()));
    assert_eq!(compatible(ExamType::Periodic, &selected), Ok(()));
    assert_eq!(compatible(ExamType::Termination, &names(&["Glicemia"])), Ok(()));
}

#[test]
fn submission_checks_run_in_order() {
    let mandatory = names(&["Exame Clínico"]);
    let selection = Selection::default()
        .with_person_name("Maria Silva")
        .with_national_id("11111111111")
        .add_procedure("Exame Clínico");
    assert_eq!(
        validate_submission(&selection, &mandatory),
        Err(ValidationError::InvalidNationalId)
    );

    let selection = selection.with_national_id("12345678909");
    assert_eq!(validate_submission(&selection, &mandatory), Ok(()));

    let selection = selection
        .with_exam_type(ExamType::Termination)
        .add_procedure("Espirometria");
    assert!(matches!(
        validate_submission(&selection, &mandatory),
        Err(ValidationError::Incompatible { .. })
    ));
}
