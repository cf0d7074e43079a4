use labore_core::models::exam::ExamType;
use labore_core::procedures::{BILLING, TRIAGE, order_procedures};
use labore_core::selection::Selection;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn triage_first_billing_last_others_stable() {
    let ordered = order_procedures(names(&[
        "Audiometria",
        BILLING,
        "Glicemia",
        TRIAGE,
        "Exame Clínico",
    ]));
    assert_eq!(
        ordered,
        names(&[TRIAGE, "Audiometria", "Glicemia", "Exame Clínico", BILLING])
    );
}

#[test]
fn ordering_without_designated_names_is_identity() {
    let list = names(&["B", "A", "C"]);
    assert_eq!(order_procedures(list.clone()), list);
}

#[test]
fn ordering_is_idempotent() {
    let once = order_procedures(names(&[BILLING, "X", TRIAGE]));
    assert_eq!(order_procedures(once.clone()), once);
}

#[test]
fn add_mandatory_reports_what_was_added() {
    let mandatory = names(&["Exame Clínico", BILLING, TRIAGE]);
    let selection = Selection::default().add_procedure("Glicemia").add_procedure(BILLING);
    let (selection, added) = selection.add_mandatory(&mandatory);
    assert_eq!(added, names(&["Exame Clínico", TRIAGE]));
    assert_eq!(
        selection.procedures,
        names(&[TRIAGE, "Glicemia", "Exame Clínico", BILLING])
    );
}

#[test]
fn add_procedure_ignores_duplicates() {
    let selection = Selection::default().add_procedure("A").add_procedure("A");
    assert_eq!(selection.procedures, names(&["A"]));
    assert!(selection.remove_procedure("A").procedures.is_empty());
}

#[test]
fn reset_keeps_only_mandatory() {
    let selection = Selection::reset(&names(&["Exame Clínico", BILLING, TRIAGE]));
    assert_eq!(selection.person_name, "");
    assert_eq!(selection.exam_type, ExamType::Admission);
    assert_eq!(selection.procedures, names(&[TRIAGE, "Exame Clínico", BILLING]));
}

#[test]
fn exam_type_parses_labels_case_insensitively() {
    assert_eq!("demissional".parse::<ExamType>().unwrap(), ExamType::Termination);
    assert_eq!("Periódico".parse::<ExamType>().unwrap(), ExamType::Periodic);
    assert_eq!("periodico".parse::<ExamType>().unwrap(), ExamType::Periodic);
    assert_eq!(
        " retorno ao trabalho ".parse::<ExamType>().unwrap(),
        ExamType::ReturnToWork
    );
    assert!("outro".parse::<ExamType>().is_err());
}

#[test]
fn exam_type_serializes_as_label() {
    let json = serde_json::to_string(&ExamType::ReturnToWork).unwrap();
    assert_eq!(json, "\"Retorno ao Trabalho\"");
}
