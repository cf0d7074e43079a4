//! Well-known procedure names and the ordering rule for a checklist.
//!
//! Pure string functions. These define which catalog entries get special
//! treatment when a checklist is assembled and printed.

/// Always printed first. Its presence also adds the vitals card.
pub const TRIAGE: &str = "Triagem";

/// Always printed last.
pub const BILLING: &str = "Faturamento";

pub const CLINICAL_EXAM: &str = "Exame Clínico";

/// Forced into both the catalog and the mandatory list on every startup.
pub const BASELINE_MANDATORY: [&str; 3] = [CLINICAL_EXAM, BILLING, TRIAGE];

/// Catalog seeded when no catalog file exists yet.
pub const DEFAULT_CATALOG: [&str; 12] = [
    CLINICAL_EXAM,
    BILLING,
    TRIAGE,
    "Audiometria",
    "Espirometria",
    "Eletrocardiograma",
    "Hemograma Completo",
    "Glicemia",
    "Exame de Urina",
    "Raio-X Tórax",
    "Acuidade Visual",
    "Exame Dermatológico",
];

/// Move [`TRIAGE`] to the front and [`BILLING`] to the back.
///
/// Every other procedure keeps its relative order. Duplicates of the two
/// designated names collapse into one entry.
pub fn order_procedures(procedures: Vec<String>) -> Vec<String> {
    let has_triage = procedures.iter().any(|p| p == TRIAGE);
    let has_billing = procedures.iter().any(|p| p == BILLING);

    let mut ordered = Vec::with_capacity(procedures.len());
    if has_triage {
        ordered.push(TRIAGE.to_string());
    }
    ordered.extend(
        procedures
            .into_iter()
            .filter(|p| p != TRIAGE && p != BILLING),
    );
    if has_billing {
        ordered.push(BILLING.to_string());
    }
    ordered
}
