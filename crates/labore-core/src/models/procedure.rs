use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A catalog entry: a procedure name and whether it needs a signed report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProcedureDefinition {
    pub name: String,
    pub requires_report: bool,
}

impl ProcedureDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requires_report: false,
        }
    }
}

/// Per-name payload as stored in the catalog file (the name is the key).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProcedureAttributes {
    #[serde(default, alias = "requer_laudo")]
    pub requires_report: bool,
}

/// One row of the printed checklist body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChecklistItem {
    pub name: String,
    pub requires_report: bool,
}
