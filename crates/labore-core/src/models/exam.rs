use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Occupational exam category printed on the checklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ExamType {
    #[default]
    #[serde(rename = "Admissional")]
    Admission,
    #[serde(rename = "Periódico")]
    Periodic,
    #[serde(rename = "Retorno ao Trabalho")]
    ReturnToWork,
    #[serde(rename = "Demissional")]
    Termination,
}

impl ExamType {
    pub const ALL: [ExamType; 4] = [
        ExamType::Admission,
        ExamType::Periodic,
        ExamType::ReturnToWork,
        ExamType::Termination,
    ];

    /// The label shown on screen and printed on the document.
    pub fn label(&self) -> &'static str {
        match self {
            ExamType::Admission => "Admissional",
            ExamType::Periodic => "Periódico",
            ExamType::ReturnToWork => "Retorno ao Trabalho",
            ExamType::Termination => "Demissional",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExamType {
    type Err = CoreError;

    /// Case-insensitive match on the label. The unaccented spelling
    /// "periodico" is accepted as well, since it is what people type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "periodico" {
            return Ok(ExamType::Periodic);
        }
        ExamType::ALL
            .into_iter()
            .find(|t| t.label().to_lowercase() == wanted)
            .ok_or_else(|| CoreError::UnknownExamType(s.to_string()))
    }
}
